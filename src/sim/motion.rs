//! Per-frame motion with elastic bounce off the arena margins

use glam::Vec2;

use super::pool::{Entity, EntityPool};
use crate::consts::{BOUNCE_MAX, BOUNCE_MIN};

/// Advance one axis by one step. Returns the new (position, velocity).
///
/// Touching or crossing a margin clamps to it and flips the velocity sign.
#[inline]
pub fn bounce_axis(pos: f32, vel: f32) -> (f32, f32) {
    let next = pos + vel;
    if next <= BOUNCE_MIN {
        (BOUNCE_MIN, -vel)
    } else if next >= BOUNCE_MAX {
        (BOUNCE_MAX, -vel)
    } else {
        (next, vel)
    }
}

/// Advance a single entity; clicked entities stay frozen
pub fn step_entity(entity: &mut Entity) {
    if entity.clicked {
        return;
    }
    let (x, vx) = bounce_axis(entity.pos.x, entity.vel.x);
    let (y, vy) = bounce_axis(entity.pos.y, entity.vel.y);
    entity.pos = Vec2::new(x, y);
    entity.vel = Vec2::new(vx, vy);
}

/// Advance every live entity by one frame as a single batch
pub fn integrate(pool: &mut EntityPool) {
    for entity in pool.iter_mut() {
        step_entity(entity);
    }
}
