//! Entity pool: the bears in play and their kinematic state

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bears::Bear;
use crate::consts::*;

/// One bear participating in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    /// Display metadata, not used by game logic
    pub bear: Bear,
    /// Position as a percentage of arena extent
    pub pos: Vec2,
    /// Arena units per frame
    pub vel: Vec2,
    /// Frozen once clicked in the right order
    pub clicked: bool,
}

impl Entity {
    pub fn new(bear: Bear, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id: bear.id,
            bear,
            pos,
            vel,
            clicked: false,
        }
    }

    /// Spawn with a random position away from the walls and a random velocity
    pub fn spawn(bear: Bear, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            rng.random_range(SPAWN_MIN..=SPAWN_MAX),
            rng.random_range(SPAWN_MIN..=SPAWN_MAX),
        );
        let vel = Vec2::new(
            rng.random_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
            rng.random_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
        );
        Self::new(bear, pos, vel)
    }
}

/// Fixed-size set of entities for one roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPool {
    entities: Vec<Entity>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entity with fresh state for the given roster
    pub fn seed(&mut self, bears: Vec<Bear>, rng: &mut impl Rng) {
        self.entities = bears.into_iter().map(|b| Entity::spawn(b, rng)).collect();
    }

    /// Replace every entity with explicit state (fixtures, replays)
    pub fn seed_with(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
    }

    /// Clear click flags, leaving kinematics untouched
    pub fn reset(&mut self) {
        for entity in &mut self.entities {
            entity.clicked = false;
        }
    }

    /// Entities in ascending id order. Recomputed on every call; storage order is untouched.
    pub fn sorted_by_id(&self) -> impl Iterator<Item = &Entity> {
        let mut order: Vec<&Entity> = self.entities.iter().collect();
        order.sort_by_key(|e| e.id);
        order.into_iter()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clicked_count(&self) -> usize {
        self.entities.iter().filter(|e| e.clicked).count()
    }
}
