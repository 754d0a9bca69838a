//! Click arbitration against the ascending-id order

use super::pool::EntityPool;
use super::state::GameSession;

/// Decision for a single click, before it is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickVerdict {
    /// Not playing, unknown id, or bear already clicked
    Stale,
    /// Right bear; `completes` when it is the last one
    Correct { completes: bool },
    /// Wrong bear
    OutOfOrder { clicked: u32, expected: u32 },
}

/// Judge a click without mutating anything
pub fn arbitrate(pool: &EntityPool, session: &GameSession, id: u32) -> ClickVerdict {
    if !session.is_playing() {
        return ClickVerdict::Stale;
    }
    match pool.get(id) {
        Some(entity) if !entity.clicked => {}
        _ => return ClickVerdict::Stale,
    }

    let Some(expected) = pool.sorted_by_id().nth(session.expected_click_index) else {
        // Cursor past the end only happens after a win
        return ClickVerdict::Stale;
    };

    if expected.id == id {
        ClickVerdict::Correct {
            completes: session.expected_click_index + 1 >= pool.len(),
        }
    } else {
        ClickVerdict::OutOfOrder {
            clicked: id,
            expected: expected.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bears::Bear;
    use crate::sim::pool::Entity;
    use glam::Vec2;

    fn pool_with(ids: &[u32]) -> EntityPool {
        let mut pool = EntityPool::new();
        pool.seed_with(
            ids.iter()
                .map(|&id| Entity::new(Bear::new(id, "Test", 10, &[]), Vec2::splat(50.0), Vec2::ZERO))
                .collect(),
        );
        pool
    }

    fn playing() -> GameSession {
        let mut session = GameSession::new();
        session.begin();
        session
    }

    #[test]
    fn test_expected_follows_id_not_storage_order() {
        let pool = pool_with(&[30, 10, 20]);
        let session = playing();
        assert_eq!(
            arbitrate(&pool, &session, 10),
            ClickVerdict::Correct { completes: false }
        );
        assert_eq!(
            arbitrate(&pool, &session, 30),
            ClickVerdict::OutOfOrder {
                clicked: 30,
                expected: 10
            }
        );
    }

    #[test]
    fn test_last_bear_completes() {
        let pool = pool_with(&[1, 2]);
        let mut session = playing();
        session.expected_click_index = 1;
        assert_eq!(
            arbitrate(&pool, &session, 2),
            ClickVerdict::Correct { completes: true }
        );
    }

    #[test]
    fn test_stale_when_not_playing() {
        let pool = pool_with(&[1]);
        let session = GameSession::new();
        assert_eq!(arbitrate(&pool, &session, 1), ClickVerdict::Stale);
    }

    #[test]
    fn test_stale_for_unknown_or_clicked() {
        let mut pool = pool_with(&[1, 2]);
        let session = playing();
        assert_eq!(arbitrate(&pool, &session, 99), ClickVerdict::Stale);

        pool.get_mut(1).unwrap().clicked = true;
        assert_eq!(arbitrate(&pool, &session, 1), ClickVerdict::Stale);
    }
}
