//! Countdown driven by a once-per-second interval
//!
//! The interval keeps firing regardless of phase; ticks outside `Playing`
//! are observed and dropped here.

use super::state::GameSession;

/// What a single timer emission did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Not playing, nothing changed
    Discarded,
    /// One second taken off the countdown
    Counted { remaining: u32 },
}

/// Consume one emission
pub fn apply_tick(session: &mut GameSession) -> TimerTick {
    if !session.is_playing() {
        return TimerTick::Discarded;
    }
    session.time_remaining = session.time_remaining.saturating_sub(1);
    TimerTick::Counted {
        remaining: session.time_remaining,
    }
}

/// Derived condition: the countdown is spent while the game is still live
pub fn timed_out(session: &GameSession) -> bool {
    session.is_playing() && session.time_remaining == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, LossReason};

    #[test]
    fn test_tick_counts_down_while_playing() {
        let mut session = GameSession::new();
        session.begin();
        assert_eq!(apply_tick(&mut session), TimerTick::Counted { remaining: 29 });
        assert_eq!(apply_tick(&mut session), TimerTick::Counted { remaining: 28 });
        assert!(!timed_out(&session));
    }

    #[test]
    fn test_tick_discarded_outside_playing() {
        let mut session = GameSession::new();
        assert_eq!(session.phase, GamePhase::Waiting);
        assert_eq!(apply_tick(&mut session), TimerTick::Discarded);
        assert_eq!(session.time_remaining, 30);

        session.begin();
        session.finish_lost(LossReason::Timeout);
        let before = session.time_remaining;
        assert_eq!(apply_tick(&mut session), TimerTick::Discarded);
        assert_eq!(session.time_remaining, before);
    }

    #[test]
    fn test_timed_out_only_while_playing() {
        let mut session = GameSession::new();
        session.begin();
        session.time_remaining = 1;
        apply_tick(&mut session);
        assert!(timed_out(&session));

        session.finish_lost(LossReason::Timeout);
        assert!(!timed_out(&session));
    }
}
