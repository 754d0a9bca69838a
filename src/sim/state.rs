//! Session state shared by the state machine, timer and click arbiter

use serde::{Deserialize, Serialize};

use crate::consts::TIME_BUDGET_SECS;

pub const MSG_NO_BEARS: &str = "No bears available to play with.";
pub const MSG_TIMEOUT: &str = "Time ran out!";
pub const MSG_WON: &str = "Congratulations! You clicked all bears in the correct order!";

/// Current phase of a play-through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Roster loaded (or loading), waiting for Start
    #[default]
    Waiting,
    /// Bears moving, countdown running
    Playing,
    /// Every bear clicked in order
    Won,
    /// Timed out or clicked out of order
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Waiting => "waiting",
            GamePhase::Playing => "playing",
            GamePhase::Won => "won",
            GamePhase::Lost => "lost",
        }
    }
}

/// Why a play-through was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    Timeout,
    WrongOrder { clicked: u32, expected: u32 },
}

impl LossReason {
    pub fn message(&self) -> String {
        match self {
            LossReason::Timeout => MSG_TIMEOUT.to_string(),
            LossReason::WrongOrder { clicked, expected } => format!(
                "Wrong order! You clicked bear {clicked} but should have clicked bear {expected}."
            ),
        }
    }
}

/// Authoritative session state, created once and updated in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    /// Cursor into the ascending-id sequence: the next bear to click
    pub expected_click_index: usize,
    /// Status or outcome text for the player
    pub message: String,
    /// Set when the last play-through ended in `Lost`
    pub loss: Option<LossReason>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: GamePhase::Waiting,
            time_remaining: TIME_BUDGET_SECS,
            expected_click_index: 0,
            message: String::new(),
            loss: None,
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Reset counters for a fresh play-through
    pub(crate) fn begin(&mut self) {
        self.phase = GamePhase::Playing;
        self.time_remaining = TIME_BUDGET_SECS;
        self.expected_click_index = 0;
        self.message.clear();
        self.loss = None;
    }

    pub(crate) fn finish_won(&mut self) {
        self.phase = GamePhase::Won;
        self.message = MSG_WON.to_string();
    }

    pub(crate) fn finish_lost(&mut self, reason: LossReason) {
        self.phase = GamePhase::Lost;
        self.message = reason.message();
        self.loss = Some(reason);
    }

    pub(crate) fn back_to_waiting(&mut self) {
        self.phase = GamePhase::Waiting;
        self.message.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_order_message_names_clicked_then_expected() {
        let reason = LossReason::WrongOrder {
            clicked: 2,
            expected: 1,
        };
        assert_eq!(
            reason.message(),
            "Wrong order! You clicked bear 2 but should have clicked bear 1."
        );
    }

    #[test]
    fn test_begin_resets_counters() {
        let mut session = GameSession::new();
        session.time_remaining = 3;
        session.expected_click_index = 2;
        session.finish_lost(LossReason::Timeout);
        assert_eq!(session.message, MSG_TIMEOUT);

        session.begin();
        assert!(session.is_playing());
        assert_eq!(session.time_remaining, TIME_BUDGET_SECS);
        assert_eq!(session.expected_click_index, 0);
        assert!(session.message.is_empty());
        assert!(session.loss.is_none());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!GamePhase::Waiting.is_terminal());
        assert!(!GamePhase::Playing.is_terminal());
        assert!(GamePhase::Won.is_terminal());
        assert!(GamePhase::Lost.is_terminal());
    }
}
