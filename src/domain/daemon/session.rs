//! Daemon session state machine

use std::fmt;
use thiserror::Error;

/// Daemon states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DaemonState {
    #[default]
    Idle,
    Detecting,
    Translating,
}

impl DaemonState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Detecting => "detecting",
            Self::Translating => "translating",
        }
    }
}

impl fmt::Display for DaemonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: DaemonState,
    pub action: String,
}

/// Daemon session entity.
/// Manages state transitions for the daemon lifecycle.
///
/// State machine:
///   IDLE -> DETECTING (start_detection, auto source only)
///   IDLE -> TRANSLATING (start_translation, known source)
///   DETECTING -> TRANSLATING (start_translation)
///   DETECTING -> IDLE (cancel)
///   TRANSLATING -> IDLE (complete or cancel)
#[derive(Debug, Default)]
pub struct DaemonSession {
    state: DaemonState,
}

impl DaemonSession {
    /// Create a new daemon session in idle state
    pub fn new() -> Self {
        Self {
            state: DaemonState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> DaemonState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == DaemonState::Idle
    }

    /// Check if a request is in flight (detecting or translating)
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    /// Transition from IDLE to DETECTING
    pub fn start_detection(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != DaemonState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start detection".to_string(),
            });
        }
        self.state = DaemonState::Detecting;
        Ok(())
    }

    /// Transition from IDLE or DETECTING to TRANSLATING
    pub fn start_translation(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state == DaemonState::Translating {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start translation".to_string(),
            });
        }
        self.state = DaemonState::Translating;
        Ok(())
    }

    /// Transition from TRANSLATING back to IDLE
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != DaemonState::Translating {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "complete translation".to_string(),
            });
        }
        self.state = DaemonState::Idle;
        Ok(())
    }

    /// Transition from any busy state back to IDLE (request aborted)
    pub fn cancel(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state == DaemonState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "cancel".to_string(),
            });
        }
        self.state = DaemonState::Idle;
        Ok(())
    }
}
