// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::session::FlightPhase;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid transition: cannot {action} while {phase} ({reason})")]
    InvalidTransition {
        action: &'static str,
        phase: FlightPhase,
        reason: &'static str,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Clock misconfiguration: {0}")]
    ClockMisconfiguration(String),
}

impl SessionError {
    pub(crate) fn wrong_phase(action: &'static str, phase: FlightPhase) -> Self {
        SessionError::InvalidTransition {
            action,
            phase,
            reason: "not allowed in this phase",
        }
    }

    pub(crate) fn unmet(action: &'static str, phase: FlightPhase, reason: &'static str) -> Self {
        SessionError::InvalidTransition {
            action,
            phase,
            reason,
        }
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, SessionError::InvalidTransition { .. })
    }
}
