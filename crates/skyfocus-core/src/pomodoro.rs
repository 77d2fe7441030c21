// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::error::SessionError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_SECONDS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECONDS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PomodoroPhase {
    Work,
    Break,
}

impl PomodoroPhase {
    pub fn flipped(self) -> Self {
        match self {
            PomodoroPhase::Work => PomodoroPhase::Break,
            PomodoroPhase::Break => PomodoroPhase::Work,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    pub work_duration_seconds: u64,
    pub break_duration_seconds: u64,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_duration_seconds: DEFAULT_WORK_SECONDS,
            break_duration_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

impl PomodoroConfig {
    pub fn duration_of(&self, phase: PomodoroPhase) -> u64 {
        match phase {
            PomodoroPhase::Work => self.work_duration_seconds,
            PomodoroPhase::Break => self.break_duration_seconds,
        }
    }

    pub fn cycle_seconds(&self) -> u64 {
        self.work_duration_seconds + self.break_duration_seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroTick {
    pub phase: PomodoroPhase,
    pub elapsed_in_phase_seconds: u64,
    pub flipped: bool,
    /// Set only when this tick flipped the phase.
    pub new_phase: Option<PomodoroPhase>,
}

/// Work/break countdown that cycles forever; it has no notion of the flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PomodoroClock {
    config: PomodoroConfig,
    phase: PomodoroPhase,
    elapsed_in_phase_seconds: u64,
    completed_work_sessions: u32,
}

impl PomodoroClock {
    pub fn new(config: PomodoroConfig) -> Result<Self, SessionError> {
        if config.work_duration_seconds == 0 {
            return Err(SessionError::ClockMisconfiguration(
                "pomodoro work duration must be positive".to_string(),
            ));
        }
        if config.break_duration_seconds == 0 {
            return Err(SessionError::ClockMisconfiguration(
                "pomodoro break duration must be positive".to_string(),
            ));
        }
        Ok(Self {
            config,
            phase: PomodoroPhase::Work,
            elapsed_in_phase_seconds: 0,
            completed_work_sessions: 0,
        })
    }

    pub fn tick(&mut self) -> PomodoroTick {
        self.elapsed_in_phase_seconds += 1;

        if self.elapsed_in_phase_seconds < self.config.duration_of(self.phase) {
            return PomodoroTick {
                phase: self.phase,
                elapsed_in_phase_seconds: self.elapsed_in_phase_seconds,
                flipped: false,
                new_phase: None,
            };
        }

        if self.phase == PomodoroPhase::Work {
            self.completed_work_sessions += 1;
        }
        self.phase = self.phase.flipped();
        self.elapsed_in_phase_seconds = 0;

        PomodoroTick {
            phase: self.phase,
            elapsed_in_phase_seconds: 0,
            flipped: true,
            new_phase: Some(self.phase),
        }
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn elapsed_in_phase_seconds(&self) -> u64 {
        self.elapsed_in_phase_seconds
    }

    pub fn remaining_in_phase_seconds(&self) -> u64 {
        self.config
            .duration_of(self.phase)
            .saturating_sub(self.elapsed_in_phase_seconds)
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }
}
