// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airports::Airport;
use crate::error::SessionError;
use crate::flight_clock::FlightClock;
use crate::geo;
use crate::pomodoro::{PomodoroClock, PomodoroConfig, PomodoroPhase};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightPhase {
    Planning,
    Boarding,
    InFlight,
    Arrived,
}

impl FlightPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightPhase::Planning => "planning",
            FlightPhase::Boarding => "boarding",
            FlightPhase::InFlight => "in flight",
            FlightPhase::Arrived => "arrived",
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimerMode {
    #[default]
    Standard,
    PomodoroCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub origin: Airport,
    pub destination: Airport,
}

impl FlightPlan {
    pub fn distance_km(&self) -> f64 {
        geo::distance_km(self.origin.location, self.destination.location)
    }

    pub fn duration_seconds(&self) -> u64 {
        geo::estimated_duration_seconds(self.origin.location, self.destination.location)
    }
}

/// Discrete signals produced by a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    PomodoroFlipped { new_phase: PomodoroPhase },
    Arrived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: FlightPhase,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub seat: Option<String>,
    pub mode: TimerMode,
    pub pomodoro_phase: PomodoroPhase,
    pub elapsed_flight_seconds: u64,
    pub elapsed_pomodoro_seconds: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: FlightPhase::Planning,
            origin: None,
            destination: None,
            seat: None,
            mode: TimerMode::Standard,
            pomodoro_phase: PomodoroPhase::Work,
            elapsed_flight_seconds: 0,
            elapsed_pomodoro_seconds: 0,
        }
    }
}

impl SessionState {
    pub fn plan(&self) -> Option<FlightPlan> {
        match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => Some(FlightPlan {
                origin: origin.clone(),
                destination: destination.clone(),
            }),
            _ => None,
        }
    }
}

/// Read-only view handed to the presentation layer after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub total_flight_seconds: u64,
    pub remaining_flight_seconds: u64,
    /// Flight completion in [0,1].
    pub progress: f64,
    pub pomodoro_remaining_seconds: Option<u64>,
    pub completed_work_sessions: Option<u32>,
    /// Events of the most recent tick; empty after any other transition.
    pub events: Vec<SessionEvent>,
}

impl SessionSnapshot {
    pub fn phase(&self) -> FlightPhase {
        self.state.phase
    }

    pub fn arrived(&self) -> bool {
        self.events.contains(&SessionEvent::Arrived)
    }

    pub fn pomodoro_flip(&self) -> Option<PomodoroPhase> {
        self.events.iter().find_map(|e| match e {
            SessionEvent::PomodoroFlipped { new_phase } => Some(*new_phase),
            SessionEvent::Arrived => None,
        })
    }
}

/// Owns the session lifecycle and both clocks.
///
/// The clocks live from `confirm_flight` until the next reset, so an Arrived
/// session keeps its terminal readings; `tick` is gated on the phase alone.
/// Transitions are atomic: each one validates everything it needs before it
/// touches the state, and a rejected call returns an error with nothing changed.
pub struct SessionStateMachine {
    state: SessionState,
    pomodoro_config: PomodoroConfig,
    flight_clock: Option<FlightClock>,
    pomodoro_clock: Option<PomodoroClock>,
    /// Duration of the current or just-finished flight.
    total_flight_seconds: u64,
    last_events: Vec<SessionEvent>,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new(PomodoroConfig::default())
    }
}

impl SessionStateMachine {
    pub fn new(pomodoro_config: PomodoroConfig) -> Self {
        Self {
            state: SessionState::default(),
            pomodoro_config,
            flight_clock: None,
            pomodoro_clock: None,
            total_flight_seconds: 0,
            last_events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase
    }

    pub fn pomodoro_config(&self) -> &PomodoroConfig {
        &self.pomodoro_config
    }

    fn require_phase(&self, action: &'static str, phase: FlightPhase) -> Result<(), SessionError> {
        if self.state.phase != phase {
            log::warn!("Rejected '{}' while {}", action, self.state.phase);
            return Err(SessionError::wrong_phase(action, self.state.phase));
        }
        Ok(())
    }

    fn validate_airport(airport: &Airport) -> Result<(), SessionError> {
        if airport.code.trim().is_empty() {
            return Err(SessionError::InvalidInput(
                "airport code must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn select_origin(&mut self, airport: Airport) -> Result<(), SessionError> {
        self.require_phase("select origin", FlightPhase::Planning)?;
        Self::validate_airport(&airport)?;
        log::debug!("Origin set to {}", airport.code);
        self.state.origin = Some(airport);
        self.last_events.clear();
        Ok(())
    }

    pub fn select_destination(&mut self, airport: Airport) -> Result<(), SessionError> {
        self.require_phase("select destination", FlightPhase::Planning)?;
        Self::validate_airport(&airport)?;
        log::debug!("Destination set to {}", airport.code);
        self.state.destination = Some(airport);
        self.last_events.clear();
        Ok(())
    }

    pub fn proceed_to_boarding(&mut self) -> Result<(), SessionError> {
        const ACTION: &str = "proceed to boarding";
        self.require_phase(ACTION, FlightPhase::Planning)?;
        if self.state.origin.is_none() {
            return Err(SessionError::unmet(ACTION, self.state.phase, "no origin selected"));
        }
        if self.state.destination.is_none() {
            return Err(SessionError::unmet(
                ACTION,
                self.state.phase,
                "no destination selected",
            ));
        }
        self.state.phase = FlightPhase::Boarding;
        self.last_events.clear();
        log::info!("Boarding started");
        Ok(())
    }

    pub fn select_seat(&mut self, seat: &str) -> Result<(), SessionError> {
        self.require_phase("select seat", FlightPhase::Boarding)?;
        let seat = seat.trim();
        if seat.is_empty() {
            return Err(SessionError::InvalidInput(
                "seat id must not be empty".to_string(),
            ));
        }
        self.state.seat = Some(seat.to_string());
        self.last_events.clear();
        Ok(())
    }

    /// Back to planning with the route kept and the seat given up.
    pub fn change_route(&mut self) -> Result<(), SessionError> {
        self.require_phase("change route", FlightPhase::Boarding)?;
        self.state.seat = None;
        self.state.phase = FlightPhase::Planning;
        self.last_events.clear();
        log::info!("Route change requested, back to planning");
        Ok(())
    }

    pub fn confirm_flight(&mut self, mode: TimerMode) -> Result<(), SessionError> {
        const ACTION: &str = "confirm flight";
        self.require_phase(ACTION, FlightPhase::Boarding)?;
        if self.state.seat.is_none() {
            return Err(SessionError::unmet(ACTION, self.state.phase, "no seat selected"));
        }
        let plan = self
            .state
            .plan()
            .ok_or_else(|| SessionError::unmet(ACTION, self.state.phase, "route incomplete"))?;

        // Build both clocks before mutating anything.
        let flight_clock = FlightClock::new(plan.duration_seconds())?;
        let pomodoro_clock = match mode {
            TimerMode::Standard => None,
            TimerMode::PomodoroCycle => Some(PomodoroClock::new(self.pomodoro_config)?),
        };

        log::info!(
            "Departing {} -> {} ({:.1} km, {} s, {:?})",
            plan.origin.code,
            plan.destination.code,
            plan.distance_km(),
            flight_clock.total_duration_seconds(),
            mode
        );

        self.total_flight_seconds = flight_clock.total_duration_seconds();
        self.flight_clock = Some(flight_clock);
        self.pomodoro_clock = pomodoro_clock;
        self.state.mode = mode;
        self.state.pomodoro_phase = PomodoroPhase::Work;
        self.state.elapsed_flight_seconds = 0;
        self.state.elapsed_pomodoro_seconds = 0;
        self.state.phase = FlightPhase::InFlight;
        self.last_events.clear();
        Ok(())
    }

    /// Advances the flight (and the Pomodoro cycle, when active) by one second.
    ///
    /// A Pomodoro flip and the arrival can land on the same tick; both are
    /// reported, flip first.
    pub fn tick(&mut self) -> Result<SessionSnapshot, SessionError> {
        self.require_phase("tick", FlightPhase::InFlight)?;
        let flight_clock = self
            .flight_clock
            .as_mut()
            .ok_or_else(|| SessionError::unmet("tick", FlightPhase::InFlight, "no flight clock"))?;

        let mut events = Vec::new();
        let flight = flight_clock.tick();
        self.state.elapsed_flight_seconds = flight.elapsed_seconds;

        if let Some(pomodoro) = self.pomodoro_clock.as_mut() {
            let p = pomodoro.tick();
            self.state.pomodoro_phase = p.phase;
            self.state.elapsed_pomodoro_seconds = p.elapsed_in_phase_seconds;
            if let Some(new_phase) = p.new_phase {
                log::info!("Pomodoro flipped to {:?}", new_phase);
                events.push(SessionEvent::PomodoroFlipped { new_phase });
            }
        }

        if flight.arrived {
            events.push(SessionEvent::Arrived);
            self.state.phase = FlightPhase::Arrived;
            log::info!("Arrived after {} s", self.state.elapsed_flight_seconds);
        }

        self.last_events = events;
        Ok(self.snapshot())
    }

    /// Returns to the initial planning state from anywhere, dropping the route,
    /// the seat and any running clocks.
    pub fn abort(&mut self) {
        if self.state.phase == FlightPhase::InFlight {
            log::info!(
                "Flight aborted at {}/{} s",
                self.state.elapsed_flight_seconds,
                self.total_flight_seconds
            );
        }
        self.state = SessionState::default();
        self.flight_clock = None;
        self.pomodoro_clock = None;
        self.total_flight_seconds = 0;
        self.last_events.clear();
    }

    pub fn reset(&mut self) {
        self.abort();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (remaining, progress) = match &self.flight_clock {
            Some(clock) => (clock.remaining_seconds(), clock.progress()),
            None => (0, 0.0),
        };
        SessionSnapshot {
            state: self.state.clone(),
            total_flight_seconds: self.total_flight_seconds,
            remaining_flight_seconds: remaining,
            progress,
            pomodoro_remaining_seconds: self
                .pomodoro_clock
                .as_ref()
                .map(PomodoroClock::remaining_in_phase_seconds),
            completed_work_sessions: self
                .pomodoro_clock
                .as_ref()
                .map(PomodoroClock::completed_work_sessions),
            events: self.last_events.clone(),
        }
    }
}
