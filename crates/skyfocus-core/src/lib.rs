// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Flight-themed focus timer core: great-circle flight durations, the flight
//! and Pomodoro clocks, and the session state machine that owns them.
//!
//! The crate has no timer of its own. A shell drives [`SessionStateMachine::tick`]
//! once per second while a flight is in the air and renders the returned
//! [`SessionSnapshot`].

pub mod airports;
pub mod config;
pub mod error;
pub mod flight_clock;
pub mod geo;
pub mod pomodoro;
pub mod route;
pub mod session;

pub use airports::{Airport, AirportDirectory};
pub use error::SessionError;
pub use flight_clock::{FlightClock, FlightTick};
pub use geo::Coordinate;
pub use pomodoro::{PomodoroClock, PomodoroConfig, PomodoroPhase, PomodoroTick};
pub use session::{
    FlightPhase, FlightPlan, SessionEvent, SessionSnapshot, SessionState, SessionStateMachine,
    TimerMode,
};
