// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTick {
    pub elapsed_seconds: u64,
    pub progress: f64,
    pub arrived: bool,
}

/// One-second countdown for a single flight.
///
/// Once the elapsed time reaches the total the clock is terminal: further
/// ticks report the same reading and change nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightClock {
    total_duration_seconds: u64,
    elapsed_seconds: u64,
}

impl FlightClock {
    pub fn new(total_duration_seconds: u64) -> Result<Self, SessionError> {
        if total_duration_seconds == 0 {
            return Err(SessionError::ClockMisconfiguration(
                "flight duration must be positive".to_string(),
            ));
        }
        Ok(Self {
            total_duration_seconds,
            elapsed_seconds: 0,
        })
    }

    pub fn tick(&mut self) -> FlightTick {
        if !self.is_arrived() {
            self.elapsed_seconds += 1;
        }
        self.reading()
    }

    pub fn reading(&self) -> FlightTick {
        FlightTick {
            elapsed_seconds: self.elapsed_seconds,
            progress: self.progress(),
            arrived: self.is_arrived(),
        }
    }

    pub fn progress(&self) -> f64 {
        (self.elapsed_seconds as f64 / self.total_duration_seconds as f64).min(1.0)
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.total_duration_seconds
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.total_duration_seconds.saturating_sub(self.elapsed_seconds)
    }

    pub fn is_arrived(&self) -> bool {
        self.elapsed_seconds >= self.total_duration_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_rejected() {
        assert!(matches!(
            FlightClock::new(0),
            Err(SessionError::ClockMisconfiguration(_))
        ));
    }

    #[test]
    fn test_progress_reaches_one_exactly_at_total() {
        let mut clock = FlightClock::new(4).unwrap();
        let readings: Vec<FlightTick> = (0..4).map(|_| clock.tick()).collect();

        assert_eq!(readings[0].progress, 0.25);
        assert_eq!(readings[1].progress, 0.5);
        assert!(!readings[2].arrived);
        assert_eq!(readings[3].elapsed_seconds, 4);
        assert_eq!(readings[3].progress, 1.0);
        assert!(readings[3].arrived);
        assert_eq!(clock.remaining_seconds(), 0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut clock = FlightClock::new(600).unwrap();
        let mut last = 0.0;
        for _ in 0..700 {
            let t = clock.tick();
            assert!(t.progress >= last);
            assert!(t.progress <= 1.0);
            last = t.progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_terminal_state_is_idempotent() {
        let mut clock = FlightClock::new(2).unwrap();
        clock.tick();
        let arrived = clock.tick();
        assert!(arrived.arrived);

        for _ in 0..5 {
            assert_eq!(clock.tick(), arrived);
        }
        assert_eq!(clock.elapsed_seconds(), 2);
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut clock = FlightClock::new(4709).unwrap();
        assert_eq!(clock.remaining_seconds(), 4709);
        clock.tick();
        assert_eq!(clock.remaining_seconds(), 4708);
        assert_eq!(clock.total_duration_seconds(), 4709);
    }
}
