// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use chrono::{DateTime, Duration, Local};
use skyfocus_core::route::PlanePosition;
use skyfocus_core::{PomodoroPhase, SessionSnapshot, TimerMode};

const BAR_WIDTH: usize = 30;

/// "HH:MM:SS", hours not wrapped at 24.
pub fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// "M:SS" for the Pomodoro countdown.
pub fn format_countdown(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    bar.push_str(&"=".repeat(filled));
    if filled < width {
        bar.push('>');
        bar.push_str(&" ".repeat(width - filled - 1));
    }
    bar.push(']');
    bar
}

pub fn seatbelt_sign(phase: PomodoroPhase) -> &'static str {
    match phase {
        PomodoroPhase::Work => "FASTEN SEATBELTS",
        PomodoroPhase::Break => "SNACK TIME - SEATBELTS OFF",
    }
}

/// Local wall-clock time the flight lands if nothing is aborted.
pub fn arrival_time(now: DateTime<Local>, remaining_seconds: u64) -> DateTime<Local> {
    now + Duration::seconds(remaining_seconds as i64)
}

pub fn status_line(snapshot: &SessionSnapshot, plane: &PlanePosition) -> String {
    let mut line = format!(
        "{} {:>5.1}%  HDG {:03.0}  ETA {}",
        progress_bar(snapshot.progress, BAR_WIDTH),
        snapshot.progress * 100.0,
        plane.heading_degrees,
        format_hms(snapshot.remaining_flight_seconds)
    );
    if snapshot.state.mode == TimerMode::PomodoroCycle {
        if let Some(remaining) = snapshot.pomodoro_remaining_seconds {
            line.push_str(&format!(
                "  | {} {}",
                seatbelt_sign(snapshot.state.pomodoro_phase),
                format_countdown(remaining)
            ));
        }
    }
    line
}

pub fn flip_notice(new_phase: PomodoroPhase, break_seconds: u64) -> String {
    match new_phase {
        PomodoroPhase::Break => format!(
            "SNACK TIME! Seatbelts off. The cabin crew is serving refreshments, \
             take {} to stretch and refuel.",
            describe_minutes(break_seconds)
        ),
        PomodoroPhase::Work => {
            "The captain has turned on the seatbelt sign. Back to work.".to_string()
        }
    }
}

pub fn touchdown_banner(city: &str) -> String {
    if city.is_empty() {
        "TOUCHDOWN! Focus session complete.".to_string()
    } else {
        format!("TOUCHDOWN! Welcome to {}. Focus session complete.", city)
    }
}

fn describe_minutes(seconds: u64) -> String {
    let minutes = seconds / 60;
    match (minutes, seconds % 60) {
        (0, s) => format!("{} seconds", s),
        (1, 0) => "1 minute".to_string(),
        (m, 0) => format!("{} minutes", m),
        (_, _) => format_countdown(seconds),
    }
}
