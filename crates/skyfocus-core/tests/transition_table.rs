use skyfocus_core::{
    Airport, Coordinate, FlightPhase, SessionError, SessionSnapshot, SessionStateMachine,
    TimerMode,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    SelectOrigin,
    SelectDestination,
    ProceedToBoarding,
    SelectSeat,
    ChangeRoute,
    ConfirmFlight,
    Tick,
}

const ALL_ACTIONS: [Action; 7] = [
    Action::SelectOrigin,
    Action::SelectDestination,
    Action::ProceedToBoarding,
    Action::SelectSeat,
    Action::ChangeRoute,
    Action::ConfirmFlight,
    Action::Tick,
];

fn valid_in(action: Action) -> FlightPhase {
    match action {
        Action::SelectOrigin | Action::SelectDestination | Action::ProceedToBoarding => {
            FlightPhase::Planning
        }
        Action::SelectSeat | Action::ChangeRoute | Action::ConfirmFlight => FlightPhase::Boarding,
        Action::Tick => FlightPhase::InFlight,
    }
}

fn airport(code: &str, lat: f64, lon: f64) -> Airport {
    Airport::new(code, code, Coordinate::new(lat, lon))
}

fn apply(machine: &mut SessionStateMachine, action: Action) -> Result<(), SessionError> {
    match action {
        Action::SelectOrigin => machine.select_origin(airport("OOO", 1.0, 1.0)),
        Action::SelectDestination => machine.select_destination(airport("DDD", 2.0, 2.0)),
        Action::ProceedToBoarding => machine.proceed_to_boarding(),
        Action::SelectSeat => machine.select_seat("3B"),
        Action::ChangeRoute => machine.change_route(),
        Action::ConfirmFlight => machine.confirm_flight(TimerMode::PomodoroCycle),
        Action::Tick => machine.tick().map(|_| ()),
    }
}

/// A machine parked in the given phase with everything that phase can hold filled in.
fn machine_in(phase: FlightPhase) -> SessionStateMachine {
    let mut machine = SessionStateMachine::default();
    if phase == FlightPhase::Planning {
        machine.select_origin(airport("AAA", 0.0, 0.0)).unwrap();
        return machine;
    }
    machine.select_origin(airport("AAA", 0.0, 0.0)).unwrap();
    machine.select_destination(airport("BBB", 0.0, 1.0)).unwrap();
    machine.proceed_to_boarding().unwrap();
    machine.select_seat("1A").unwrap();
    if phase == FlightPhase::Boarding {
        return machine;
    }
    machine.confirm_flight(TimerMode::PomodoroCycle).unwrap();
    machine.tick().unwrap();
    if phase == FlightPhase::InFlight {
        return machine;
    }
    while machine.phase() == FlightPhase::InFlight {
        machine.tick().unwrap();
    }
    machine
}

const ALL_PHASES: [FlightPhase; 4] = [
    FlightPhase::Planning,
    FlightPhase::Boarding,
    FlightPhase::InFlight,
    FlightPhase::Arrived,
];

#[test]
fn test_out_of_phase_actions_are_rejected_without_mutation() {
    for phase in ALL_PHASES {
        for action in ALL_ACTIONS {
            if valid_in(action) == phase {
                continue;
            }
            let mut machine = machine_in(phase);
            let before: SessionSnapshot = machine.snapshot();
            let err = apply(&mut machine, action).unwrap_err();
            assert!(
                matches!(err, SessionError::InvalidTransition { phase: p, .. } if p == phase),
                "{:?} in {:?} gave {:?}",
                action,
                phase,
                err
            );
            assert_eq!(machine.snapshot(), before, "{:?} in {:?} mutated state", action, phase);
        }
    }
}

#[test]
fn test_in_phase_actions_succeed() {
    for action in ALL_ACTIONS {
        let mut machine = machine_in(valid_in(action));
        if action == Action::ProceedToBoarding {
            machine.select_destination(airport("BBB", 0.0, 1.0)).unwrap();
        }
        assert!(
            apply(&mut machine, action).is_ok(),
            "{:?} failed in its own phase",
            action
        );
    }
}

#[test]
fn test_reset_and_abort_from_every_phase() {
    let initial = SessionStateMachine::default().snapshot();
    for phase in ALL_PHASES {
        let mut aborted = machine_in(phase);
        aborted.abort();
        assert_eq!(aborted.snapshot(), initial, "abort from {:?}", phase);

        let mut reset = machine_in(phase);
        reset.reset();
        assert_eq!(reset.snapshot(), initial, "reset from {:?}", phase);
    }
}

#[test]
fn test_confirm_while_planning() {
    let mut machine = machine_in(FlightPhase::Planning);
    let err = machine.confirm_flight(TimerMode::Standard).unwrap_err();
    assert!(err.is_invalid_transition());
    assert_eq!(machine.phase(), FlightPhase::Planning);
    assert!(err.to_string().contains("confirm flight"));
}

#[test]
fn test_full_lifecycle_round_trip() {
    let mut machine = machine_in(FlightPhase::Arrived);
    assert_eq!(machine.phase(), FlightPhase::Arrived);
    machine.reset();
    assert_eq!(machine.phase(), FlightPhase::Planning);
    assert!(machine.state().origin.is_none());

    machine.select_origin(airport("CCC", 3.0, 3.0)).unwrap();
    machine.select_destination(airport("DDD", 4.0, 4.0)).unwrap();
    machine.proceed_to_boarding().unwrap();
    machine.change_route().unwrap();
    machine.proceed_to_boarding().unwrap();
    machine.select_seat("2D").unwrap();
    machine.select_seat("4A").unwrap();
    assert_eq!(machine.state().seat.as_deref(), Some("4A"));
    machine.confirm_flight(TimerMode::Standard).unwrap();
    assert_eq!(machine.phase(), FlightPhase::InFlight);
}
