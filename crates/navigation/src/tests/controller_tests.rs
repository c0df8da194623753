use std::{cell::RefCell, rc::Rc, sync::Arc, time::Duration};

use crossbeam_channel::bounded;
use shared::domain::SectionId;

use super::*;

const FULL_TRANSITION: Duration = Duration::from_millis(750);

fn controller() -> (NavigationController, ManualClock) {
    let clock = ManualClock::new();
    let catalog = SectionCatalog::new(["A", "B", "C", "D", "E"]).expect("catalog");
    (
        NavigationController::new(catalog, Arc::new(clock.clone())),
        clock,
    )
}

fn settle(controller: &mut NavigationController, clock: &ManualClock) {
    clock.advance(EXIT_DURATION + ENTER_DURATION);
    controller.poll();
}

fn recorded_events(controller: &mut NavigationController) -> Rc<RefCell<Vec<NavigationEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    controller.subscribe(move |event: &NavigationEvent| sink.borrow_mut().push(event.clone()));
    events
}

fn history_ids(controller: &NavigationController) -> Vec<String> {
    controller
        .history()
        .entries()
        .iter()
        .map(|entry| entry.section_id.to_string())
        .collect()
}

#[test]
fn full_transition_constant_matches_phase_durations() {
    assert_eq!(EXIT_DURATION + ENTER_DURATION, FULL_TRANSITION);
}

#[test]
fn go_to_settles_once_and_drops_request_made_in_flight() {
    let (mut controller, clock) = controller();
    let hook_calls = Rc::new(RefCell::new(Vec::<SectionId>::new()));
    for section in ["C", "D"] {
        let calls = Rc::clone(&hook_calls);
        assert!(controller.on_section_entered(section, move |id| {
            calls.borrow_mut().push(id.clone())
        }));
    }

    controller.go_to("C");
    assert!(controller.is_transitioning());
    assert_eq!(controller.current_section(), "A");

    controller.go_to("D");
    settle(&mut controller, &clock);

    assert_eq!(
        controller.state(),
        NavigationState {
            current_section_id: SectionId::new("C"),
            is_transitioning: false,
        }
    );
    assert_eq!(history_ids(&controller), ["A", "C"]);
    assert_eq!(*hook_calls.borrow(), [SectionId::new("C")]);
}

#[test]
fn burst_of_requests_in_flight_equals_first_request_alone() {
    let (mut burst, burst_clock) = controller();
    burst.go_to("B");
    for section in ["C", "D", "E", "A", "B", "C"] {
        burst.go_to(section);
    }
    burst.next();
    burst.previous();
    burst.last();
    settle(&mut burst, &burst_clock);

    let (mut single, single_clock) = controller();
    single.go_to("B");
    settle(&mut single, &single_clock);

    assert_eq!(burst.state(), single.state());
    assert_eq!(history_ids(&burst), history_ids(&single));
}

#[test]
fn next_and_previous_cycle_through_whole_catalog() {
    let (mut controller, clock) = controller();

    for _ in 0..5 {
        controller.next();
        settle(&mut controller, &clock);
    }
    assert_eq!(controller.current_section(), "A");
    assert_eq!(history_ids(&controller), ["A", "B", "C", "D", "E", "A"]);

    for _ in 0..5 {
        controller.previous();
        settle(&mut controller, &clock);
    }
    assert_eq!(controller.current_section(), "A");
}

#[test]
fn next_wraps_from_last_and_previous_wraps_from_first() {
    let (mut controller, clock) = controller();

    controller.previous();
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "E");

    controller.next();
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "A");
}

#[test]
fn history_pop_never_appends_but_go_to_appends_once() {
    let (mut controller, clock) = controller();

    controller.handle_history_pop(Some("D"));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "D");
    assert_eq!(controller.history().len(), 1);

    controller.go_to("B");
    settle(&mut controller, &clock);
    assert_eq!(controller.history().len(), 2);
    assert_eq!(controller.history_location(), "/#B");
}

#[test]
fn history_pop_without_section_returns_to_first() {
    let (mut controller, clock) = controller();
    controller.go_to("C");
    settle(&mut controller, &clock);

    controller.handle_history_pop(None);
    settle(&mut controller, &clock);

    assert_eq!(controller.current_section(), "A");
    assert_eq!(history_ids(&controller), ["A", "C"]);
}

#[test]
fn history_pop_moves_cursor_to_shown_entry() {
    let (mut controller, clock) = controller();
    for section in ["B", "C"] {
        controller.go_to(section);
        settle(&mut controller, &clock);
    }

    controller.dispatch(NavigationInput::HistoryPop(Some(SectionId::new("A"))));
    settle(&mut controller, &clock);

    assert_eq!(controller.current_section(), "A");
    assert_eq!(controller.history_location(), "/");
    assert!(!controller.history().can_go_back());
    assert!(controller.history().can_go_forward());

    controller.go_to("D");
    settle(&mut controller, &clock);
    assert_eq!(history_ids(&controller), ["A", "D"]);
    assert_eq!(controller.history_location(), "/#D");
}

#[test]
fn history_pop_during_transition_is_dropped() {
    let (mut controller, clock) = controller();
    let events = recorded_events(&mut controller);
    let entered = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&entered);
    controller.on_section_entered("C", move |_| *counter.borrow_mut() += 1);

    controller.go_to("B");
    controller.handle_history_pop(Some("C"));
    controller.handle_history_pop(None);
    controller.dispatch(NavigationInput::HistoryPop(Some(SectionId::new("C"))));
    assert_eq!(
        controller.try_go_to("C"),
        Err(NavigationRejection::TransitionInFlight {
            requested: SectionId::new("C"),
            in_flight: SectionId::new("B"),
        })
    );
    settle(&mut controller, &clock);

    assert_eq!(controller.current_section(), "B");
    assert!(!controller.is_transitioning());
    assert_eq!(history_ids(&controller), ["A", "B"]);
    assert_eq!(controller.history().current().section_id, "B");
    assert_eq!(*entered.borrow(), 0);
    let accepted = events
        .borrow()
        .iter()
        .filter(|event| matches!(event, NavigationEvent::TransitionAccepted { .. }))
        .count();
    assert_eq!(accepted, 1);
}

#[test]
fn unknown_section_leaves_state_and_history_untouched() {
    let (mut controller, _clock) = controller();
    let events = recorded_events(&mut controller);

    assert_eq!(
        controller.try_go_to("ghost"),
        Err(NavigationRejection::UnknownSection("ghost".to_string()))
    );
    controller.go_to("ghost");

    assert!(!controller.is_transitioning());
    assert_eq!(controller.current_section(), "A");
    assert_eq!(controller.history().len(), 1);
    assert!(events.borrow().is_empty());
}

#[test]
fn reports_in_flight_target_when_dropping() {
    let (mut controller, _clock) = controller();
    controller.try_go_to("B").expect("accepted");

    assert_eq!(
        controller.try_go_to("C"),
        Err(NavigationRejection::TransitionInFlight {
            requested: SectionId::new("C"),
            in_flight: SectionId::new("B"),
        })
    );
}

#[test]
fn swap_happens_after_exit_and_hooks_wait_for_settle() {
    let (mut controller, clock) = controller();
    let entered = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&entered);
    controller.on_section_entered("B", move |_| *counter.borrow_mut() += 1);

    controller.go_to("B");
    clock.advance(Duration::from_millis(100));
    controller.poll();
    assert!(controller.is_active("A"));
    assert!(matches!(controller.phase(), TransitionPhase::Exiting { .. }));

    clock.advance(Duration::from_millis(60));
    controller.poll();
    assert!(controller.is_active("B"));
    assert!(!controller.is_active("A"));
    assert_eq!(controller.current_section(), "A");
    assert!(matches!(controller.phase(), TransitionPhase::Entering { .. }));
    assert_eq!(*entered.borrow(), 0);

    clock.advance(ENTER_DURATION);
    controller.poll();
    assert_eq!(*entered.borrow(), 1);
    assert_eq!(controller.current_section(), "B");
}

#[test]
fn late_poll_replays_every_phase_in_order() {
    let (mut controller, clock) = controller();
    let events = recorded_events(&mut controller);

    controller.go_to("C");
    clock.advance(Duration::from_secs(5));
    assert!(controller.poll());
    assert!(!controller.poll());

    assert_eq!(
        *events.borrow(),
        [
            NavigationEvent::TransitionAccepted {
                from: SectionId::new("A"),
                to: SectionId::new("C"),
                origin: TransitionOrigin::Direct,
            },
            NavigationEvent::SectionSwapped {
                section: SectionId::new("C"),
            },
            NavigationEvent::SectionSettled {
                section: SectionId::new("C"),
                origin: TransitionOrigin::Direct,
            },
        ]
    );
}

#[test]
fn request_after_deadline_settles_previous_transition_first() {
    let (mut controller, clock) = controller();
    controller.go_to("B");
    clock.advance(FULL_TRANSITION);

    controller.try_go_to("C").expect("previous transition settled");
    assert_eq!(controller.current_section(), "B");
    assert_eq!(history_ids(&controller), ["A", "B"]);
}

#[test]
fn visual_fades_out_then_in() {
    let (mut controller, clock) = controller();
    assert_eq!(controller.visual().opacity, 1.0);

    controller.go_to("B");
    clock.advance(Duration::from_millis(75));
    let exiting = controller.visual();
    assert_eq!(exiting.section, SectionId::new("A"));
    assert!(exiting.opacity < 1.0 && exiting.offset_y > 0.0);

    clock.advance(Duration::from_millis(75));
    controller.poll();
    let entering = controller.visual();
    assert_eq!(entering.section, SectionId::new("B"));
    assert!(entering.opacity < 0.01);
    assert_eq!(
        controller.time_until_next_deadline(),
        Some(ENTER_DURATION)
    );
}

#[test]
fn history_back_and_forward_replay_entries_without_appending() {
    let (mut controller, clock) = controller();
    controller.go_to("B");
    settle(&mut controller, &clock);
    controller.go_to("C");
    settle(&mut controller, &clock);

    controller.dispatch(NavigationInput::HistoryBack);
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "B");
    assert_eq!(controller.history_location(), "/#B");

    controller.dispatch(NavigationInput::HistoryBack);
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "A");
    assert_eq!(controller.history_location(), "/");

    controller.dispatch(NavigationInput::HistoryForward);
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "B");
    assert_eq!(history_ids(&controller), ["A", "B", "C"]);
}

#[test]
fn history_back_during_transition_keeps_cursor() {
    let (mut controller, clock) = controller();
    controller.go_to("B");
    settle(&mut controller, &clock);

    controller.go_to("C");
    controller.history_back();
    settle(&mut controller, &clock);

    assert_eq!(controller.current_section(), "C");
    assert_eq!(controller.history().current().section_id, "C");
    assert!(controller.history().can_go_back());
}

#[test]
fn keys_and_buttons_dispatch_to_matching_operations() {
    let (mut controller, clock) = controller();

    controller.dispatch(NavigationInput::Key(NavKey::Last));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "E");

    controller.dispatch(NavigationInput::Key(NavKey::First));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "A");

    controller.dispatch(NavigationInput::Button(SectionId::new("D")));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "D");

    controller.dispatch(NavigationInput::HistoryPop(Some(SectionId::new("B"))));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_section(), "B");
    assert_eq!(history_ids(&controller), ["A", "E", "A", "B"]);
}

#[test]
fn deep_link_selects_initial_section() {
    let catalog = SectionCatalog::new([
        "accueil",
        "plan-90j",
        "problemes-solutions",
        "competences-resultats",
        "fit-culturel",
    ])
    .expect("catalog");
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());

    let linked = NavigationController::with_deep_link(catalog.clone(), clock.clone(), "#plan-90j");
    assert_eq!(linked.current_section(), "plan-90j");
    assert_eq!(history_ids(&linked), ["plan-90j"]);
    assert_eq!(linked.resolve_initial_section("nonexistent"), "accueil");

    let fallback = NavigationController::with_deep_link(catalog, clock, "nonexistent");
    assert_eq!(fallback.current_section(), "accueil");
}

#[test]
fn hooks_for_unknown_sections_are_rejected() {
    let (mut controller, _clock) = controller();
    assert!(!controller.on_section_entered("ghost", |_| {}));
}

#[test]
fn channel_observer_forwards_events_and_survives_full_queue() {
    let (mut controller, clock) = controller();
    let (tx, rx) = bounded(2);
    controller.subscribe(ChannelObserver::new(tx));

    controller.go_to("B");
    settle(&mut controller, &clock);

    let received: Vec<NavigationEvent> = rx.try_iter().collect();
    assert_eq!(received.len(), 2);
    assert!(matches!(
        received[0],
        NavigationEvent::TransitionAccepted { .. }
    ));
    assert_eq!(controller.current_section(), "B");
}
