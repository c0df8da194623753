use std::{cell::RefCell, rc::Rc, sync::Arc};

use navigation::{
    ManualClock, NavKey, NavigationController, NavigationEvent, NavigationInput, SectionCatalog,
    ENTER_DURATION, EXIT_DURATION,
};
use shared::{
    deck::Deck,
    domain::{sections, SectionId},
};

fn portfolio_controller(link: &str) -> (NavigationController, ManualClock) {
    let deck = Deck::default();
    let catalog = SectionCatalog::new(deck.section_ids()).expect("deck catalog");
    let clock = ManualClock::new();
    let controller = NavigationController::with_deep_link(catalog, Arc::new(clock.clone()), link);
    (controller, clock)
}

#[test]
fn keyboard_tour_of_portfolio_records_locations() {
    let (mut controller, clock) = portfolio_controller("");
    let settled = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&settled);
    controller.subscribe(move |event: &NavigationEvent| {
        if let NavigationEvent::SectionSettled { section, .. } = event {
            sink.borrow_mut().push(section.clone());
        }
    });

    for _ in 0..sections::ORDER.len() {
        controller.dispatch(NavigationInput::Key(NavKey::Next));
        clock.advance(EXIT_DURATION + ENTER_DURATION);
        controller.poll();
    }

    let locations: Vec<String> = controller
        .history()
        .entries()
        .iter()
        .map(|entry| controller.catalog().location_of(&entry.section_id))
        .collect();
    assert_eq!(
        locations,
        [
            "/",
            "/#plan-90j",
            "/#problemes-solutions",
            "/#competences-resultats",
            "/#fit-culturel",
            "/",
        ]
    );
    assert_eq!(settled.borrow().len(), sections::ORDER.len());
}

#[test]
fn deep_link_into_plan_then_back_to_home_via_history() {
    let (mut controller, clock) = portfolio_controller("#plan-90j");
    assert_eq!(controller.current_section(), sections::PLAN_90_DAYS);

    controller.dispatch(NavigationInput::Link(SectionId::new(sections::CULTURAL_FIT)));
    clock.advance(EXIT_DURATION + ENTER_DURATION);
    controller.poll();

    controller.dispatch(NavigationInput::HistoryBack);
    clock.advance(EXIT_DURATION + ENTER_DURATION);
    controller.poll();

    assert_eq!(controller.current_section(), sections::PLAN_90_DAYS);
    assert_eq!(controller.history().len(), 2);
    assert!(!controller.history().can_go_back());
}
