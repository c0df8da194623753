//! Input orchestration from egui key/pointer state to navigation requests.

use egui::{Key, PointerButton};
use navigation::{NavKey, NavigationController, NavigationInput};
use shared::domain::SectionId;

pub fn nav_key_for(key: Key) -> Option<NavKey> {
    match key {
        Key::ArrowRight | Key::ArrowDown => Some(NavKey::Next),
        Key::ArrowLeft | Key::ArrowUp => Some(NavKey::Previous),
        Key::Home => Some(NavKey::First),
        Key::End => Some(NavKey::Last),
        _ => None,
    }
}

const NAV_KEYS: [Key; 6] = [
    Key::ArrowRight,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowUp,
    Key::Home,
    Key::End,
];

/// Navigation requests expressed by this frame's input. Alt+Left/Right and
/// the mouse back/forward buttons walk session history; plain arrows,
/// Home and End move through the catalog.
pub fn inputs_from_frame(input: &egui::InputState) -> Vec<NavigationInput> {
    let mut inputs = Vec::new();

    if input.modifiers.alt {
        if input.key_pressed(Key::ArrowLeft) {
            inputs.push(NavigationInput::HistoryBack);
        }
        if input.key_pressed(Key::ArrowRight) {
            inputs.push(NavigationInput::HistoryForward);
        }
    } else if !input.modifiers.command {
        inputs.extend(
            NAV_KEYS
                .into_iter()
                .filter(|key| input.key_pressed(*key))
                .filter_map(nav_key_for)
                .map(NavigationInput::Key),
        );
    }

    if input.pointer.button_pressed(PointerButton::Extra1) {
        inputs.push(NavigationInput::HistoryBack);
    }
    if input.pointer.button_pressed(PointerButton::Extra2) {
        inputs.push(NavigationInput::HistoryForward);
    }

    inputs
}

pub fn dispatch_navigation_input(navigation: &mut NavigationController, input: NavigationInput) {
    let input_name = input.kind();
    let was_transitioning = navigation.is_transitioning();
    navigation.dispatch(input);
    if !was_transitioning && navigation.is_transitioning() {
        tracing::debug!(input = input_name, "ui input started a transition");
    }
}

/// Requests `target` for a clicked button. Returns whether the request was
/// accepted, so click feedback is only shown for navigation that happens.
pub fn press_button(navigation: &mut NavigationController, target: &SectionId) -> bool {
    match navigation.try_go_to(target.as_str()) {
        Ok(()) => true,
        Err(rejection) => {
            tracing::debug!(%rejection, "button press dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use navigation::{ManualClock, SectionCatalog, ENTER_DURATION, EXIT_DURATION};

    use super::*;

    fn controller() -> (NavigationController, ManualClock) {
        let clock = ManualClock::new();
        let catalog = SectionCatalog::new(["accueil", "plan-90j", "fit-culturel"]).expect("catalog");
        (
            NavigationController::new(catalog, Arc::new(clock.clone())),
            clock,
        )
    }

    #[test]
    fn button_press_reports_whether_navigation_was_accepted() {
        let (mut navigation, clock) = controller();
        let plan = SectionId::new("plan-90j");
        let fit = SectionId::new("fit-culturel");

        assert!(press_button(&mut navigation, &plan));
        assert!(!press_button(&mut navigation, &fit));
        assert!(!press_button(&mut navigation, &SectionId::new("ghost")));

        clock.advance(EXIT_DURATION + ENTER_DURATION);
        navigation.poll();
        assert_eq!(navigation.current_section(), "plan-90j");
        assert!(press_button(&mut navigation, &fit));
    }

    #[test]
    fn maps_arrow_home_and_end_keys() {
        assert_eq!(nav_key_for(Key::ArrowRight), Some(NavKey::Next));
        assert_eq!(nav_key_for(Key::ArrowDown), Some(NavKey::Next));
        assert_eq!(nav_key_for(Key::ArrowLeft), Some(NavKey::Previous));
        assert_eq!(nav_key_for(Key::ArrowUp), Some(NavKey::Previous));
        assert_eq!(nav_key_for(Key::Home), Some(NavKey::First));
        assert_eq!(nav_key_for(Key::End), Some(NavKey::Last));
        assert_eq!(nav_key_for(Key::Enter), None);
    }

    #[test]
    fn egui_key_mapping_agrees_with_key_names() {
        for (key, name) in [
            (Key::ArrowRight, "ArrowRight"),
            (Key::ArrowUp, "ArrowUp"),
            (Key::Home, "Home"),
            (Key::End, "End"),
        ] {
            assert_eq!(nav_key_for(key), NavKey::from_key_name(name));
        }
    }
}
