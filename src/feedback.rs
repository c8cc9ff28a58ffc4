//! Press and hover feedback for buttons and cards.
//!
//! Both are pure mappings from a pointer transition to an inline transform,
//! so the visual state only ever reflects whether the pointer is currently
//! down (buttons) or over (cards). Repeating a release or leave is harmless.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use std::rc::Rc;

use crate::consts::{BUTTON_SELECTOR, CARD_SELECTOR, LIFTED_TRANSFORM, NATURAL_TRANSFORM, PRESSED_TRANSFORM};
use crate::env::{Dom, PageEnv, PointerEvent};

/// Events a button listens to.
pub const BUTTON_EVENTS: [PointerEvent; 3] = [PointerEvent::Down, PointerEvent::Up, PointerEvent::Leave];

/// Events a card listens to.
pub const CARD_EVENTS: [PointerEvent; 2] = [PointerEvent::Enter, PointerEvent::Leave];

/// Transform a button takes on `event`, or `None` if it does not react.
#[must_use]
pub fn button_transform(event: PointerEvent) -> Option<&'static str> {
    match event {
        PointerEvent::Down => Some(PRESSED_TRANSFORM),
        PointerEvent::Up | PointerEvent::Leave => Some(NATURAL_TRANSFORM),
        PointerEvent::Enter => None,
    }
}

/// Transform a card takes on `event`, or `None` if it does not react.
#[must_use]
pub fn card_transform(event: PointerEvent) -> Option<&'static str> {
    match event {
        PointerEvent::Enter => Some(LIFTED_TRANSFORM),
        PointerEvent::Leave => Some(NATURAL_TRANSFORM),
        PointerEvent::Down | PointerEvent::Up => None,
    }
}

/// Attach press feedback to every `.btn`. Returns the number wired.
pub fn wire_buttons<D: Dom>(env: &PageEnv<D>) -> usize {
    wire(env, BUTTON_SELECTOR, &BUTTON_EVENTS, button_transform)
}

/// Attach hover lift to every feature/dashboard card. Returns the number wired.
pub fn wire_cards<D: Dom>(env: &PageEnv<D>) -> usize {
    wire(env, CARD_SELECTOR, &CARD_EVENTS, card_transform)
}

fn wire<D: Dom>(
    env: &PageEnv<D>,
    selector: &str,
    events: &[PointerEvent],
    transform: fn(PointerEvent) -> Option<&'static str>,
) -> usize {
    let elements = env.dom.query_all(selector);
    for element in &elements {
        for &event in events {
            let Some(value) = transform(event) else {
                continue;
            };
            let dom = Rc::clone(&env.dom);
            let target = element.clone();
            env.dom.on_pointer(element, event, Box::new(move || dom.set_style(&target, "transform", value)));
        }
    }
    elements.len()
}
