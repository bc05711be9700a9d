//! Step definitions for controls, forms and rendered results

use crate::common::world::LedgerWorld;
use cucumber::gherkin::Step;
use cucumber::{then, when};
use ledgerline::PageEvent;

#[when(expr = "I click {string}")]
async fn when_click(world: &mut LedgerWorld, id: String) {
    world
        .send(PageEvent::click(id))
        .await
        .expect("click should be processed");
}

#[when(expr = "I set {string} of {string} to {string}")]
async fn when_set_field(world: &mut LedgerWorld, field: String, form: String, value: String) {
    world
        .send(PageEvent::input(form, field, value))
        .await
        .expect("input should be processed");
}

#[when(expr = "I submit {string}")]
async fn when_submit(world: &mut LedgerWorld, form: String) {
    world
        .send(PageEvent::submit(form))
        .await
        .expect("submit should be processed");
}

#[then(expr = "{string} should show:")]
async fn then_target_shows_block(world: &mut LedgerWorld, target: String, step: &Step) {
    let expected = step.docstring.as_deref().map(str::trim).unwrap_or_default();
    assert_eq!(world.controller().document().target_text(&target), expected);
}

#[then(expr = "{string} should show {string}")]
async fn then_target_shows(world: &mut LedgerWorld, target: String, expected: String) {
    assert_eq!(world.controller().document().target_text(&target), expected);
}

#[then(expr = "{string} should be empty")]
async fn then_target_empty(world: &mut LedgerWorld, target: String) {
    assert_eq!(world.controller().document().target_text(&target), "");
}

#[then(expr = "{string} should contain {string}")]
async fn then_target_contains(world: &mut LedgerWorld, target: String, text: String) {
    let shown = world.controller().document().target_text(&target);
    assert!(shown.contains(&text), "{target} shows {shown:?}");
}

#[then(expr = "the button {string} should be enabled with label {string}")]
async fn then_button_enabled(world: &mut LedgerWorld, id: String, label: String) {
    let button = world
        .controller()
        .document()
        .button(&id)
        .unwrap_or_else(|| panic!("no button {id}"))
        .clone();
    assert!(!button.disabled, "{id} is still disabled");
    assert_eq!(button.label, label);
}
