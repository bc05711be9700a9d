//! Step definitions for view navigation

use crate::common::world::LedgerWorld;
use cucumber::then;

#[then(expr = "the visible view should be {string}")]
async fn then_visible_view(world: &mut LedgerWorld, view: String) {
    let controller = world.controller();
    assert_eq!(controller.document().visible_views(), vec![view.as_str()]);
    assert_eq!(controller.router().current(), Some(view.as_str()));
}

#[then("exactly one view should be visible")]
async fn then_one_view(world: &mut LedgerWorld) {
    assert_eq!(world.controller().document().visible_views().len(), 1);
}

#[then(expr = "the screen should show the {string} view")]
async fn then_screen_shows_view(world: &mut LedgerWorld, view: String) {
    let screen = world.screen();
    assert!(
        screen.contains(&format!("({view})")),
        "view {view} was never drawn:\n{screen}"
    );
}
