//! Step definitions for the theme preference

use crate::common::world::LedgerWorld;
use cucumber::{given, then};
use ledgerline::repl::services::MemoryThemeStore;

#[given(expr = "a stored theme preference of {string}")]
async fn given_stored_theme(world: &mut LedgerWorld, theme: String) {
    world.theme_store = MemoryThemeStore::with_value(&theme);
}

#[then(expr = "the theme should be {string}")]
async fn then_theme(world: &mut LedgerWorld, theme: String) {
    let controller = world.controller();
    assert_eq!(controller.theme().state().as_str(), theme);
    assert_eq!(controller.document().is_dark(), theme == "dark");
}

#[then(expr = "the stored theme preference should be {string}")]
async fn then_stored_theme(world: &mut LedgerWorld, theme: String) {
    assert_eq!(world.theme_store.value(), Some(theme));
}
