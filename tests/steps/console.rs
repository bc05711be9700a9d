//! Step definitions for the mock API, console startup and typed commands

use crate::common::world::LedgerWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use ledgerline::PageEvent;
use tracing::debug;

fn docstring(step: &Step) -> &str {
    step.docstring
        .as_deref()
        .map(str::trim)
        .expect("step needs a docstring")
}

#[given("the ledger API is running")]
async fn given_api_running(world: &mut LedgerWorld) {
    world.setup_mock_server().await;
}

#[given(expr = "the ledger API answers {word} {string} with status {int} and body:")]
async fn given_api_answers_with_body(
    world: &mut LedgerWorld,
    verb: String,
    route: String,
    status: u16,
    step: &Step,
) {
    let body = docstring(step).to_string();
    world.mock_response(&verb, &route, status, Some(&body)).await;
}

#[given(expr = "the ledger API answers {word} {string} with status {int}")]
async fn given_api_answers(world: &mut LedgerWorld, verb: String, route: String, status: u16) {
    world.mock_response(&verb, &route, status, None).await;
}

#[given("the console has started")]
async fn given_console_started(world: &mut LedgerWorld) {
    world.start_console().await.expect("console should start");
}

#[when("the console starts")]
async fn when_console_starts(world: &mut LedgerWorld) {
    world.start_console().await.expect("console should start");
}

#[when("I reload the console")]
async fn when_reload(world: &mut LedgerWorld) {
    debug!("reloading with stored theme {:?}", world.theme_store.value());
    world.start_console().await.expect("console should restart");
}

#[when(expr = "I type {string}")]
async fn when_type(world: &mut LedgerWorld, line: String) {
    world
        .send(PageEvent::from_line(&line))
        .await
        .expect("event should be processed");
}

#[then(expr = "the screen should contain {string}")]
async fn then_screen_contains(world: &mut LedgerWorld, text: String) {
    let screen = world.screen();
    assert!(screen.contains(&text), "screen does not contain {text:?}:\n{screen}");
}

#[then("the console should have quit")]
async fn then_quit(world: &mut LedgerWorld) {
    assert!(world.controller().should_quit());
}

#[then(expr = "the ledger API should have received {word} {string} with body:")]
async fn then_api_received_body(world: &mut LedgerWorld, verb: String, route: String, step: &Step) {
    let expected: serde_json::Value =
        serde_json::from_str(docstring(step)).expect("docstring should be JSON");

    let requests = world.received_requests().await;
    let request = requests
        .iter()
        .rev()
        .find(|r| r.method.as_str() == verb && r.url.path() == route)
        .unwrap_or_else(|| panic!("no {verb} {route} among {} request(s)", requests.len()));

    let body: serde_json::Value = request.body_json().expect("request body should be JSON");
    assert_eq!(body, expected);
}

#[then(expr = "the ledger API should have received {int} {word} {string} request(s)")]
async fn then_api_received_count(world: &mut LedgerWorld, count: usize, verb: String, route: String) {
    let seen = world
        .received_requests()
        .await
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .count();
    assert_eq!(seen, count, "{verb} {route} request count");
}

#[then(expr = "the ledger API should not have received any request under {string}")]
async fn then_api_not_received(world: &mut LedgerWorld, prefix: String) {
    let requests = world.received_requests().await;
    let hits: Vec<_> = requests
        .iter()
        .map(|r| r.url.path().to_string())
        .filter(|p| p.starts_with(&prefix))
        .collect();
    assert!(hits.is_empty(), "unexpected requests: {hits:?}");
}
