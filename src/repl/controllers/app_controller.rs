//! # Application Controller
//!
//! The controller owns the page and everything that mutates it. It pulls
//! events from an [`EventSource`], dispatches them through the document's
//! listener table and redraws after each change.
//!
//! Network calls never block the loop. A binding's request runs on its own
//! tokio task that only holds the transport and a sender; the finished call
//! comes back over a channel and is applied here, so the document is never
//! shared across tasks.
//!
//! ```text
//!  event ──▶ listeners ──▶ router / theme / registry.begin ──▶ spawn(send)
//!                                                                  │
//!  redraw ◀── registry.settle ◀──────── settlement channel ◀───────┘
//! ```

use crate::repl::{
    events::{EventKind, EventSource, Listener, PageEvent, TerminalEventSource},
    layout,
    models::Document,
    services::{HttpTransport, IniThemeStore, RequestOutcome, ThemeStore, Transport},
    view_models::{BinderRegistry, PendingCall, ThemeManager, ViewRouter, HOME_VIEW},
    views::{TerminalRenderer, ViewRenderer},
};
use crate::{cmd_args::CommandLineArgs, config};
use anyhow::Result;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How long one loop iteration waits for input before checking settlements
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A finished call waiting to be drawn
type Settlement = (PendingCall, RequestOutcome);

/// Controller wired to stdin, HTTP and stdout
pub type ConsoleController = AppController<TerminalEventSource, HttpTransport, TerminalRenderer<Stdout>>;

/// The main application controller
pub struct AppController<ES: EventSource, T: Transport, V: ViewRenderer> {
    document: Document,
    router: ViewRouter,
    registry: BinderRegistry,
    theme: ThemeManager,
    transport: Arc<T>,
    event_source: ES,
    renderer: V,
    settlement_tx: UnboundedSender<Settlement>,
    settlement_rx: UnboundedReceiver<Settlement>,
    in_flight: usize,
    should_quit: bool,
}

impl ConsoleController {
    /// Build the production controller from command line arguments
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let mut profile = config::load_profile(cmd_args.profile(), &profile_path)?;
        if let Some(server) = cmd_args.server() {
            profile = profile.with_server(server);
        }
        let transport = HttpTransport::new(&profile)?;

        let state_path = config::expand_path(&config::get_state_path());
        tracing::info!(
            "ledgerline using profile '{}' against {} (state in {})",
            cmd_args.profile(),
            transport.server(),
            state_path.display()
        );

        Ok(Self::with_io(
            TerminalEventSource::new(),
            transport,
            Box::new(IniThemeStore::new(state_path)),
            TerminalRenderer::stdout(),
        ))
    }
}

impl<ES: EventSource, T: Transport, V: ViewRenderer> AppController<ES, T, V> {
    /// Create a controller with injected input, transport, storage and output
    pub fn with_io(
        event_source: ES,
        transport: T,
        theme_store: Box<dyn ThemeStore>,
        renderer: V,
    ) -> Self {
        let mut document = layout::build_page();
        let router = ViewRouter::from_document(&document, HOME_VIEW);
        let theme = ThemeManager::new(theme_store);
        let mut registry = BinderRegistry::new();
        layout::wire(
            &mut document,
            &router,
            &mut registry,
            &theme,
            layout::standard_bindings(),
        );

        let (settlement_tx, settlement_rx) = mpsc::unbounded_channel();

        Self {
            document,
            router,
            registry,
            theme,
            transport: Arc::new(transport),
            event_source,
            renderer,
            settlement_tx,
            settlement_rx,
            in_flight: 0,
            should_quit: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn registry(&self) -> &BinderRegistry {
        &self.registry
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    /// Number of requests still waiting for a response
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Page-ready work: apply the stored theme, show home, fetch status once
    pub fn bootstrap(&mut self) -> Result<()> {
        self.theme.bootstrap(&mut self.document);
        self.router.go_home(&mut self.document);

        match self.registry.find(layout::STATUS_BUTTON) {
            Some(id) => self.dispatch(Listener::Bind(id)),
            None => tracing::debug!("no status binding on page, skipping startup refresh"),
        }

        self.renderer.render_page(&self.document)
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.bootstrap()?;

        while !self.should_quit {
            if self.event_source.poll(POLL_INTERVAL)? {
                let event = self.event_source.read()?;
                self.process_event(event)?;
            }

            self.drain_settlements()?;

            if self.event_source.is_exhausted() && !self.should_quit {
                if self.in_flight == 0 {
                    break;
                }
                // Nothing more will arrive; wait for the next response instead of spinning
                if let Some(settlement) = self.settlement_rx.recv().await {
                    self.apply_settlement(settlement)?;
                }
            }
        }

        tracing::debug!("event loop finished with {} call(s) in flight", self.in_flight);
        Ok(())
    }

    /// Handle one event without running the loop
    pub fn process_event(&mut self, event: PageEvent) -> Result<()> {
        tracing::debug!("event: {:?}", event);

        match event {
            PageEvent::Click { id } => {
                if !self.fire(&id, EventKind::Click) {
                    return self.renderer.render_message(&format!("nothing to click: {id}"));
                }
            }
            PageEvent::Submit { form } => {
                if !self.fire(&form, EventKind::Submit) {
                    return self.renderer.render_message(&format!("no form named {form}"));
                }
            }
            PageEvent::Input { form, field, value } => {
                if !self.document.set_field_value(&form, &field, value) {
                    return self
                        .renderer
                        .render_message(&format!("no field {field} in form {form}"));
                }
            }
            PageEvent::Help => return self.renderer.render_help(),
            PageEvent::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            PageEvent::Unrecognized(line) => {
                return self
                    .renderer
                    .render_message(&format!("unrecognized command: {line} (try help)"));
            }
        }

        self.renderer.render_page(&self.document)
    }

    /// Wait until every spawned call has settled
    pub async fn wait_idle(&mut self) -> Result<()> {
        while self.in_flight > 0 {
            match self.settlement_rx.recv().await {
                Some(settlement) => self.apply_settlement(settlement)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Run every listener of `kind` on element `id`; false when there are none
    fn fire(&mut self, id: &str, kind: EventKind) -> bool {
        let listeners = self.document.listeners(id, kind).to_vec();
        if listeners.is_empty() {
            tracing::debug!("no {:?} listener on '{}'", kind, id);
            return false;
        }
        for listener in listeners {
            self.dispatch(listener);
        }
        true
    }

    fn dispatch(&mut self, listener: Listener) {
        match listener {
            Listener::Navigate(view_id) => self.router.navigate(&mut self.document, &view_id),
            Listener::Back => self.router.go_home(&mut self.document),
            Listener::ToggleTheme => self.theme.toggle(&mut self.document),
            Listener::Bind(id) => {
                if let Some(call) = self.registry.begin(&mut self.document, id) {
                    self.spawn_call(call);
                }
            }
        }
    }

    fn spawn_call(&mut self, call: PendingCall) {
        let transport = Arc::clone(&self.transport);
        let settlement_tx = self.settlement_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = transport.send(&call.request).await;
            if settlement_tx.send((call, outcome)).is_err() {
                tracing::debug!("controller gone, dropping settlement");
            }
        });
    }

    fn drain_settlements(&mut self) -> Result<()> {
        while let Ok(settlement) = self.settlement_rx.try_recv() {
            self.apply_settlement(settlement)?;
        }
        Ok(())
    }

    fn apply_settlement(&mut self, (call, outcome): Settlement) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.registry.settle(&mut self.document, call, &outcome);
        self.renderer.render_page(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::events::TestEventSource;
    use crate::repl::models::ThemeState;
    use crate::repl::services::{ApiRequest, MemoryThemeStore};
    use serde_json::json;
    use std::sync::Mutex;

    /// Transport answering by path, recording every request
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Vec<(String, RequestOutcome)>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn reply(mut self, path: &str, outcome: RequestOutcome) -> Self {
            self.replies.push((path.to_string(), outcome));
            self
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: &ApiRequest) -> RequestOutcome {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .iter()
                .find(|(path, _)| *path == request.path)
                .map(|(_, outcome)| outcome.clone())
                .unwrap_or_else(|| RequestOutcome::Failure("Not Found".to_string()))
        }
    }

    type TestController = AppController<TestEventSource, ScriptedTransport, TerminalRenderer<Vec<u8>>>;

    fn controller(lines: &[&str], transport: ScriptedTransport, store: MemoryThemeStore) -> TestController {
        AppController::with_io(
            TestEventSource::with_lines(lines.iter().copied()),
            transport,
            Box::new(store),
            TerminalRenderer::new(Vec::new(), false),
        )
    }

    fn screen(controller: &TestController) -> String {
        String::from_utf8_lossy(controller.renderer().output()).into_owned()
    }

    #[tokio::test]
    async fn bootstrap_should_show_home_and_fetch_status() {
        let transport = ScriptedTransport::default().reply(
            "/raft/status",
            RequestOutcome::Success(json!({"state": "Leader"})),
        );
        let mut app = controller(&[], transport, MemoryThemeStore::new());

        app.run().await.unwrap();

        assert_eq!(app.document().visible_views(), vec![HOME_VIEW]);
        assert_eq!(
            app.document().target_text(layout::STATUS_TARGET),
            "{\n  \"state\": \"Leader\"\n}"
        );
        assert_eq!(app.in_flight(), 0);
    }

    #[tokio::test]
    async fn scripted_session_should_transfer_and_render_receipt() {
        let transport = ScriptedTransport::default().reply(
            "/transactions/transfer",
            RequestOutcome::Success(json!({"tx_id": "abc123", "status": "confirmed"})),
        );
        let mut app = controller(
            &[
                "click nav-user",
                "set user-transfer-form sender A",
                "set user-transfer-form receiver B",
                "set user-transfer-form amount 5",
                "set user-transfer-form nonce 1",
                "set user-transfer-form key k",
                "submit user-transfer-form",
            ],
            transport,
            MemoryThemeStore::new(),
        );

        app.run().await.unwrap();

        assert_eq!(app.router().current(), Some("view-user"));
        assert_eq!(
            app.document().target_text("user-transfer-result"),
            "tx_id: abc123\nstatus: confirmed"
        );
        let seen = app.transport.seen.lock().unwrap().clone();
        assert!(seen.contains(&ApiRequest::post(
            "/transactions/transfer",
            Some(json!({"sender": "A", "receiver": "B", "amount": 5, "nonce": 1, "private_key": "k"}))
        )));
        assert!(screen(&app).contains("tx_id: abc123"));
    }

    #[tokio::test]
    async fn back_trigger_should_return_home() {
        let mut app = controller(
            &["click nav-admin", "click admin-back"],
            ScriptedTransport::default(),
            MemoryThemeStore::new(),
        );

        app.run().await.unwrap();

        assert_eq!(app.router().current(), Some(HOME_VIEW));
        assert_eq!(app.document().visible_views(), vec![HOME_VIEW]);
    }

    #[tokio::test]
    async fn theme_toggle_should_persist_across_controllers() {
        let store = MemoryThemeStore::new();
        let mut app = controller(&["click theme-toggle"], ScriptedTransport::default(), store.clone());
        app.run().await.unwrap();
        assert!(app.document().is_dark());

        let mut reloaded = controller(&[], ScriptedTransport::default(), store);
        reloaded.run().await.unwrap();
        assert_eq!(reloaded.theme().state(), ThemeState::Dark);
    }

    #[tokio::test]
    async fn unknown_commands_should_be_reported_not_fatal() {
        let mut app = controller(
            &["dance", "click ghost", "set user-query-form colour red", "quit", "click nav-user"],
            ScriptedTransport::default(),
            MemoryThemeStore::new(),
        );

        app.run().await.unwrap();

        assert!(app.should_quit());
        // Events after quit are never read
        assert_eq!(app.router().current(), Some(HOME_VIEW));
        let screen = screen(&app);
        assert!(screen.contains("unrecognized command: dance"));
        assert!(screen.contains("nothing to click: ghost"));
        assert!(screen.contains("no field colour in form user-query-form"));
    }

    #[tokio::test]
    async fn process_event_should_leave_calls_in_flight_until_waited() {
        let transport = ScriptedTransport::default().reply(
            "/accounts/register",
            RequestOutcome::Success(json!({"address": "X1"})),
        );
        let mut app = controller(&[], transport, MemoryThemeStore::new());
        app.bootstrap().unwrap();
        app.wait_idle().await.unwrap();

        app.process_event(PageEvent::click("nav-system")).unwrap();
        app.process_event(PageEvent::click("system-register-btn")).unwrap();
        assert_eq!(app.in_flight(), 1);
        assert!(app.document().button("system-register-btn").unwrap().disabled);
        assert_eq!(app.document().target_text("system-register-result"), "registering");

        app.wait_idle().await.unwrap();
        assert!(!app.document().button("system-register-btn").unwrap().disabled);
        assert_eq!(app.document().target_text("system-register-result"), "address: X1");
    }
}
