use anyhow::Result;
use cucumber::World;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// Import real application components
use ledgerline::config::ConnectionProfile;
use ledgerline::repl::{
    events::{PageEvent, TestEventSource},
    services::{HttpTransport, MemoryThemeStore},
    views::TerminalRenderer,
    AppController,
};

/// Controller under test: scripted input, real HTTP, captured output
pub type WorldController = AppController<TestEventSource, HttpTransport, TerminalRenderer<Vec<u8>>>;

/// Mocks registered by a scenario win over the defaults
const SCENARIO_PRIORITY: u8 = 1;

/// Application state for one scenario
#[derive(World)]
#[world(init = Self::new)]
pub struct LedgerWorld {
    /// Mock ledger API
    pub mock_server: Option<MockServer>,

    /// Theme storage that outlives controller restarts
    pub theme_store: MemoryThemeStore,

    /// Real controller, created when the console starts
    pub controller: Option<WorldController>,
}

impl std::fmt::Debug for LedgerWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerWorld")
            .field("mock_server", &self.mock_server.as_ref().map(MockServer::uri))
            .field("theme", &self.theme_store.value())
            .field("started", &self.controller.is_some())
            .finish()
    }
}

impl LedgerWorld {
    pub fn new() -> Self {
        Self {
            mock_server: None,
            theme_store: MemoryThemeStore::new(),
            controller: None,
        }
    }

    /// Start the mock API with a healthy status endpoint
    pub async fn setup_mock_server(&mut self) {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raft/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"state": "Leader", "term": 1})),
            )
            .mount(&server)
            .await;

        self.mock_server = Some(server);
    }

    pub fn mock_server(&self) -> &MockServer {
        self.mock_server
            .as_ref()
            .expect("mock ledger API is not running")
    }

    /// Answer `verb path` with `status` and an optional JSON body
    pub async fn mock_response(&mut self, verb: &str, route: &str, status: u16, body: Option<&str>) {
        if self.mock_server.is_none() {
            self.setup_mock_server().await;
        }

        let mut template = ResponseTemplate::new(status);
        if let Some(body) = body {
            template = template.set_body_raw(body.as_bytes().to_vec(), "application/json");
        }

        Mock::given(method(verb))
            .and(path(route))
            .respond_with(template)
            .with_priority(SCENARIO_PRIORITY)
            .mount(self.mock_server())
            .await;
    }

    /// Build a fresh controller against the mock API and run its bootstrap
    pub async fn start_console(&mut self) -> Result<()> {
        if self.mock_server.is_none() {
            self.setup_mock_server().await;
        }

        let transport = HttpTransport::new(&ConnectionProfile::new(self.mock_server().uri()))?;
        let mut controller = AppController::with_io(
            TestEventSource::new(),
            transport,
            Box::new(self.theme_store.clone()),
            TerminalRenderer::new(Vec::new(), false),
        );
        controller.bootstrap()?;
        controller.wait_idle().await?;

        self.controller = Some(controller);
        Ok(())
    }

    pub fn controller(&self) -> &WorldController {
        self.controller.as_ref().expect("console has not started")
    }

    /// Deliver one event and wait for any request it started
    pub async fn send(&mut self, event: PageEvent) -> Result<()> {
        let controller = self.controller.as_mut().expect("console has not started");
        controller.process_event(event)?;
        controller.wait_idle().await
    }

    /// Everything drawn so far
    pub fn screen(&self) -> String {
        String::from_utf8_lossy(self.controller().renderer().output()).into_owned()
    }

    /// Requests the mock API has seen, oldest first
    pub async fn received_requests(&self) -> Vec<Request> {
        self.mock_server()
            .received_requests()
            .await
            .unwrap_or_default()
    }
}

impl Default for LedgerWorld {
    fn default() -> Self {
        Self::new()
    }
}
