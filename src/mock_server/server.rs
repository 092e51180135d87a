//! Mock Pipedrive API server.
//!
//! Provides an axum-based HTTP server that simulates the upstream API.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Pipedrive API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation, pagination flags included.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `PipedriveClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for deal in scenario.deals {
            state.deals.insert(deal.id, deal);
        }

        for person in scenario.persons {
            state.persons.insert(person.id, person);
        }

        for org in scenario.organizations {
            state.organizations.insert(org.id, org);
        }

        for activity in scenario.activities {
            state.activities.insert(activity.id, activity);
        }

        state.pipelines = scenario.pipelines;
        state.stages = scenario.stages;

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Deal routes
            .route(
                "/deals",
                get(handlers::list_deals).post(handlers::create_deal),
            )
            .route("/deals/search", get(handlers::search_deals))
            .route("/deals/timeline", get(handlers::deals_timeline))
            .route(
                "/deals/:id",
                get(handlers::get_deal).put(handlers::update_deal),
            )
            .route("/deals/:id/activities", get(handlers::deal_activities))
            .route("/deals/:id/persons", get(handlers::deal_persons))
            // Person routes
            .route(
                "/persons",
                get(handlers::list_persons).post(handlers::create_person),
            )
            .route("/persons/search", get(handlers::search_persons))
            .route("/persons/:id", get(handlers::get_person))
            .route("/persons/:id/deals", get(handlers::person_deals))
            .route(
                "/persons/:id/activities",
                get(handlers::person_activities),
            )
            // Organization routes
            .route("/organizations", get(handlers::list_organizations))
            .route("/organizations/:id", get(handlers::get_organization))
            .route(
                "/organizations/:id/deals",
                get(handlers::organization_deals),
            )
            .route(
                "/organizations/:id/persons",
                get(handlers::organization_persons),
            )
            // Activity routes
            .route("/activities", get(handlers::list_activities))
            .route("/activities/:id", get(handlers::get_activity))
            // Account configuration routes
            .route("/pipelines", get(handlers::list_pipelines))
            .route("/pipelines/:id/stages", get(handlers::pipeline_stages))
            .route("/stages", get(handlers::list_stages))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
