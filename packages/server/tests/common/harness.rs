//! Test harness for integration testing.
//!
//! Each test gets a fresh roster and session table. The credential store is
//! hashed once and shared, since argon2 dominates setup time.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use clubs_core::common::{default_credential_store, default_roster_store};
use clubs_core::domains::activities::{MemoryRosterStore, RosterEngine};
use clubs_core::domains::auth::{MemoryCredentialStore, SessionAuthenticator};
use clubs_core::server::{build_app, AxumAppState};
use test_context::AsyncTestContext;
use tokio::sync::OnceCell;

use super::ApiClient;

pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default accounts, hashed once for the whole test run.
static SHARED_CREDENTIALS: OnceCell<Arc<MemoryCredentialStore>> = OnceCell::const_new();

async fn shared_credentials() -> Arc<MemoryCredentialStore> {
    SHARED_CREDENTIALS
        .get_or_init(|| async {
            // Run tests with: RUST_LOG=debug cargo test -- --nocapture
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();

            Arc::new(default_credential_store().expect("Failed to hash default accounts"))
        })
        .await
        .clone()
}

/// Test harness wiring the full router over in-memory stores.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.client();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub roster: Arc<RosterEngine>,
    pub auth: Arc<SessionAuthenticator>,
    app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Stores are dropped with the harness
    }
}

impl TestHarness {
    /// Harness over the default school catalog
    pub async fn new() -> Result<Self> {
        Self::with_store(default_roster_store()).await
    }

    /// Harness over a custom catalog
    pub async fn with_store(store: MemoryRosterStore) -> Result<Self> {
        let roster = Arc::new(
            RosterEngine::load(Arc::new(store))
                .await
                .context("Failed to load test catalog")?,
        );
        let auth = Arc::new(SessionAuthenticator::new(
            shared_credentials().await,
            SESSION_TTL,
        ));
        let app = build_app(
            AxumAppState {
                roster: roster.clone(),
                auth: auth.clone(),
            },
            &[],
        );

        Ok(Self { roster, auth, app })
    }

    /// Get an HTTP client for this harness.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.app.clone())
    }
}
