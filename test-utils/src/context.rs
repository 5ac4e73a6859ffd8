use mockito::{Mock, ServerGuard};
use std::collections::HashMap;

/// Running fake quiz site.
///
/// Owns the `mockito` server and every mounted route. Routes stay mounted for as long as
/// the context lives, so keep it alive for the whole test.
pub struct TestContext {
    /// Local HTTP server standing in for the quiz site.
    pub server: ServerGuard,

    /// Mounted routes keyed by name (`"login_form"`, `"login"`, `"random"`, ...).
    mocks: HashMap<&'static str, Mock>,
}

impl TestContext {
    /// Creates a context around an already started server.
    ///
    /// Typically called by `TestBuilder::build()` rather than directly.
    pub fn new(server: ServerGuard) -> Self {
        Self {
            server,
            mocks: HashMap::new(),
        }
    }

    /// Base URL of the fake site, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Registers a mounted route under a name so tests can inspect it later.
    pub fn insert(&mut self, name: &'static str, mock: Mock) {
        self.mocks.insert(name, mock);
    }

    /// Checks whether a named route received at least the expected number of hits.
    ///
    /// Returns `false` for unknown route names.
    ///
    /// # Arguments
    /// - `name` - Route name given when it was mounted
    ///
    /// # Returns
    /// - `true` - The route exists and its expectation is satisfied
    /// - `false` - Unknown route or expectation not met
    pub async fn matched(&self, name: &str) -> bool {
        match self.mocks.get(name) {
            Some(mock) => mock.matched_async().await,
            None => false,
        }
    }
}
