use std::sync::Arc;

use crate::notify::Notifier;
use crate::oracle::CompletionOracle;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The oracle, store, and notifier are trait objects so tests
/// swap in deterministic fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    pub oracle: Arc<dyn CompletionOracle>,
    pub notifier: Arc<dyn Notifier>,
}
