use crate::analysis::AnalyticsEngine;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Sampler, aggregator, network stats cache and account lookup, all
    /// sharing one ledger client.
    pub engine: AnalyticsEngine,
}

impl AppState {
    pub fn new(engine: AnalyticsEngine) -> Self {
        Self { engine }
    }
}
