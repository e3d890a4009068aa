use std::sync::Arc;

use crate::drafting::ClauseRuleTable;
use crate::llm_client::ContractDrafter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Validated at startup, read-only afterwards.
    pub rules: Arc<ClauseRuleTable>,
    /// Default: the Gemini-backed `LlmClient`.
    pub drafter: Arc<dyn ContractDrafter>,
}
