use std::sync::Arc;

use crate::chain::HandlerChain;
use crate::history::{ConversationStore, ReadCursorTracker};
use crate::transport::RelayMode;

/// Shared state behind every route.
#[derive(Clone)]
pub struct AppState {
    pub chain: HandlerChain,
    pub store: Arc<ConversationStore>,
    pub cursors: Arc<ReadCursorTracker>,
    pub mode: RelayMode,
    /// Token budget per summary, reported by `/health`.
    pub token_limit: usize,
}
