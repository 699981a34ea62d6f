//! Component factory: builds RelayComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use tracing::{info, instrument};

use crate::chain::HandlerChain;
use crate::config::{HistoryConfig, RelayConfig};
use crate::core::MessageSender;
use crate::handlers::{CommandHandler, HelpHandler, StoreHandler};
use crate::history::{ConversationStore, ReadCursorTracker};
use crate::server::AppState;
use crate::summary::{
    IntentClassifier, LlmIntentClassifier, LlmSummarizer, Summarizer, SummaryOrchestrator,
};
use crate::transport::{RelayMode, ReplyRouter, TwilioSender};

/// Shared state and collaborators of one relay process.
#[derive(Clone)]
pub struct RelayComponents {
    pub mode: RelayMode,
    pub history: HistoryConfig,
    pub store: Arc<ConversationStore>,
    pub cursors: Arc<ReadCursorTracker>,
    pub sender: Arc<dyn MessageSender>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl RelayComponents {
    /// Builds components around the given collaborators (e.g. recording mocks in tests).
    pub fn with_collaborators(
        mode: RelayMode,
        history: HistoryConfig,
        sender: Arc<dyn MessageSender>,
        classifier: Arc<dyn IntentClassifier>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            mode,
            store: Arc::new(ConversationStore::with_max_retained(
                history.max_retained_messages,
            )),
            cursors: Arc::new(ReadCursorTracker::new()),
            history,
            sender,
            classifier,
            summarizer,
        }
    }

    pub fn orchestrator(&self) -> SummaryOrchestrator {
        SummaryOrchestrator::new(
            self.store.clone(),
            self.cursors.clone(),
            self.summarizer.clone(),
        )
        .with_max_tokens(self.history.max_tokens_per_summary)
    }
}

/// Builds RelayComponents with the Twilio sender and OpenAI-backed summarizer and classifier.
#[instrument(skip(config))]
pub fn build_relay_components(config: &RelayConfig) -> RelayComponents {
    let llm = config.llm();
    let summary_client: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(llm.api_key().to_string(), llm.base_url().to_string())
            .with_model(llm.summary_model()),
    );
    let intent_client: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(llm.api_key().to_string(), llm.base_url().to_string())
            .with_model(llm.intent_model()),
    );
    info!(
        summary_model = %llm.summary_model(),
        intent_model = %llm.intent_model(),
        twilio_api_url = %config.base().twilio_api_url,
        "Building relay components"
    );

    RelayComponents::with_collaborators(
        config.mode(),
        config.history().clone(),
        Arc::new(TwilioSender::new(config.base().twilio())),
        Arc::new(LlmIntentClassifier::new(intent_client)),
        Arc::new(LlmSummarizer::new(summary_client)),
    )
}

/// Builds the handler chain (help → summary command → store).
pub fn build_handler_chain(components: &RelayComponents) -> HandlerChain {
    let help = Arc::new(HelpHandler::new(components.sender.clone(), components.mode));
    let command = Arc::new(CommandHandler::new(
        components.classifier.clone(),
        components.orchestrator(),
        components.cursors.clone(),
        components.sender.clone(),
        ReplyRouter::new(components.mode),
    ));
    let store = Arc::new(StoreHandler::new(components.store.clone(), components.mode));
    HandlerChain::new()
        .add_handler(help)
        .add_handler(command)
        .add_handler(store)
}

/// Builds the shared state for the HTTP router.
pub fn build_app_state(components: &RelayComponents) -> Arc<AppState> {
    Arc::new(AppState {
        chain: build_handler_chain(components),
        store: components.store.clone(),
        cursors: components.cursors.clone(),
        mode: components.mode,
        token_limit: components.history.max_tokens_per_summary,
    })
}
