use std::sync::Arc;

use tracing::{debug, instrument};

use crate::llm::{ChatModel, ChatRequest};
use crate::models::{ChatTurn, TravelIntent};
use crate::outcome::{Outcome, parse_or_default};

const SYSTEM_PROMPT: &str = "You are a travel intent analyzer. Extract destination, duration, interests, and budget from user requests. Return JSON only.";

fn user_prompt(user_text: &str) -> String {
    format!(
        "Extract travel details from: \"{user_text}\". Return JSON with: destination, duration (in days), interests (array), budget (optional), dates (optional)."
    )
}

/// Parse model output into an intent, or fall back to the default intent
pub fn parse_intent(raw: &str) -> crate::outcome::Parsed<TravelIntent> {
    parse_or_default(raw, TravelIntent::normalized, TravelIntent::default)
}

/// Turns a free-text request into a [`TravelIntent`]
pub struct IntentExtractor {
    model: Arc<dyn ChatModel>,
}

impl IntentExtractor {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Fatal only when the model call itself fails; unreadable answers degrade
    #[instrument(skip(self, history), fields(history_len = history.len()))]
    pub async fn extract(&self, user_text: &str, history: &[ChatTurn]) -> Outcome<TravelIntent> {
        let request = ChatRequest::new(SYSTEM_PROMPT, user_prompt(user_text)).with_history(history);

        let raw = match self.model.complete(request).await {
            Ok(raw) => raw,
            Err(e) => return Outcome::Fatal(e),
        };
        debug!("Intent model output: {}", raw);

        parse_intent(&raw).into()
    }
}
