//! Shoe Store Support Assistant
//!
//! Ties validation, conversation memory, pattern analysis, intent routing and
//! the optional external responder into a single `process_query` call.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;

use shoe_assistant_config::AssistantConfig;
use shoe_assistant_core::reply::ESCALATION_INTENT;
use shoe_assistant_core::{
    AssistantReply, CompletionOptions, ConversationState, Product, ProblemCategory,
    ProductCatalog, ReplySource, ResponderBackend, SentimentLevel, UserHistory,
    ValidationSummary,
};
use shoe_assistant_llm::{OllamaResponder, PromptBuilder};

use crate::followup;
use crate::intent::{IntentRouter, QueryIntent, RoutedIntent};
use crate::memory::{ConversationStore, StoreConfig};
use crate::validation::ValidationPipeline;
use crate::AgentError;

/// Messages of history passed to the responder
const RESPONDER_CONTEXT_MESSAGES: usize = 3;

/// Products attached to a reply
const MAX_PRODUCTS: usize = 4;

/// Support assistant
pub struct AssistantOrchestrator {
    config: AssistantConfig,
    pipeline: ValidationPipeline,
    router: IntentRouter,
    store: Arc<ConversationStore>,
    responder: Option<Arc<dyn ResponderBackend>>,
    catalog: Option<Arc<dyn ProductCatalog>>,
    user_history: Option<Arc<dyn UserHistory>>,
}

impl AssistantOrchestrator {
    /// Create an assistant over a shared store, without collaborators
    pub fn new(config: AssistantConfig, store: Arc<ConversationStore>) -> Self {
        Self {
            config,
            pipeline: ValidationPipeline::new(),
            router: IntentRouter::new(),
            store,
            responder: None,
            catalog: None,
            user_history: None,
        }
    }

    /// Create an assistant from configuration
    ///
    /// Builds its own store and, when enabled, the Ollama responder. A
    /// responder that fails to build is logged and skipped.
    pub fn from_config(config: AssistantConfig) -> Self {
        let store = Arc::new(ConversationStore::new(StoreConfig::from(&config.session)));

        let responder: Option<Arc<dyn ResponderBackend>> = if config.responder.enabled {
            match OllamaResponder::from_config(&config.responder) {
                Ok(backend) => Some(Arc::new(backend)),
                Err(e) => {
                    tracing::warn!(error = %e, "Responder unavailable, using rule-based replies");
                    None
                }
            }
        } else {
            None
        };

        let mut assistant = Self::new(config, store);
        assistant.responder = responder;
        assistant
    }

    pub fn with_responder(mut self, responder: Arc<dyn ResponderBackend>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn ProductCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_user_history(mut self, user_history: Arc<dyn UserHistory>) -> Self {
        self.user_history = Some(user_history);
        self
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Static quick prompts
    pub fn get_suggestions(&self) -> Vec<String> {
        followup::QUICK_PROMPTS.iter().map(|s| s.to_string()).collect()
    }

    /// Process one customer message
    ///
    /// Never fails: any error or panic inside the pipeline becomes the
    /// generic failure reply.
    pub async fn process_query(
        &self,
        query: &str,
        user_id: Option<&str>,
        session_id: Option<&str>,
    ) -> AssistantReply {
        let start = Instant::now();
        let session = Self::resolve_session(user_id, session_id);

        let result = AssertUnwindSafe(self.try_process(query, user_id, &session))
            .catch_unwind()
            .await;

        let reply = match result {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                tracing::error!(session_id = %session, error = %e, "Query processing failed");
                AssistantReply::failure(&session)
            }
            Err(_) => {
                tracing::error!(session_id = %session, "Query processing panicked");
                AssistantReply::failure(&session)
            }
        };

        let outcome = match reply.source {
            ReplySource::Escalation => "escalation",
            ReplySource::Backend => "backend",
            ReplySource::Rules => "rules",
            ReplySource::Failure => "failure",
        };
        metrics::counter!("assistant_queries_total", "outcome" => outcome).increment(1);
        metrics::histogram!("assistant_query_latency_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);
        metrics::gauge!("assistant_sessions_active").set(self.store.count() as f64);

        reply
    }

    fn resolve_session(user_id: Option<&str>, session_id: Option<&str>) -> String {
        session_id
            .filter(|s| !s.is_empty())
            .or(user_id.filter(|u| !u.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("anon_{}", Utc::now().timestamp_millis()))
    }

    async fn try_process(
        &self,
        query: &str,
        user_id: Option<&str>,
        session: &str,
    ) -> Result<AssistantReply, AgentError> {
        let validation = self.pipeline.validate(query);

        let now = Utc::now();
        let state = self.store.update_context_at(session, query, &validation, now);
        let patterns = self.store.analyzer().analyze(&state);
        let stats = self.store.stats_for(&state, now);
        let pattern_config = self.store.analyzer().config();
        let context_suggestions = followup::context_suggestions(&state, &patterns, pattern_config);

        if patterns.requires_human_intervention {
            let reason = followup::escalation_reason(&patterns, pattern_config);

            tracing::info!(session_id = session, reason, "Escalating to human agent");
            metrics::counter!("assistant_escalations_total", "reason" => reason).increment(1);

            let mut suggestions = context_suggestions;
            suggestions.push(followup::HUMAN_AGENT_SUGGESTION.to_string());

            return Ok(AssistantReply {
                success: true,
                message: validation.suggested_response.clone(),
                intent: ESCALATION_INTENT.to_string(),
                source: ReplySource::Escalation,
                suggestions,
                products: Vec::new(),
                validation: Some(validation),
                conversation_stats: Some(stats),
                requires_escalation: true,
                escalation_reason: Some(reason.to_string()),
                session_id: session.to_string(),
            });
        }

        let routed = self.router.route(query);
        let products = self.find_products(&routed).await?;

        let (source, message, suggestions) =
            match self.ask_responder(query, &validation, &state).await {
                Some(message) => (
                    ReplySource::Backend,
                    message,
                    followup::merge_suggestions(std::iter::empty::<&str>(), &context_suggestions),
                ),
                None => {
                    let message = self
                        .validation_aware_response(&validation, &state, &routed, user_id)
                        .await?;
                    let own = followup::quick_replies(validation.problem_category);
                    (
                        ReplySource::Rules,
                        message,
                        followup::merge_suggestions(own.iter().copied(), &context_suggestions),
                    )
                }
            };

        Ok(AssistantReply {
            success: true,
            message,
            intent: routed.intent.as_str().to_string(),
            source,
            suggestions,
            products,
            validation: Some(validation),
            conversation_stats: Some(stats),
            requires_escalation: false,
            escalation_reason: None,
            session_id: session.to_string(),
        })
    }

    /// Ask the external responder, if configured
    async fn ask_responder(
        &self,
        query: &str,
        validation: &ValidationSummary,
        state: &ConversationState,
    ) -> Option<String> {
        let responder = self.responder.as_ref()?;

        let prompt = PromptBuilder::new()
            .with_persona(self.config.persona.clone())
            .with_validation(validation)
            .with_recent_messages(state.recent_messages(RESPONDER_CONTEXT_MESSAGES))
            .user_message(query)
            .build();

        let options = CompletionOptions {
            max_tokens: self.config.responder.max_tokens,
            temperature: self.config.responder.temperature,
            timeout_ms: self.config.responder.timeout_ms,
        };

        let answer = tokio::time::timeout(
            options.timeout(),
            responder.complete(&prompt.system, &prompt.user, &options),
        )
        .await
        .ok()
        .flatten()
        .filter(|text| !text.trim().is_empty());

        if answer.is_none() {
            tracing::warn!(
                backend = responder.name(),
                "No responder answer, falling back to rule-based reply"
            );
            metrics::counter!("assistant_backend_fallbacks_total").increment(1);
        }

        answer
    }

    /// Rule-based reply built from the validation
    async fn validation_aware_response(
        &self,
        validation: &ValidationSummary,
        state: &ConversationState,
        routed: &RoutedIntent,
        user_id: Option<&str>,
    ) -> Result<String, AgentError> {
        let mut parts = Vec::new();

        let mut opening = String::new();
        if validation.urgency.level.is_priority() {
            opening.push_str(followup::PRIORITY_PREFIX);
        }
        opening.push_str(&validation.suggested_response);
        parts.push(opening);

        if validation.sentiment.level == SentimentLevel::VeryNegative {
            parts.push(followup::EMPATHY_LINE.to_string());
        }

        parts.push(followup::follow_up(
            validation.problem_category,
            state.entities.order_number.as_deref(),
        ));

        if routed.intent == QueryIntent::CategoryBrowse {
            if let Some(line) = self.category_listing().await? {
                parts.push(line);
            }
        }

        if matches!(
            validation.problem_category,
            ProblemCategory::ProductAvailability | ProblemCategory::GeneralInquiry
        ) {
            if let Some(line) = self.personalized_line(user_id).await {
                parts.push(line);
            }
        }

        Ok(parts.join(" "))
    }

    /// Catalog matches for product-related queries
    async fn find_products(&self, routed: &RoutedIntent) -> Result<Vec<Product>, AgentError> {
        let Some(ref catalog) = self.catalog else {
            return Ok(Vec::new());
        };
        if !routed.intent.is_product_related() {
            return Ok(Vec::new());
        }

        let products = catalog.find_by_filter(&routed.product_filter()).await?;

        Ok(products
            .into_iter()
            .filter(|p| routed.price_matches(p))
            .take(MAX_PRODUCTS)
            .collect())
    }

    async fn category_listing(&self) -> Result<Option<String>, AgentError> {
        let Some(ref catalog) = self.catalog else {
            return Ok(None);
        };

        let categories = catalog.distinct_categories().await?;
        if categories.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("We currently carry: {}.", categories.join(", "))))
    }

    /// Mention of recently browsed categories for returning users
    async fn personalized_line(&self, user_id: Option<&str>) -> Option<String> {
        let history = self.user_history.as_ref()?;
        let user_id = user_id.filter(|u| !u.is_empty())?;

        match history.browsing_categories(user_id).await {
            Ok(categories) if !categories.is_empty() => Some(format!(
                "Based on your recent browsing, you might like our {} collection.",
                categories.join(", ")
            )),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "User history lookup failed");
                None
            }
        }
    }
}
