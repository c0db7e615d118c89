//! Conversation Store
//!
//! Per-session conversation state with bounded histories and TTL expiry:
//! - Sessions are created lazily on first reference
//! - A session idle past the TTL is reset in place on next access
//! - Sessions are only removed by `clear_context` or the retention sweep
//!
//! Every mutation of a session happens while holding that session's map
//! entry, so concurrent updates to one session apply one at a time.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use shoe_assistant_config::{SessionConfig, MAX_SESSION_SECONDS};
use shoe_assistant_core::conversation::push_bounded;
use shoe_assistant_core::{
    ConversationState, ConversationStats, MessageRecord, ProblemRecord, SentimentPoint,
    ValidationSummary,
};

use crate::patterns::PatternAnalyzer;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Idle time after which a session's history is discarded
    pub ttl: chrono::Duration,
    pub max_messages: usize,
    pub max_problem_history: usize,
    pub max_sentiment_trend: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for StoreConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            ttl: session_duration(config.ttl_seconds),
            max_messages: config.max_messages,
            max_problem_history: config.max_problem_history,
            max_sentiment_trend: config.max_sentiment_trend,
        }
    }
}

/// Convert configured seconds, clamping to [`MAX_SESSION_SECONDS`]
pub fn session_duration(seconds: u64) -> chrono::Duration {
    let max = chrono::Duration::days(30);
    i64::try_from(seconds.min(MAX_SESSION_SECONDS))
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .map_or(max, |d| d.min(max))
}

/// In-memory conversation store
pub struct ConversationStore {
    sessions: DashMap<String, ConversationState>,
    config: StoreConfig,
    analyzer: PatternAnalyzer,
}

impl ConversationStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_analyzer(config, PatternAnalyzer::default())
    }

    pub fn with_analyzer(config: StoreConfig, analyzer: PatternAnalyzer) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
            analyzer,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current state of a session, creating or resetting it as needed
    pub fn get_context(&self, session_id: &str) -> ConversationState {
        self.get_context_at(session_id, Utc::now())
    }

    pub fn get_context_at(&self, session_id: &str, now: DateTime<Utc>) -> ConversationState {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| ConversationState::new(session_id, now));

        if entry.is_expired(now, self.config.ttl) {
            tracing::debug!(session_id, "Session expired, resetting history");
            entry.reset(now);
        }

        entry.clone()
    }

    /// Record a message and its validation, returning the updated state
    pub fn update_context(
        &self,
        session_id: &str,
        text: &str,
        validation: &ValidationSummary,
    ) -> ConversationState {
        self.update_context_at(session_id, text, validation, Utc::now())
    }

    pub fn update_context_at(
        &self,
        session_id: &str,
        text: &str,
        validation: &ValidationSummary,
        now: DateTime<Utc>,
    ) -> ConversationState {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id, "Conversation started");
                ConversationState::new(session_id, now)
            });

        let state = entry.value_mut();
        if state.is_expired(now, self.config.ttl) {
            tracing::debug!(session_id, "Session expired, resetting history");
            state.reset(now);
        }

        push_bounded(
            &mut state.messages,
            MessageRecord {
                text: text.to_string(),
                timestamp: now,
                validation: validation.clone(),
            },
            self.config.max_messages,
        );

        push_bounded(
            &mut state.problem_history,
            ProblemRecord {
                category: validation.problem_category,
                timestamp: now,
                urgency: validation.urgency.level,
                sentiment: validation.sentiment.level,
            },
            self.config.max_problem_history,
        );

        state.user_intent = Some(validation.problem_category);
        state.entities.merge(&validation.entities);

        push_bounded(
            &mut state.sentiment_trend,
            SentimentPoint {
                level: validation.sentiment.level,
                score: validation.sentiment.score,
                timestamp: now,
            },
            self.config.max_sentiment_trend,
        );

        state.last_active = now;
        state.clone()
    }

    /// Remove a session entirely
    pub fn clear_context(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id, "Conversation cleared");
        }
        removed
    }

    /// Derived statistics for a session
    pub fn get_conversation_stats(&self, session_id: &str) -> ConversationStats {
        self.get_conversation_stats_at(session_id, Utc::now())
    }

    pub fn get_conversation_stats_at(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> ConversationStats {
        let state = self.get_context_at(session_id, now);
        self.stats_for(&state, now)
    }

    /// Statistics for a state snapshot
    pub fn stats_for(&self, state: &ConversationState, now: DateTime<Utc>) -> ConversationStats {
        let patterns = self.analyzer.analyze(state);

        let duration_ms = match state.messages.front() {
            Some(first) => (now - first.timestamp).num_milliseconds().max(0),
            None => 0,
        };

        let mut problems_discussed = Vec::new();
        for problem in &state.problem_history {
            if !problems_discussed.contains(&problem.category) {
                problems_discussed.push(problem.category);
            }
        }

        ConversationStats {
            message_count: state.messages.len(),
            duration_ms,
            problems_discussed,
            average_sentiment: patterns.average_sentiment,
            sentiment_trend: patterns.sentiment_trend,
            requires_human_intervention: patterns.requires_human_intervention,
            is_escalating: patterns.is_escalating,
            is_repetitive: patterns.is_repetitive,
        }
    }

    pub fn analyzer(&self) -> &PatternAnalyzer {
        &self.analyzer
    }

    /// Delete sessions idle for longer than `retention`
    pub fn sweep_expired(&self, retention: chrono::Duration) -> usize {
        self.sweep_expired_at(Utc::now(), retention)
    }

    pub fn sweep_expired_at(&self, now: DateTime<Utc>, retention: chrono::Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, state| !state.is_expired(now, retention));
        before.saturating_sub(self.sessions.len())
    }

    /// Start background sweep task
    ///
    /// Returns a shutdown sender; send `true` to stop the task.
    pub fn start_sweep_task(
        self: &Arc<Self>,
        interval: Duration,
        retention: chrono::Duration,
    ) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let store = Arc::clone(self);

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let removed = store.sweep_expired(retention);
                        if removed > 0 {
                            tracing::info!(
                                "Session sweep: removed {} abandoned sessions ({} remaining)",
                                removed,
                                store.count()
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("Session sweep task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Number of stored sessions
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
