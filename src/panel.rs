//! Core entry point: composes intent extraction, access checking, and
//! resolution for a single query.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::PanelError;
use crate::guard::{self, AccessDecision};
use crate::history::QueryHistory;
use crate::intent::{IntentExtractor, LanguageModel};
use crate::models::StudentRecord;
use crate::report;
use crate::resolver::{self, ResolvedResult};
use crate::scope::ScopeRegistry;

pub struct AdminPanel<M> {
    extractor: IntentExtractor<M>,
    registry: ScopeRegistry,
    dataset: Vec<StudentRecord>,
    history: Option<Arc<dyn QueryHistory>>,
}

impl<M: LanguageModel> AdminPanel<M> {
    pub fn new(model: M, registry: ScopeRegistry, dataset: Vec<StudentRecord>) -> Self {
        Self {
            extractor: IntentExtractor::new(model),
            registry,
            dataset,
            history: None,
        }
    }

    pub fn with_history(mut self, history: Arc<dyn QueryHistory>) -> Self {
        self.history = Some(history);
        self
    }

    /// Runs one query end-to-end. Every failure is a typed, user-visible
    /// error; nothing here panics and no state beyond the history sink is
    /// touched, so queries stay independent.
    pub async fn handle_query(
        &self,
        role: &str,
        raw_query: &str,
    ) -> Result<ResolvedResult, PanelError> {
        let outcome = self.run(role, raw_query).await;

        if let Some(history) = &self.history {
            let recorded = match &outcome {
                Ok(result) => report::render(result),
                Err(err) => err.to_string(),
            };
            history.record(role, raw_query, &recorded);
        }

        outcome
    }

    async fn run(&self, role: &str, raw_query: &str) -> Result<ResolvedResult, PanelError> {
        let intent = self.extractor.extract(raw_query).await?;
        debug!(?intent, role, "intent extracted");

        let effective = match guard::authorize(&self.registry, role, &intent) {
            AccessDecision::Granted { effective } => effective,
            AccessDecision::Denied => return Err(PanelError::AccessDenied),
        };

        resolver::resolve(
            &self.dataset,
            &effective,
            intent.data_type,
            intent.time_period.as_deref(),
            Utc::now().date_naive(),
        )
    }
}
