//! Hybrid Validation Engine
//!
//! Orchestrates a run: the deterministic rule stage completes first, then
//! eligible fields are adjudicated concurrently under a bounded pool and a
//! per-call deadline, then each field is resolved independently. A run
//! always returns a complete verdict sequence or fails fast with a single
//! diagnosable cause - never a silent partial result.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::adjudicator::{Adjudicate, AiOutcome, OpenAiAdjudicator};
use crate::config::EngineConfig;
use crate::document::ExtractedDocument;
use crate::error::BriefResult;
use crate::resolver::{resolve, FinalVerdict};
use crate::rules::RuleSet;
use crate::terms::TermRegistry;
use crate::validation::{RuleValidator, RuleVerdict};

/// Ordered verdict sequence for one run, consumed by the reporting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub verdicts: Vec<FinalVerdict>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    pub fn passed_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.verdicts.iter().filter(|v| !v.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }
}

/// The hybrid brief validator.
pub struct BriefValidator {
    registry: Arc<TermRegistry>,
    rules: Arc<RuleSet>,
    config: EngineConfig,
    adjudicator: Option<Arc<dyn Adjudicate>>,
}

impl BriefValidator {
    /// Build a validator with the built-in registry and the standard rule
    /// table. The adjudicator is enabled only when a credential is
    /// configured; without one the engine degrades to rule-only verdicts.
    pub fn new(config: EngineConfig) -> BriefResult<Self> {
        config.validate()?;

        let adjudicator: Option<Arc<dyn Adjudicate>> = if config.api_key.is_some() {
            Some(Arc::new(OpenAiAdjudicator::new(&config)))
        } else {
            log::debug!("no API key configured, running rule-only");
            None
        };

        Ok(Self {
            registry: Arc::new(TermRegistry::builtin()),
            rules: Arc::new(RuleSet::standard()?),
            config,
            adjudicator,
        })
    }

    /// Substitute the term registry (deterministic tests, other domains).
    pub fn with_registry(mut self, registry: TermRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Substitute the rule table.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Substitute the adjudicator implementation.
    pub fn with_adjudicator(mut self, adjudicator: Arc<dyn Adjudicate>) -> Self {
        self.adjudicator = Some(adjudicator);
        self
    }

    /// Disable AI adjudication regardless of configuration.
    pub fn without_adjudicator(mut self) -> Self {
        self.adjudicator = None;
        self
    }

    pub fn registry(&self) -> &TermRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run only the deterministic stage.
    pub fn validate_rules_only(&self, doc: &ExtractedDocument) -> BriefResult<Vec<RuleVerdict>> {
        let validator = RuleValidator::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.rules),
            self.config.case_policy.clone(),
        );
        validator.validate(doc)
    }

    /// Run the full hybrid pipeline.
    pub async fn validate(&self, doc: &ExtractedDocument) -> BriefResult<ValidationReport> {
        let rule_verdicts = self.validate_rules_only(doc)?;
        let outcomes = self.adjudicate_all(&rule_verdicts).await;

        let verdicts = rule_verdicts
            .iter()
            .zip(&outcomes)
            .map(|(rule, ai)| resolve(rule, ai, self.config.confidence_threshold))
            .collect();

        Ok(ValidationReport { verdicts })
    }

    /// Issue adjudication calls for eligible fields concurrently.
    ///
    /// Per-field calls have no data dependency on each other; each is
    /// bounded by a semaphore permit and a hard deadline. Fields without a
    /// delivered verdict (timeout, panic, disabled) stay `Unavailable` and
    /// resolve rule-only.
    async fn adjudicate_all(&self, rule_verdicts: &[RuleVerdict]) -> Vec<AiOutcome> {
        let mut outcomes =
            vec![AiOutcome::unavailable("AI adjudication disabled"); rule_verdicts.len()];

        let Some(adjudicator) = &self.adjudicator else {
            return outcomes;
        };

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_ai_calls));
        let mut tasks = JoinSet::new();

        for (idx, verdict) in rule_verdicts.iter().enumerate() {
            let requirement = self.rules.requirement_for(verdict.field.kind);
            if !requirement.case_rule.ai_eligible() || verdict.field.is_empty() {
                continue;
            }

            let adjudicator = Arc::clone(adjudicator);
            let semaphore = Arc::clone(&semaphore);
            let field = verdict.field.clone();
            let requirement = requirement.clone();
            let deadline = self.config.ai_timeout;

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (idx, AiOutcome::unavailable("adjudication cancelled")),
                };
                match tokio::time::timeout(deadline, adjudicator.adjudicate(&field, &requirement))
                    .await
                {
                    Ok(outcome) => (idx, outcome),
                    Err(_) => (
                        idx,
                        AiOutcome::unavailable(format!("timed out after {deadline:?}")),
                    ),
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = outcome,
                // The field keeps its Unavailable default and resolves
                // rule-only.
                Err(e) => log::warn!("adjudication task failed: {e}"),
            }
        }

        outcomes
    }
}
