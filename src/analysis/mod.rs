//! Dataset analysis pipeline
//!
//! Runs the schema validator, counts tokens per record, summarizes the
//! distributions and estimates the training cost in one pass.
//!
//! ```text
//! records ──> validate ──────────────────────────────> ErrorTally
//!    │
//!    └──> messages array ──> TokenAccountant ──> TokenCounts (per record)
//!                                                        │
//!                          DistributionSummary x3 <──────┤
//!                          CostEstimate <────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use finetune_prep::analysis::DatasetAnalyzer;
//! use finetune_prep::tokens::WhitespaceEncoder;
//! use serde_json::json;
//!
//! let records = vec![json!({"messages": [
//!     {"role": "user", "content": "hello"},
//!     {"role": "assistant", "content": "hi there"}
//! ]})];
//!
//! let analyzer = DatasetAnalyzer::new(WhitespaceEncoder);
//! let report = analyzer.analyze(&records)?;
//!
//! assert!(report.is_clean());
//! assert_eq!(report.n_missing_system, 1);
//! assert_eq!(report.estimate.unwrap().epochs, 25);
//! # Ok::<(), finetune_prep::Error>(())
//! ```

mod report;

pub use report::DatasetReport;

use serde_json::Value;

use crate::dataset::Role;
use crate::estimate::{estimate_cost, n_examples_over_limit, BillingPolicy};
use crate::stats::DistributionSummary;
use crate::tokens::{TokenAccountant, TokenCounts, TokenEncoder, TokenOverhead};
use crate::validate::{validate_dataset, ErrorTally};
use crate::Result;

/// Per-record facts gathered for the report.
#[derive(Debug, Clone, Copy)]
struct RecordFacts {
    counts: TokenCounts,
    has_system: bool,
    has_user: bool,
}

/// Analyzes datasets with an owned encoder and fixed policy.
#[derive(Debug)]
pub struct DatasetAnalyzer<E> {
    encoder: E,
    overhead: TokenOverhead,
    policy: BillingPolicy,
}

impl<E: TokenEncoder> DatasetAnalyzer<E> {
    /// Create an analyzer with the default overhead and billing policy.
    #[must_use]
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            overhead: TokenOverhead::default(),
            policy: BillingPolicy::default(),
        }
    }

    /// Create a builder for an analyzer with custom settings.
    #[must_use]
    pub fn builder(encoder: E) -> DatasetAnalyzerBuilder<E> {
        DatasetAnalyzerBuilder::new(encoder)
    }

    /// Get the billing policy.
    #[must_use]
    pub const fn policy(&self) -> &BillingPolicy {
        &self.policy
    }

    /// Get the token overhead.
    #[must_use]
    pub const fn overhead(&self) -> TokenOverhead {
        self.overhead
    }

    /// Analyze `records` sequentially.
    ///
    /// # Errors
    ///
    /// Propagates encoder failures. Malformed records are counted in the
    /// report, never returned as errors.
    pub fn analyze(&self, records: &[Value]) -> Result<DatasetReport> {
        let errors = validate_dataset(records);
        let accountant = self.accountant();
        let facts = records
            .iter()
            .map(|value| Self::record_facts(&accountant, value))
            .collect::<Result<Vec<_>>>()?;
        self.build_report(records.len(), errors, &facts)
    }

    /// Parallel [`DatasetAnalyzer::analyze`]; the report is identical.
    ///
    /// # Errors
    ///
    /// Same as [`DatasetAnalyzer::analyze`].
    #[cfg(feature = "rayon")]
    pub fn analyze_par(&self, records: &[Value]) -> Result<DatasetReport> {
        use rayon::prelude::*;

        let errors = crate::validate::validate_dataset_par(records);
        let accountant = self.accountant();
        let facts = records
            .par_iter()
            .map(|value| Self::record_facts(&accountant, value))
            .collect::<Result<Vec<_>>>()?;
        self.build_report(records.len(), errors, &facts)
    }

    fn accountant(&self) -> TokenAccountant<'_, E> {
        TokenAccountant::with_overhead(&self.encoder, self.overhead)
    }

    /// Facts for any object record carrying a `messages` array, whatever
    /// its roles or keys; `None` for records with no message list at all.
    fn record_facts(
        accountant: &TokenAccountant<'_, E>,
        value: &Value,
    ) -> Result<Option<RecordFacts>> {
        let Some(messages) = value.get("messages").and_then(Value::as_array) else {
            return Ok(None);
        };
        let has_role = |role: Role| {
            messages
                .iter()
                .any(|m| m.get("role").and_then(Value::as_str) == Some(role.as_str()))
        };
        Ok(Some(RecordFacts {
            counts: accountant.count_raw(messages)?,
            has_system: has_role(Role::System),
            has_user: has_role(Role::User),
        }))
    }

    fn build_report(
        &self,
        n_examples: usize,
        errors: ErrorTally,
        facts: &[Option<RecordFacts>],
    ) -> Result<DatasetReport> {
        let typed: Vec<RecordFacts> = facts.iter().flatten().copied().collect();
        let n_untyped = facts.len() - typed.len();
        if n_untyped > 0 {
            tracing::warn!(
                n_untyped,
                "records without a messages array skipped for token counts"
            );
        }

        let n_messages: Vec<usize> = typed.iter().map(|f| f.counts.message_count).collect();
        let convo_lens: Vec<usize> = typed.iter().map(|f| f.counts.total).collect();
        let assistant_lens: Vec<usize> = typed.iter().map(|f| f.counts.assistant_only).collect();

        let cap = self.policy.max_tokens_per_example;
        let n_too_long = n_examples_over_limit(&convo_lens, cap);

        // The summarizer and estimator are only defined for at least one sample.
        let (messages_per_example, total_tokens_per_example, assistant_tokens_per_example, estimate) =
            if typed.is_empty() {
                (None, None, None, None)
            } else {
                (
                    Some(DistributionSummary::from_counts(&n_messages)?),
                    Some(DistributionSummary::from_counts(&convo_lens)?),
                    Some(DistributionSummary::from_counts(&assistant_lens)?),
                    Some(estimate_cost(&convo_lens, n_examples, &self.policy)?),
                )
            };

        tracing::debug!(
            n_examples,
            n_untyped,
            problems = errors.total(),
            n_too_long,
            "dataset analysis complete"
        );

        Ok(DatasetReport {
            n_examples,
            errors,
            n_untyped,
            n_missing_system: typed.iter().filter(|f| !f.has_system).count(),
            n_missing_user: typed.iter().filter(|f| !f.has_user).count(),
            messages_per_example,
            total_tokens_per_example,
            assistant_tokens_per_example,
            n_too_long,
            estimate,
        })
    }
}

/// Builder for `DatasetAnalyzer`.
#[derive(Debug)]
pub struct DatasetAnalyzerBuilder<E> {
    encoder: E,
    overhead: TokenOverhead,
    policy: BillingPolicy,
}

impl<E: TokenEncoder> DatasetAnalyzerBuilder<E> {
    /// Create a builder with default overhead and policy.
    #[must_use]
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            overhead: TokenOverhead::default(),
            policy: BillingPolicy::default(),
        }
    }

    /// Set the billing policy.
    #[must_use]
    pub const fn policy(mut self, policy: BillingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the chat-format token overhead.
    #[must_use]
    pub const fn overhead(mut self, overhead: TokenOverhead) -> Self {
        self.overhead = overhead;
        self
    }

    /// Build the analyzer.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the billing policy is inconsistent.
    pub fn build(self) -> Result<DatasetAnalyzer<E>> {
        self.policy.validate()?;
        Ok(DatasetAnalyzer {
            encoder: self.encoder,
            overhead: self.overhead,
            policy: self.policy,
        })
    }
}
