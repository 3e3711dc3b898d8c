//! Dataset Report - everything one analysis pass produces

use serde::{Deserialize, Serialize};

use crate::estimate::CostEstimate;
use crate::stats::DistributionSummary;
use crate::validate::ErrorTally;

/// Result of analyzing one dataset.
///
/// Distribution and cost fields are `None` when no record could be token
/// counted (including the empty dataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Number of records analyzed
    pub n_examples: usize,
    /// Structural problems by kind
    pub errors: ErrorTally,
    /// Records with no `messages` array, skipped for token statistics
    pub n_untyped: usize,
    /// Token-counted records without a system message
    pub n_missing_system: usize,
    /// Token-counted records without a user message
    pub n_missing_user: usize,
    /// Messages per example
    pub messages_per_example: Option<DistributionSummary>,
    /// Total tokens per example
    pub total_tokens_per_example: Option<DistributionSummary>,
    /// Assistant tokens per example
    pub assistant_tokens_per_example: Option<DistributionSummary>,
    /// Examples over the per-example token cap (truncated in training)
    pub n_too_long: usize,
    /// Epoch recommendation and billed tokens
    pub estimate: Option<CostEstimate>,
}

impl DatasetReport {
    /// Whether the validator found no structural problem.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
