//! Training cost estimation
//!
//! Picks an epoch count from the dataset size and turns per-example token
//! counts into a billable total.
//!
//! ## Epoch policy
//!
//! With `effective = n_train_examples * target_epochs`:
//!
//! - `effective < min_target_examples`: boost to
//!   `min(max_default_epochs, min_target_examples / n)`
//! - `effective > max_target_examples`: throttle to
//!   `max(min_default_epochs, max_target_examples / n)`
//! - otherwise: `target_epochs`
//!
//! ## Billing
//!
//! Each example is billed for at most `max_tokens_per_example` tokens
//! (longer examples are truncated in training), and the capped sum is
//! billed once per epoch.
//!
//! ```rust
//! use finetune_prep::estimate::{estimate_cost, BillingPolicy};
//!
//! let estimate = estimate_cost(&[8032, 50, 60, 40, 60], 5, &BillingPolicy::default())?;
//! assert_eq!(estimate.epochs, 20);
//! assert_eq!(estimate.billable_tokens, 4306);
//! assert_eq!(estimate.total_billed_tokens, 86_120);
//! # Ok::<(), finetune_prep::Error>(())
//! ```

mod policy;

pub use policy::BillingPolicy;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Recommended epochs and billed token volume for a fine-tuning job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Recommended number of epochs
    pub epochs: u32,
    /// Sum of per-example token counts, each capped at the policy limit
    pub billable_tokens: u64,
    /// `billable_tokens * epochs`
    pub total_billed_tokens: u64,
}

/// Epoch count for a dataset of `n_train_examples`.
///
/// # Errors
///
/// Returns `Error::EmptyDataset` if `n_train_examples` is zero.
pub fn recommended_epochs(n_train_examples: usize, policy: &BillingPolicy) -> Result<u32> {
    if n_train_examples == 0 {
        return Err(Error::EmptyDataset);
    }

    let target = usize::try_from(policy.target_epochs).unwrap_or(usize::MAX);
    let effective = n_train_examples.saturating_mul(target);

    let epochs = if effective < policy.min_target_examples {
        let boosted = policy.min_target_examples / n_train_examples;
        u32::try_from(boosted)
            .unwrap_or(u32::MAX)
            .min(policy.max_default_epochs)
    } else if effective > policy.max_target_examples {
        let throttled = policy.max_target_examples / n_train_examples;
        u32::try_from(throttled)
            .unwrap_or(u32::MAX)
            .max(policy.min_default_epochs)
    } else {
        policy.target_epochs
    };

    Ok(epochs)
}

/// Sum of `convo_lens`, each capped at `max_tokens_per_example`.
#[must_use]
pub fn billable_tokens(convo_lens: &[usize], max_tokens_per_example: usize) -> u64 {
    convo_lens
        .iter()
        .map(|&len| len.min(max_tokens_per_example) as u64)
        .sum()
}

/// Number of examples longer than `max_tokens_per_example`.
///
/// These are truncated in training; the count is a warning, it does not
/// change the estimate.
#[must_use]
pub fn n_examples_over_limit(convo_lens: &[usize], max_tokens_per_example: usize) -> usize {
    convo_lens
        .iter()
        .filter(|&&len| len > max_tokens_per_example)
        .count()
}

/// Estimate epochs and billed tokens.
///
/// `convo_lens` holds the total token count of each example and
/// `n_train_examples` the dataset size used for the epoch policy.
///
/// # Errors
///
/// Returns `Error::EmptyDataset` if `n_train_examples` is zero.
pub fn estimate_cost(
    convo_lens: &[usize],
    n_train_examples: usize,
    policy: &BillingPolicy,
) -> Result<CostEstimate> {
    let epochs = recommended_epochs(n_train_examples, policy)?;
    let billable = billable_tokens(convo_lens, policy.max_tokens_per_example);

    let over_limit = n_examples_over_limit(convo_lens, policy.max_tokens_per_example);
    if over_limit > 0 {
        tracing::warn!(
            examples = over_limit,
            cap = policy.max_tokens_per_example,
            "examples exceed the per-example token cap and will be truncated"
        );
    }

    Ok(CostEstimate {
        epochs,
        billable_tokens: billable,
        total_billed_tokens: billable.saturating_mul(u64::from(epochs)),
    })
}
