//! Billing policy constants

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Limits and targets used to pick epochs and cap billable tokens.
///
/// Every field has a serde default, so a partial JSON document overrides
/// only what it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPolicy {
    /// Examples are truncated to this many tokens during training
    #[serde(default = "default_max_tokens_per_example")]
    pub max_tokens_per_example: usize,
    /// Epochs used when the dataset size is in the target range
    #[serde(default = "default_target_epochs")]
    pub target_epochs: u32,
    /// Lower bound on examples seen across all epochs
    #[serde(default = "default_min_target_examples")]
    pub min_target_examples: usize,
    /// Upper bound on examples seen across all epochs
    #[serde(default = "default_max_target_examples")]
    pub max_target_examples: usize,
    /// Floor for throttled epochs (large datasets)
    #[serde(default = "default_min_default_epochs")]
    pub min_default_epochs: u32,
    /// Ceiling for boosted epochs (small datasets)
    #[serde(default = "default_max_default_epochs")]
    pub max_default_epochs: u32,
}

const fn default_max_tokens_per_example() -> usize {
    4096
}

const fn default_target_epochs() -> u32 {
    3
}

const fn default_min_target_examples() -> usize {
    100
}

const fn default_max_target_examples() -> usize {
    25_000
}

const fn default_min_default_epochs() -> u32 {
    1
}

const fn default_max_default_epochs() -> u32 {
    25
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            max_tokens_per_example: default_max_tokens_per_example(),
            target_epochs: default_target_epochs(),
            min_target_examples: default_min_target_examples(),
            max_target_examples: default_max_target_examples(),
            min_default_epochs: default_min_default_epochs(),
            max_default_epochs: default_max_default_epochs(),
        }
    }
}

impl BillingPolicy {
    /// Check that the policy bounds are consistent.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` naming the first inconsistent field.
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens_per_example == 0 {
            return Err(Error::InvalidInput(
                "max_tokens_per_example must be greater than 0".to_string(),
            ));
        }
        if self.target_epochs == 0 {
            return Err(Error::InvalidInput(
                "target_epochs must be greater than 0".to_string(),
            ));
        }
        if self.min_default_epochs > self.max_default_epochs {
            return Err(Error::InvalidInput(format!(
                "min_default_epochs ({}) exceeds max_default_epochs ({})",
                self.min_default_epochs, self.max_default_epochs
            )));
        }
        if self.min_target_examples > self.max_target_examples {
            return Err(Error::InvalidInput(format!(
                "min_target_examples ({}) exceeds max_target_examples ({})",
                self.min_target_examples, self.max_target_examples
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = BillingPolicy::default();
        assert_eq!(policy.max_tokens_per_example, 4096);
        assert_eq!(policy.target_epochs, 3);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy: BillingPolicy =
            serde_json::from_str(r#"{"max_tokens_per_example": 16385}"#).unwrap();
        assert_eq!(policy.max_tokens_per_example, 16385);
        assert_eq!(policy.max_default_epochs, 25);
        assert_eq!(policy.max_target_examples, 25_000);
    }

    #[test]
    fn test_inverted_epoch_bounds_rejected() {
        let policy = BillingPolicy {
            min_default_epochs: 30,
            ..BillingPolicy::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("min_default_epochs (30)"));
    }

    #[test]
    fn test_zero_target_epochs_rejected() {
        let policy = BillingPolicy {
            target_epochs: 0,
            ..BillingPolicy::default()
        };
        assert!(matches!(policy.validate(), Err(Error::InvalidInput(_))));
    }
}
