//! # finetune-prep: Chat Fine-Tuning Dataset Checks
//!
//! Validates a conversational dataset against the chat fine-tuning schema,
//! counts tokens per example, summarizes the distributions and estimates
//! how many tokens a fine-tuning job will bill.
//!
//! ## Pipeline
//!
//! - **Validate**: count structural problems per kind, never reject
//! - **Account**: per-record total and assistant-only token counts with an
//!   injected encoder
//! - **Summarize**: min/max/mean/median/p10/p90 per metric
//! - **Estimate**: recommended epochs and capped billable tokens
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use finetune_prep::analysis::DatasetAnalyzer;
//! use finetune_prep::dataset::load_jsonl_path;
//! use finetune_prep::tokens::Cl100kEncoder;
//!
//! let records = load_jsonl_path("data/train.jsonl")?;
//! let analyzer = DatasetAnalyzer::new(Cl100kEncoder::new()?);
//! let report = analyzer.analyze(&records)?;
//!
//! for (kind, count) in report.errors.iter() {
//!     println!("{kind}: {count}");
//! }
//! if let Some(estimate) = report.estimate {
//!     println!("~{} billed tokens over {} epochs", estimate.total_billed_tokens, estimate.epochs);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod stats;
pub mod tokens;
pub mod validate;

pub use error::{Error, Result};
