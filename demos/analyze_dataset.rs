//! Dataset Analysis Example
//!
//! Validates a chat fine-tuning JSONL file and prints token statistics and
//! the training cost estimate.
//!
//! Run with: cargo run --example analyze_dataset -- data/train.jsonl [--json]

use anyhow::{bail, Context, Result};
use finetune_prep::analysis::{DatasetAnalyzer, DatasetReport};
use finetune_prep::dataset::load_jsonl_path;
use finetune_prep::stats::DistributionSummary;
use finetune_prep::tokens::Cl100kEncoder;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut path = None;
    let mut as_json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            _ if path.is_none() => path = Some(arg),
            _ => bail!("unexpected argument: {arg}"),
        }
    }
    let Some(path) = path else {
        bail!("usage: analyze_dataset <train.jsonl> [--json]");
    };

    let records = load_jsonl_path(&path).with_context(|| format!("loading {path}"))?;
    let analyzer = DatasetAnalyzer::new(Cl100kEncoder::new()?);
    let report = analyzer
        .analyze(&records)
        .with_context(|| format!("analyzing {path}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, analyzer.policy().max_tokens_per_example);
    }
    Ok(())
}

fn print_report(report: &DatasetReport, max_tokens_per_example: usize) {
    println!("=== Dataset: {} examples ===\n", report.n_examples);

    if report.is_clean() {
        println!("No errors found");
    } else {
        println!("Found errors:");
        for (kind, count) in report.errors.iter() {
            println!("  {kind}: {count}");
        }
    }
    if report.n_untyped > 0 {
        println!("{} examples skipped for token counts", report.n_untyped);
    }

    println!("\nNum examples missing system message: {}", report.n_missing_system);
    println!("Num examples missing user message: {}", report.n_missing_user);

    print_distribution("num_messages_per_example", report.messages_per_example.as_ref());
    print_distribution("num_total_tokens_per_example", report.total_tokens_per_example.as_ref());
    print_distribution(
        "num_assistant_tokens_per_example",
        report.assistant_tokens_per_example.as_ref(),
    );

    println!(
        "\n{} examples may be over the {max_tokens_per_example} token limit, they will be truncated during fine-tuning",
        report.n_too_long
    );

    if let Some(estimate) = report.estimate {
        println!(
            "\nDataset has ~{} tokens that will be charged for during training",
            estimate.billable_tokens
        );
        println!("By default, you'll train for {} epochs on this dataset", estimate.epochs);
        println!(
            "By default, you'll be charged for ~{} tokens",
            estimate.total_billed_tokens
        );
    }
}

fn print_distribution(name: &str, summary: Option<&DistributionSummary>) {
    println!("\n#### Distribution of {name}:");
    match summary {
        Some(summary) => println!("{summary}"),
        None => println!("(no examples)"),
    }
}
