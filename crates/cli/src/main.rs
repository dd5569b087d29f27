use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use shotcoach_core::feedback::formatter::gate_summary;
use shotcoach_core::{compare, CompareConfig, CompareMode, Comparison, FrameAnalysis};

/// Compare a camera frame against a reference composition.
///
/// Both inputs are frame-analysis JSON files: pixel shape, extracted
/// keypoints, and an optional background-compression index.
#[derive(Parser)]
#[command(name = "shotcoach")]
struct Cli {
    /// Current frame analysis (JSON).
    current: PathBuf,

    /// Reference frame analysis (JSON).
    reference: PathBuf,

    /// Evaluate every gate instead of stopping at the first failure.
    #[arg(long)]
    full_analysis: bool,

    /// Emit the comparison as JSON instead of a human report.
    #[arg(long)]
    json: bool,

    /// Compression index for the current frame, overriding the file.
    #[arg(long)]
    current_compression: Option<f64>,

    /// Compression index for the reference frame, overriding the file.
    #[arg(long)]
    reference_compression: Option<f64>,

    /// Minimum aspect-ratio gate score to pass.
    #[arg(long, default_value = "90")]
    aspect_threshold: f64,

    /// Minimum framing gate score to pass.
    #[arg(long, default_value = "70")]
    framing_threshold: f64,

    /// Minimum composition gate score to pass.
    #[arg(long, default_value = "75")]
    composition_threshold: f64,

    /// Minimum compression gate score to pass.
    #[arg(long, default_value = "80")]
    compression_threshold: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut current = load_analysis(&cli.current)?;
    let mut reference = load_analysis(&cli.reference)?;

    if let Some(value) = cli.current_compression {
        current.compression = Some(value);
    }
    if let Some(value) = cli.reference_compression {
        reference.compression = Some(value);
    }

    let mut config = CompareConfig::default();
    config.thresholds.aspect_ratio = cli.aspect_threshold;
    config.thresholds.framing = cli.framing_threshold;
    config.thresholds.composition = cli.composition_threshold;
    config.thresholds.compression = cli.compression_threshold;

    let mode = if cli.full_analysis {
        CompareMode::FullAnalysis
    } else {
        CompareMode::Production
    };

    log::info!(
        "comparing {} against {}",
        cli.current.display(),
        cli.reference.display()
    );
    let result = compare(&current, &reference, mode, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn load_analysis(path: &PathBuf) -> Result<FrameAnalysis, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let analysis: FrameAnalysis = serde_json::from_str(&data)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(analysis)
}

fn print_report(result: &Comparison) {
    println!(
        "Status: {} ({})",
        result.status.name(),
        result.status.guidance()
    );
    println!("Overall score: {:.0}/100", result.overall_score);
    println!();
    println!("{}", gate_summary(&result.gates));

    let warnings: Vec<&String> = result
        .gates
        .framing
        .as_ref()
        .and_then(|gate| gate.feedback.as_ref())
        .map(|analysis| analysis.feedback.warnings.iter().collect())
        .unwrap_or_default();
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in warnings {
            println!("  ! {warning}");
        }
    }

    if !result.actions.is_empty() {
        println!();
        println!("Actions:");
        for action in &result.actions {
            let mut line = format!("  {}. {}", action.priority, action.action_text);
            if let Some(amount) = &action.amount {
                line.push_str(&format!(" [{amount}]"));
            }
            println!("{line}");
        }
    }

    let remaining = result.remaining_gates();
    if !remaining.is_empty() {
        let labels: Vec<&str> = remaining.iter().map(|g| g.label()).collect();
        println!();
        println!("Not yet evaluated: {}", labels.join(", "));
    }

    println!();
    println!("Summary: {}", result.summary);
}
