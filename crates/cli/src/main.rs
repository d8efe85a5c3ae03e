use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use sat_vision_core::display::{
    accuracy_badge, class_color, confidence_percentage, format_class_name, ConfidenceLevel,
};
use sat_vision_core::session::base_name;
use sat_vision_core::{init, Config, PredictionResult, SatVision, ShotCount};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Satellite image file to classify
    image: Option<PathBuf>,

    /// Few-shot configuration: 1 or 5 examples per class
    #[arg(short, long, default_value_t = 5)]
    shots: u8,

    /// Override the prediction service address from the environment
    #[arg(long)]
    base_url: Option<String>,

    /// Look up and print the result without opening a window
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    // Load config and override the service address if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let shots = ShotCount::try_from(args.shots).context("Invalid --shots value")?;
    let app = SatVision::with_config(config);

    if args.headless {
        let image = args
            .image
            .context("--headless requires an image file argument")?;
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("Image path has no file name")?;
        let name = base_name(&file_name);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner:.green} {msg}")?,
        );
        spinner.set_message(format!("Looking up {} ({}-shot)...", name, shots));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = app.lookup(name, shots).await;
        spinner.finish_and_clear();

        match result {
            Ok(prediction) => print_result(&prediction),
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    app.run_interactive(args.image)
        .context("Failed to run the classifier window")?;

    Ok(())
}

/// Prints a classification result as a terminal report.
fn print_result(prediction: &PredictionResult) {
    let percentage = confidence_percentage(prediction.confidence);
    let level = ConfidenceLevel::from_percentage(percentage);

    println!("{}", accuracy_badge(prediction.correct));
    println!(
        "  Ground Truth:  {} ({:?})",
        format_class_name(&prediction.true_class),
        class_color(&prediction.true_class)
    );
    println!(
        "  AI Prediction: {} ({:?})",
        format_class_name(&prediction.predicted_class),
        class_color(&prediction.predicted_class)
    );
    println!("  Confidence:    {}% / {}", percentage, level);
    println!("  Episode:       {}", prediction.metadata_summary());
}
