use anyhow::{Context, Result, bail};
use clap::Parser;
use md2docx_config::Config;
use md2docx_engine::{ConversionReport, convert_file, derive_output_path};
use std::path::{Path, PathBuf};

/// Template looked up in the working directory when neither the command line
/// nor the config file names one.
const DEFAULT_TEMPLATE: &str = "to-word-template.docx";

/// Convert a house-style markdown file into a Word document.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Markdown file to convert.
    input: PathBuf,

    /// Word template whose styles and page setup are used.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output .docx path. Defaults to the input path with a .docx extension.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Config file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let Some(config_path) = explicit else {
        log::debug!("Config path: {}", Config::config_path().display());
        let config = Config::load().context("Failed to load config file")?;
        return Ok(config.unwrap_or_default());
    };

    log::debug!("Config path: {}", config_path.display());
    Config::load_from_path(config_path)
        .with_context(|| format!("Failed to load config file '{}'", config_path.display()))?
        .with_context(|| format!("Config file '{}' does not exist", config_path.display()))
}

fn print_report(report: &ConversionReport) {
    println!("Conversion complete! Document saved to {}", report.output.display());
    println!();
    println!("Note: The converter has made its best attempt to match the formatting.");
    println!("      Please open '{}' to verify the result.", report.output.display());
    println!("      Text wrapped in ** markdown has been converted to bold formatting.");
    println!("      Code blocks have a light gray background for readability.");
    println!("      Callouts like '【避坑指南】' have an orange title bar with white text.");
    println!("      Numbered lists keep their original '(1)' formatting.");

    let summary = report.summary;
    if summary.placeholders > 0 {
        println!(
            "      {} image(s) could not be embedded; look for '[Image' placeholders.",
            summary.placeholders
        );
    }
    if summary.fallbacks > 0 {
        println!(
            "      {} style(s) were missing from the template and were approximated.",
            summary.fallbacks
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if !args.input.is_file() {
        bail!("Input file '{}' does not exist", args.input.display());
    }

    let template = args
        .template
        .clone()
        .or_else(|| config.template.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE));
    if !template.is_file() {
        bail!("Template file '{}' does not exist", template.display());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&args.input));
    log::info!(
        "Converting {} with template {}",
        args.input.display(),
        template.display()
    );

    let report = convert_file(&args.input, &template, &output, &config.to_options())
        .with_context(|| format!("Failed to convert '{}'", args.input.display()))?;
    print_report(&report);
    Ok(())
}
