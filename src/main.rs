//! Act extractor: extractive compliance analysis of legislative documents

use act_extractor::cli::{self, Cli, Commands, ConfigAction};
use act_extractor::config::Config;
use act_extractor::error::{ActExtractorError, Result};
use act_extractor::input::InputManager;
use act_extractor::output::{ArtifactWriter, ReportGenerator, RunReport};
use act_extractor::processing::AnalysisEngine;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Run {
            input,
            output_dir,
            format,
            no_ocr,
            no_color,
        } => {
            if let Some(input) = input {
                config.input.pdf_path = input;
            }
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }
            if let Some(format) = format {
                config.output.format = cli::parse_output_format(&format)
                    .map_err(ActExtractorError::InvalidInput)?;
            }
            if no_ocr {
                config.input.ocr.enabled = false;
            }
            if no_color {
                config.output.color_output = false;
            }

            run_pipeline(&config).await
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ActExtractorError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save()?;
                    println!("Configuration reset: {}", Config::config_path().display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", Config::config_path().display());
                }
            }
            Ok(())
        }
    }
}

async fn run_pipeline(config: &Config) -> Result<()> {
    let input: &PathBuf = &config.input.pdf_path;
    cli::validate_file_extension(input, &["pdf", "txt"])
        .map_err(|e| ActExtractorError::InvalidInput(format!("{}: {}", input.display(), e)))?;

    // Fail on a bad rule list before any extraction work
    let engine = AnalysisEngine::new(&config.analysis)?;

    info!("Processing {}", input.display());
    let input_manager = InputManager::from_config(&config.input)
        .with_progress(config.output.show_progress);
    let extracted = input_manager.extract_document(input).await?;

    if extracted.stats.ocr_failures > 0 {
        warn!("{} pages could not be recovered by OCR", extracted.stats.ocr_failures);
    }

    let analysis = engine.analyze(extracted)?;

    let writer = ArtifactWriter::from_config(&config.output);
    writer.write_all(&analysis)?;

    let report = RunReport::build(&analysis, writer.inventory(), config.analysis.confidence_floor);
    let generator = ReportGenerator::with_options(config.output.color_output, true);
    println!("{}", generator.generate_report(&report, &config.output.format)?);

    Ok(())
}
