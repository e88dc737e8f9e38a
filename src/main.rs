use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::process;
use storm_report::cli::{self, Args, input_discovery, summary};
use storm_report::pipeline::ReportPipeline;
use storm_report::tables::ReportWriter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    if let Err(error) = run(args).await {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let input_path = match &args.input_path {
        Some(path) => path.clone(),
        None => input_discovery::find_default_input()?,
    };
    let config = args.to_config().context("Invalid arguments")?;

    let pipeline = ReportPipeline::new(input_path)
        .context("Cannot open storm events input")?
        .with_config(config);

    let report = pipeline.process().await.with_context(|| {
        format!(
            "Failed to build report from {}",
            pipeline.input_path().display()
        )
    })?;

    summary::print_report(&report);

    if args.summary_only {
        return Ok(());
    }

    let output_dir = args.get_output_path(pipeline.input_path());
    let writer = ReportWriter::new(output_dir, pipeline.config().output.clone());
    let written = writer
        .write_all(&report)
        .await
        .context("Failed to write report tables")?;

    println!(
        "\n{} {} tables to {}",
        "Wrote".bright_green(),
        written.len().to_string().bright_white().bold(),
        writer.output_dir().display()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        report.processing_time_ms.to_string().bright_white()
    );

    Ok(())
}
