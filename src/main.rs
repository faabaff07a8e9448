use anyhow::Context;
use clap::Parser;
use ralf_generator::cli::Args;
use ralf_generator::processor::{RalfProcessor, print_summary};
use ralf_generator::RalfError;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args);

    let result = tokio::select! {
        result = run(&args) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nReceived CTRL+C, shutting down...");
            Err(RalfError::processing_interrupted("Conversion interrupted by user").into())
        }
    };

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.build_config().context("Failed to load configuration")?;
    let inputs = args.resolve_inputs()?;
    let jobs = args.build_jobs(&inputs)?;

    let processor = RalfProcessor::new(config)?;

    if args.stdout {
        let input = &jobs[0].input;
        let generated = processor
            .render_file(input)
            .await
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        println!("{}", generated.text);
        return Ok(());
    }

    if let [job] = jobs.as_slice() {
        processor
            .convert_file(&job.input, &job.output)
            .await
            .with_context(|| format!("Failed to convert {}", job.input.display()))?;
        if args.show_progress() {
            println!("Generated RALF: {}", job.output.display());
        }
        return Ok(());
    }

    let summary = processor.convert_batch(&jobs, args.show_progress()).await;
    if args.show_progress() {
        print_summary(&summary);
    }

    if !summary.is_success() {
        anyhow::bail!(
            "{} of {} inputs failed to convert",
            summary.failed.len(),
            jobs.len()
        );
    }

    Ok(())
}

fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ralf_generator={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
