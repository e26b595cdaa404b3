use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tokio::runtime::Builder;
use tracing::{debug, info};

use xss_sanitizer::batch::BatchProcessor;
use xss_sanitizer::cli::{Cli, Commands};
use xss_sanitizer::{SanitizeOptions, UrlOptions, Value};

fn main() -> Result<()> {
    let num_cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    // Sanitization itself runs on rayon; tokio only drives file IO
    let worker_threads = std::cmp::min(num_cpus + 2, 16);

    debug!("Configuring Tokio runtime with {} worker threads", worker_threads);

    let runtime = Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sanitizer = cli.sanitizer()?;
    let options = SanitizeOptions::default();

    match &cli.command {
        Commands::Html { value } => {
            let sanitized = sanitizer.sanitize_html(value)?;
            println!("{}", sanitized);
        }
        Commands::Url {
            url,
            protocol_optional,
        } => {
            let url_options = UrlOptions {
                is_protocol_required: !protocol_optional,
            };
            println!("{}", sanitizer.sanitize_url(url, url_options));
        }
        Commands::Json { input_file, pretty } => {
            let input = match input_file {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {:?}", path))?,
                None => {
                    let mut input = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut input)
                        .await
                        .context("Failed to read stdin")?;
                    input
                }
            };
            let value: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;
            let sanitized = sanitizer.sanitize(&value, &options);
            if *pretty {
                println!("{}", serde_json::to_string_pretty(&sanitized)?);
            } else {
                println!("{}", serde_json::to_string(&sanitized)?);
            }
        }
        Commands::Validate { value } => {
            let value = Value::from(value.as_str());
            let result = sanitizer.validate(&value, &options);
            println!("{}", serde_json::to_string(&result)?);
        }
        Commands::Batch {
            input_file,
            output_file,
            chunk_size,
        } => {
            info!("Processing batch from file: {:?}", input_file);
            let processor = BatchProcessor::new(sanitizer, options);
            let summary = processor
                .process_batch(input_file, output_file.as_ref(), *chunk_size)
                .await?;
            info!(
                "Processed {} records ({} rewritten, {} errors)",
                summary.records, summary.rewritten, summary.errors
            );
        }
    }

    Ok(())
}
