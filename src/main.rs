mod cli;
mod error_mapping;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use zipcast_core::{AppError, Config, LookupError};
use zipcast_forecast::{
    AddressQuery, CurrentReading, ForecastCache, PipelineSettings, ResolutionPipeline,
};

use crate::cli::Args;
use crate::error_mapping::IntoLookupError;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Args = argh::from_env();

    if let Err(e) = zipcast_core::init() {
        let e = e.context("failed to initialize logging");
        eprintln!("{:#}", e);
        return ExitCode::from(AppError::from(e).exit_code());
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: &Args) -> Result<(), AppError> {
    let query = if args.stdin {
        None
    } else {
        Some(args.address_query()?)
    };
    let (config, _) = Config::load_validated(args.config.as_deref())?;
    let pipeline = build_pipeline(&config)?;
    let mut stdout = std::io::stdout();

    match query {
        Some(query) => {
            let reading = resolve_one(&pipeline, &query).await?;
            print_reading(&mut stdout, &reading, args.json)
        }
        None => {
            let input = BufReader::new(tokio::io::stdin());
            let summary = resolve_records(&pipeline, input, &mut stdout, args.json).await?;
            tracing::info!(
                resolved = summary.resolved,
                failed = summary.failed,
                "stdin exhausted"
            );
            Ok(())
        }
    }
}

/// Builds the pipeline around the one cache instance of this process.
fn build_pipeline(config: &Config) -> Result<ResolutionPipeline, AppError> {
    let cache = Arc::new(ForecastCache::new(config.cache.ttl()));
    let pipeline = ResolutionPipeline::from_settings(&pipeline_settings(config), cache)
        .map_err(IntoLookupError::into_lookup_error)?;
    Ok(pipeline)
}

fn pipeline_settings(config: &Config) -> PipelineSettings {
    PipelineSettings {
        geocoder_url: config.geocoder.base_url.clone(),
        language: config.geocoder.language.clone(),
        forecast_url: config.forecast.base_url.clone(),
        user_agent: config.http.user_agent.clone(),
        timeout: config.http.timeout(),
    }
}

async fn resolve_one(
    pipeline: &ResolutionPipeline,
    query: &AddressQuery,
) -> Result<CurrentReading, LookupError> {
    pipeline
        .resolve(query)
        .await
        .map_err(IntoLookupError::into_lookup_error)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RecordSummary {
    resolved: usize,
    failed: usize,
}

/// Resolves one record per input line through the shared pipeline.
///
/// A failed lookup is reported on `out` and the loop moves on; only I/O on
/// the streams themselves ends it early. Blank lines are skipped.
async fn resolve_records<R, W>(
    pipeline: &ResolutionPipeline,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<RecordSummary, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut summary = RecordSummary::default();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match cli::parse_record(&line) {
            Ok(query) => resolve_one(pipeline, &query).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(reading) => {
                summary.resolved += 1;
                print_reading(out, &reading, json)?;
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(record = %line, "{}", e);
                writeln!(out, "error: {}", e.user_message())?;
            }
        }
    }

    Ok(summary)
}

fn print_reading<W: Write>(
    out: &mut W,
    reading: &CurrentReading,
    json: bool,
) -> Result<(), AppError> {
    if json {
        let rendered = serde_json::to_string(reading).map_err(|e| AppError::Other(e.into()))?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    writeln!(out, "Current temperature: {}", reading.temperature)?;
    if let Some(detail) = &reading.detailed_forecast {
        writeln!(out, "{}", detail)?;
    }
    Ok(())
}
