//! Streaming batch sanitization of JSON-lines input
//!
//! Each non-blank line of the input that does not start with `#` is parsed as
//! one JSON document, validated and written back as one JSON record. Lines are
//! read in chunks; every chunk is sanitized on the rayon pool from a blocking
//! task so the async reader and writer never stall on CPU work.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader},
};
use tracing::{debug, info};

use crate::config::SanitizeOptions;
use crate::sanitize::Sanitizer;
use crate::value::Value;

/// Result for one input line
///
/// # Examples
///
/// ```
/// use xss_sanitizer::batch::BatchProcessor;
/// use xss_sanitizer::{Sanitizer, SanitizeOptions};
///
/// let processor = BatchProcessor::new(Sanitizer::new(), SanitizeOptions::default());
/// let record = processor.process_line(3, r#"{"title": "<script>x</script>"}"#);
///
/// assert_eq!(record.line, 3);
/// assert!(!record.is_valid);
/// assert!(record.error.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    /// One-based line number in the input
    pub line: usize,
    /// Whether the document was already safe
    pub is_valid: bool,
    /// The sanitized document; null when the line was not valid JSON
    pub sanitized: Value,
    /// Parse error for lines that are not valid JSON
    pub error: Option<String>,
}

/// Totals over one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub records: usize,
    pub valid: usize,
    pub rewritten: usize,
    pub errors: usize,
}

impl BatchSummary {
    fn add(&mut self, record: &BatchRecord) {
        self.records += 1;
        if record.error.is_some() {
            self.errors += 1;
        } else if record.is_valid {
            self.valid += 1;
        } else {
            self.rewritten += 1;
        }
    }
}

/// Sanitizes JSON-lines documents with a shared [`Sanitizer`]
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    sanitizer: Sanitizer,
    options: SanitizeOptions,
}

impl BatchProcessor {
    pub fn new(sanitizer: Sanitizer, options: SanitizeOptions) -> Self {
        Self { sanitizer, options }
    }

    /// Parses and validates a single line
    pub fn process_line(&self, line: usize, text: &str) -> BatchRecord {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                let result = self.sanitizer.validate(&value, &self.options);
                BatchRecord {
                    line,
                    is_valid: result.is_valid,
                    sanitized: result.sanitized.into_owned(),
                    error: None,
                }
            }
            Err(e) => {
                debug!("Line {} is not valid JSON: {}", line, e);
                BatchRecord {
                    line,
                    is_valid: false,
                    sanitized: Value::Null,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Processes a JSON-lines file
    ///
    /// # Arguments
    /// * `input_file` - File with one JSON document per line
    /// * `output_file` - Destination for the records; stdout when `None`
    /// * `chunk_size` - Number of lines sanitized together
    ///
    /// # Returns
    /// * `Result<BatchSummary>` - Totals, or an error if a file could not be
    ///   opened, read or written
    ///
    /// # Examples
    /// ```no_run
    /// # use xss_sanitizer::batch::BatchProcessor;
    /// # use xss_sanitizer::{Sanitizer, SanitizeOptions};
    /// # use std::path::{Path, PathBuf};
    /// # async fn example() -> anyhow::Result<()> {
    /// let processor = BatchProcessor::new(Sanitizer::new(), SanitizeOptions::default());
    /// let summary = processor
    ///     .process_batch(Path::new("posts.jsonl"), Some(&PathBuf::from("clean.jsonl")), 500)
    ///     .await?;
    /// println!("{} records rewritten", summary.rewritten);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn process_batch(
        &self,
        input_file: &Path,
        output_file: Option<&PathBuf>,
        chunk_size: usize,
    ) -> Result<BatchSummary> {
        let file = File::open(input_file)
            .await
            .with_context(|| format!("Failed to open input file: {:?}", input_file))?;
        let reader = BufReader::with_capacity(64 * 1024, file);

        info!("Processing {} in streaming mode", input_file.display());

        match output_file {
            Some(path) => {
                let writer = OpenOptions::new()
                    .create(true)
                    .truncate(true)
                    .write(true)
                    .open(path)
                    .await
                    .with_context(|| format!("Failed to create output file: {:?}", path))?;
                self.process_stream(reader, writer, chunk_size).await
            }
            None => {
                self.process_stream(reader, tokio::io::stdout(), chunk_size)
                    .await
            }
        }
    }

    /// Processes JSON lines from any async reader into any async writer
    pub async fn process_stream<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        chunk_size: usize,
    ) -> Result<BatchSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let chunk_size = chunk_size.max(1);
        let mut summary = BatchSummary::default();
        let mut chunk: Vec<(usize, String)> = Vec::with_capacity(chunk_size);
        let mut line = String::new();
        let mut line_number = 0;

        loop {
            line.clear();
            let bytes_read = reader
                .read_line(&mut line)
                .await
                .context("Failed to read input line")?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;

            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            chunk.push((line_number, text.to_string()));

            if chunk.len() >= chunk_size {
                info!(
                    "Processing chunk of {} lines ({} total so far)",
                    chunk.len(),
                    summary.records + chunk.len()
                );
                let records = self.process_chunk(std::mem::take(&mut chunk)).await?;
                write_records(&mut writer, &records, &mut summary).await?;
            }
        }

        if !chunk.is_empty() {
            info!("Processing final chunk of {} lines", chunk.len());
            let records = self.process_chunk(chunk).await?;
            write_records(&mut writer, &records, &mut summary).await?;
        }

        info!(
            records = summary.records,
            rewritten = summary.rewritten,
            errors = summary.errors,
            "Batch processing completed"
        );
        Ok(summary)
    }

    async fn process_chunk(&self, chunk: Vec<(usize, String)>) -> Result<Vec<BatchRecord>> {
        let processor = self.clone();
        tokio::task::spawn_blocking(move || {
            chunk
                .par_iter()
                .map(|(line, text)| processor.process_line(*line, text))
                .collect()
        })
        .await
        .context("Sanitization worker failed")
    }
}

async fn write_records<W>(
    writer: &mut W,
    records: &[BatchRecord],
    summary: &mut BatchSummary,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for record in records {
        let mut json_line = serde_json::to_string(record)?;
        json_line.push('\n');
        writer
            .write_all(json_line.as_bytes())
            .await
            .context("Failed to write record")?;
        summary.add(record);
    }
    writer.flush().await.context("Failed to flush output")?;
    Ok(())
}
