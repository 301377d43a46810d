//! Sample source: loads amplitude envelopes from JSON.
//!
//! Accepts either a bare array of numbers or an object carrying the array in a
//! `data` field, which is the shape hosted waveform services return.

use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum SampleDocument {
    Plain(Vec<f64>),
    Wrapped { data: Vec<f64> },
}

/// Parses a JSON sample document.
///
/// Samples outside `[0, 1]` are accepted but logged, since they will render
/// outside the surface.
///
/// # Errors
/// - If the JSON is malformed or not one of the accepted shapes
/// - If the document contains no samples
pub fn parse_samples(json: &str) -> anyhow::Result<Vec<f64>> {
    let document: SampleDocument = serde_json::from_str(json)
        .map_err(|e| anyhow!("Expected a JSON array of numbers or {{\"data\": [...]}}: {e}"))?;

    let samples = match document {
        SampleDocument::Plain(samples) | SampleDocument::Wrapped { data: samples } => samples,
    };

    if samples.is_empty() {
        return Err(anyhow!("Sample document contains no samples"));
    }

    let out_of_range = samples
        .iter()
        .filter(|s| !(0.0..=1.0).contains(*s))
        .count();
    if out_of_range > 0 {
        tracing::warn!(
            "{} of {} samples fall outside [0, 1]; bars will overflow the surface",
            out_of_range,
            samples.len()
        );
    }

    Ok(samples)
}

/// Loads samples from a file, or from stdin when `path` is `-`.
///
/// # Errors
/// - If the input cannot be read
/// - If the contents fail [`parse_samples`]
pub fn load_samples(path: &Path) -> anyhow::Result<Vec<f64>> {
    let json = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read samples from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample file {}", path.display()))?
    };

    let samples = parse_samples(&json)?;
    tracing::info!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}
