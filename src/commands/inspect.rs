use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InspectArgs;
use crate::model::CandidateBoundary;
use crate::segmenter::{Segmenter, normalize, resolve};

#[derive(Debug, Serialize)]
struct InspectReport {
    profile: String,
    text_chars: usize,
    candidates: Vec<CandidateBoundary>,
    resolved: Vec<CandidateBoundary>,
}

/// Dumps raw boundary candidates and the post-resolution survivors as JSON
/// on stdout, for pattern tuning against real contract text.
pub fn run(args: InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input text: {}", args.input.display()))?;

    let segmenter = Segmenter::new(args.profile)?;
    let normalized = normalize::normalize_text(&text);
    let candidates = segmenter.detect(&normalized);
    let resolved = resolve::resolve_overlaps(candidates.clone());

    info!(
        candidates = candidates.len(),
        resolved = resolved.len(),
        profile = args.profile.as_str(),
        "boundary inspection"
    );

    let report = InspectReport {
        profile: segmenter.profile().as_str().to_string(),
        text_chars: normalized.chars().count(),
        candidates,
        resolved,
    };

    let rendered =
        serde_json::to_string_pretty(&report).context("failed to render inspection report")?;
    println!("{rendered}");

    Ok(())
}
