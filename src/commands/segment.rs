use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::SegmentArgs;
use crate::model::SegmentationRunManifest;
use crate::segmenter::Segmenter;
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: SegmentArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input text: {}", args.input.display()))?;

    let document_id = args.document_id.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string())
    });

    info!(
        run_id = %run_id,
        document_id = %document_id,
        profile = args.profile.as_str(),
        chars = text.chars().count(),
        "starting clause segmentation"
    );

    let segmenter = Segmenter::new(args.profile)?;
    let outcome = segmenter
        .segment(&text, &document_id, args.page_count)
        .with_context(|| format!("segmentation failed for document {document_id}"))?;

    for warning in &outcome.warnings {
        warn!(warning = %warning, "segmentation warning");
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("clauses.json"));
    write_json_pretty(&output_path, &outcome.clauses)?;

    let report_path = args.report_path.clone().unwrap_or_else(|| {
        let parent = output_path.parent().map(PathBuf::from).unwrap_or_default();
        parent.join(format!(
            "segment_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    let manifest = SegmentationRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id: run_id.clone(),
        document_id: document_id.clone(),
        profile: segmenter.profile().as_str().to_string(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        method_used: outcome.method.as_str().to_string(),
        page_count: args.page_count,
        text_chars: text.chars().count(),
        counts: outcome.counts.clone(),
        warnings: outcome.warnings.clone(),
        notes: vec![
            "Clause boundaries detected from the extracted text layer using Brazilian legal numbering heuristics.".to_string(),
            "Coordinates are proportional estimates, not glyph geometry.".to_string(),
        ],
    };
    write_json_pretty(&report_path, &manifest)?;

    info!(
        run_id = %run_id,
        clauses = outcome.clauses.len(),
        method = outcome.method.as_str(),
        output = %output_path.display(),
        report = %report_path.display(),
        "segmentation complete"
    );

    Ok(())
}
