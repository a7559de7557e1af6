use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::Profile;
use crate::model::{CandidateBoundary, Clause, PatternKind, SegmentationCounts};

pub mod assemble;
pub mod detect;
pub mod fallback;
pub mod normalize;
pub mod patterns;
pub mod plausibility;
pub mod resolve;

use patterns::PatternLibrary;

/// Structurally invalid input. Anything short of this degrades through the
/// fallback chain instead of failing, since a partial segmentation is more
/// useful downstream than no segmentation at all.
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("invalid page count {page_count} for a non-empty document")]
    InvalidPageCount { page_count: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMethod {
    Structured,
    ParagraphFallback,
    SingleClause,
}

impl SegmentationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::ParagraphFallback => "paragraph_fallback",
            Self::SingleClause => "single_clause",
        }
    }
}

#[derive(Debug)]
pub struct SegmentationOutcome {
    pub clauses: Vec<Clause>,
    pub method: SegmentationMethod,
    pub counts: SegmentationCounts,
    pub warnings: Vec<String>,
}

/// Clause segmentation engine for Brazilian investment contracts.
///
/// Pure and synchronous: patterns are compiled once at construction and the
/// engine holds no other state, so one instance may serve concurrent
/// documents.
#[derive(Debug)]
pub struct Segmenter {
    profile: Profile,
    library: PatternLibrary,
}

impl Segmenter {
    pub fn new(profile: Profile) -> Result<Self> {
        Ok(Self {
            profile,
            library: PatternLibrary::new(profile)?,
        })
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Raw candidate boundaries for `text` (expected pre-normalized),
    /// before overlap resolution. Exposed for inspection tooling.
    pub fn detect(&self, text: &str) -> Vec<CandidateBoundary> {
        detect::detect_boundaries(text, &self.library, self.profile)
    }

    /// Segments a document into an ordered, non-overlapping clause list.
    ///
    /// Empty text yields an empty clause list. When structured detection
    /// finds too few clauses for the active profile, the paragraph fallback
    /// runs; when that also fails, the whole document becomes one clause.
    pub fn segment(
        &self,
        full_text: &str,
        document_id: &str,
        page_count: i64,
    ) -> Result<SegmentationOutcome, SegmentError> {
        if page_count < 0 && !full_text.trim().is_empty() {
            return Err(SegmentError::InvalidPageCount { page_count });
        }

        let text = normalize::normalize_text(full_text);
        let mut warnings = Vec::new();

        if text.trim().is_empty() {
            warn!(document_id, "no text available for clause segmentation");
            warnings.push("document contained no text".to_string());
            return Ok(SegmentationOutcome {
                clauses: Vec::new(),
                method: SegmentationMethod::Structured,
                counts: SegmentationCounts::default(),
                warnings,
            });
        }

        let candidates = self.detect(&text);
        let mut counts = count_candidates(&candidates);
        debug!(
            document_id,
            candidates = candidates.len(),
            "collected raw boundary candidates"
        );

        let accepted = resolve::resolve_overlaps(candidates);
        counts.candidates_accepted = accepted.len();

        let clauses = assemble::assemble_clauses(&accepted, &text, document_id, page_count);
        let minimum = structured_minimum(self.profile);

        if clauses.len() >= minimum {
            info!(
                document_id,
                clauses = clauses.len(),
                "structured segmentation accepted"
            );
            counts.clauses_total = clauses.len();
            return Ok(SegmentationOutcome {
                clauses,
                method: SegmentationMethod::Structured,
                counts,
                warnings,
            });
        }

        warnings.push(format!(
            "structured detection produced {} clauses (minimum {}), using paragraph fallback",
            clauses.len(),
            minimum
        ));

        let paragraphs = fallback::paragraph_clauses(
            &text,
            document_id,
            page_count,
            paragraph_minimum_chars(self.profile),
        );
        if !paragraphs.is_empty() {
            info!(
                document_id,
                clauses = paragraphs.len(),
                "paragraph fallback accepted"
            );
            counts.clauses_total = paragraphs.len();
            return Ok(SegmentationOutcome {
                clauses: paragraphs,
                method: SegmentationMethod::ParagraphFallback,
                counts,
                warnings,
            });
        }

        warnings.push("paragraph fallback yielded too few paragraphs, using single clause".to_string());
        counts.clauses_total = 1;
        Ok(SegmentationOutcome {
            clauses: vec![fallback::single_clause(&text, document_id)],
            method: SegmentationMethod::SingleClause,
            counts,
            warnings,
        })
    }
}

/// Minimum structured clause count per profile before falling back.
fn structured_minimum(profile: Profile) -> usize {
    match profile {
        Profile::Loose => 1,
        Profile::Strict => 3,
    }
}

fn paragraph_minimum_chars(profile: Profile) -> usize {
    match profile {
        Profile::Loose => 50,
        Profile::Strict => 100,
    }
}

fn count_candidates(candidates: &[CandidateBoundary]) -> SegmentationCounts {
    let mut counts = SegmentationCounts {
        candidates_detected: candidates.len(),
        ..SegmentationCounts::default()
    };

    for candidate in candidates {
        match candidate.kind {
            PatternKind::Clausula => counts.clausula_candidates += 1,
            PatternKind::Numbered => counts.numbered_candidates += 1,
            PatternKind::Secao => counts.secao_candidates += 1,
            PatternKind::Artigo => counts.artigo_candidates += 1,
            PatternKind::Roman => counts.roman_candidates += 1,
            PatternKind::Paragrafo => counts.paragrafo_candidates += 1,
            PatternKind::Letter => counts.letter_candidates += 1,
        }
    }

    counts
}
