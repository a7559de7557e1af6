use serde::{Deserialize, Serialize};

/// Heuristic family that produced a boundary. Ordering of the variants
/// mirrors descending detection confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Clausula,
    Numbered,
    Secao,
    Artigo,
    Roman,
    Paragrafo,
    Letter,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clausula => "clausula",
            Self::Numbered => "numbered",
            Self::Secao => "secao",
            Self::Artigo => "artigo",
            Self::Roman => "roman",
            Self::Paragrafo => "paragrafo",
            Self::Letter => "letter",
        }
    }

    pub fn confidence(self) -> f64 {
        match self {
            Self::Clausula => 0.95,
            Self::Numbered => 0.9,
            Self::Secao => 0.85,
            Self::Artigo => 0.8,
            Self::Roman => 0.7,
            Self::Paragrafo => 0.6,
            Self::Letter => 0.5,
        }
    }

    /// Hierarchy depth assumed when the captured number carries no dot
    /// structure of its own.
    pub fn default_level(self) -> u32 {
        match self {
            Self::Paragrafo => 2,
            Self::Letter => 3,
            _ => 1,
        }
    }

    pub fn title_prefix(self) -> &'static str {
        match self {
            Self::Clausula => "CLÁUSULA",
            Self::Numbered => "ITEM",
            Self::Secao | Self::Roman => "SEÇÃO",
            Self::Artigo => "ARTIGO",
            Self::Paragrafo => "PARÁGRAFO",
            Self::Letter => "ALÍNEA",
        }
    }
}

/// What produced a clause: one of the boundary pattern families, or one of
/// the two fallback paths when no usable structure was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    Clausula,
    Numbered,
    Secao,
    Artigo,
    Roman,
    Paragrafo,
    Letter,
    Paragraph,
    Document,
}

impl ClauseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clausula => "clausula",
            Self::Numbered => "numbered",
            Self::Secao => "secao",
            Self::Artigo => "artigo",
            Self::Roman => "roman",
            Self::Paragrafo => "paragrafo",
            Self::Letter => "letter",
            Self::Paragraph => "paragraph",
            Self::Document => "document",
        }
    }
}

impl From<PatternKind> for ClauseKind {
    fn from(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Clausula => Self::Clausula,
            PatternKind::Numbered => Self::Numbered,
            PatternKind::Secao => Self::Secao,
            PatternKind::Artigo => Self::Artigo,
            PatternKind::Roman => Self::Roman,
            PatternKind::Paragrafo => Self::Paragrafo,
            PatternKind::Letter => Self::Letter,
        }
    }
}

/// A detected potential clause start. Offsets are byte positions in the
/// normalized document text; `end` is the end of the header match, not the
/// end of the clause.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateBoundary {
    pub start: usize,
    pub end: usize,
    pub number: Option<String>,
    pub title: Option<String>,
    pub level: u32,
    pub kind: PatternKind,
    pub confidence: f64,
}

/// Estimated page-local coordinates for UI highlighting. Approximate by
/// design: derived from character-offset proportion, not glyph geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
    pub page_number: i64,
    pub page_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    pub clause_id: String,
    pub text: String,
    pub title: String,
    pub level: u32,
    pub clause_number: Option<String>,
    pub kind: ClauseKind,
    pub coordinates: BoundingBox,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentationCounts {
    pub candidates_detected: usize,
    pub candidates_accepted: usize,
    pub clauses_total: usize,
    pub clausula_candidates: usize,
    pub numbered_candidates: usize,
    pub secao_candidates: usize,
    pub artigo_candidates: usize,
    pub roman_candidates: usize,
    pub paragrafo_candidates: usize,
    pub letter_candidates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentationRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub document_id: String,
    pub profile: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub method_used: String,
    pub page_count: i64,
    pub text_chars: usize,
    pub counts: SegmentationCounts,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}
