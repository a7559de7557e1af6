use regex::Regex;

use crate::cli::Profile;
use crate::model::{CandidateBoundary, PatternKind};
use crate::segmenter::patterns::{
    ParsedNumber, PatternLibrary, hierarchy_level, parse_clause_number,
};
use crate::segmenter::plausibility::{is_probable_header, looks_like_section_header};

/// Runs every pattern over the normalized text and collects all raw
/// candidate boundaries. The result is unordered, may overlap, and may still
/// contain false positives; conflict resolution happens in a later pass.
pub fn detect_boundaries(
    text: &str,
    library: &PatternLibrary,
    profile: Profile,
) -> Vec<CandidateBoundary> {
    let lines = LineIndex::new(text);
    let mut candidates = Vec::new();

    for (kind, regex) in library.entries() {
        collect_for_pattern(text, kind, regex, profile, &lines, &mut candidates);
    }

    candidates
}

fn collect_for_pattern(
    text: &str,
    kind: PatternKind,
    regex: &Regex,
    profile: Profile,
    lines: &LineIndex<'_>,
    candidates: &mut Vec<CandidateBoundary>,
) {
    for captures in regex.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        let number = captures
            .get(1)
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let title = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        if !candidate_is_plausible(kind, profile, number.as_deref(), title.as_deref(), lines, whole.start()) {
            continue;
        }

        candidates.push(CandidateBoundary {
            start: whole.start(),
            end: whole.end(),
            level: hierarchy_level(number.as_deref(), kind),
            number,
            title,
            kind,
            confidence: kind.confidence(),
        });
    }
}

fn candidate_is_plausible(
    kind: PatternKind,
    profile: Profile,
    number: Option<&str>,
    title: Option<&str>,
    lines: &LineIndex<'_>,
    start: usize,
) -> bool {
    match kind {
        PatternKind::Numbered => {
            // An unparsable number means the candidate is discarded, never an error.
            let Some(ParsedNumber::Arabic(_)) = number.and_then(parse_clause_number) else {
                return false;
            };

            if profile == Profile::Strict {
                let line = lines.line_at(start);
                return is_probable_header(
                    lines.line_text(line.wrapping_sub(1)),
                    lines.line_text(line + 1),
                    title.unwrap_or(""),
                );
            }
            true
        }
        PatternKind::Roman => {
            matches!(number.and_then(parse_clause_number), Some(ParsedNumber::Roman(_)))
                && title.is_some_and(looks_like_section_header)
        }
        PatternKind::Secao | PatternKind::Artigo | PatternKind::Paragrafo => {
            // Number is optional for secao, mandatory (by regex) otherwise;
            // when present it must parse as arabic or roman.
            number.is_none() || number.and_then(parse_clause_number).is_some()
        }
        PatternKind::Clausula | PatternKind::Letter => true,
    }
}

/// Precomputed line offsets for mapping a byte position back to its line and
/// neighbors, used by the strict header plausibility filter.
struct LineIndex<'a> {
    offsets: Vec<usize>,
    lines: Vec<&'a str>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut offsets = Vec::new();
        let mut lines = Vec::new();
        let mut offset = 0usize;

        for line in text.split('\n') {
            offsets.push(offset);
            lines.push(line);
            offset += line.len() + 1;
        }

        Self { offsets, lines }
    }

    fn line_at(&self, pos: usize) -> usize {
        self.offsets.partition_point(|&start| start <= pos).saturating_sub(1)
    }

    fn line_text(&self, index: usize) -> &str {
        self.lines.get(index).copied().unwrap_or("")
    }
}
