use crate::model::{BoundingBox, CandidateBoundary, Clause, ClauseKind, PatternKind};
use crate::util::sha256_hex;

// US Letter, points. Margins are heuristic constants for highlight boxes.
pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
pub const PAGE_MARGIN: f64 = 50.0;

/// Converts position-sorted, non-overlapping boundaries into clause records.
/// Span i runs from boundary i's start to boundary i+1's start (document end
/// for the last one). Text before the first boundary is left unattributed.
/// Spans that are empty after trimming are dropped.
pub fn assemble_clauses(
    boundaries: &[CandidateBoundary],
    full_text: &str,
    document_id: &str,
    page_count: i64,
) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(boundaries.len());

    for (index, boundary) in boundaries.iter().enumerate() {
        let start = boundary.start;
        let end = boundaries
            .get(index + 1)
            .map(|next| next.start)
            .unwrap_or(full_text.len());

        let raw = full_text[start..end].trim();
        if raw.is_empty() {
            continue;
        }

        let text = clean_clause_text(raw);
        let clause_id = make_clause_id(
            document_id,
            boundary.kind.as_str(),
            boundary.number.as_deref(),
            &text,
        );
        let title = compose_title(
            boundary.kind,
            boundary.number.as_deref(),
            boundary.title.as_deref(),
        );
        let coordinates = estimate_coordinates(start, end, full_text.len(), page_count);

        clauses.push(Clause {
            clause_id,
            text,
            title,
            level: boundary.level,
            clause_number: boundary.number.clone(),
            kind: boundary.kind.into(),
            coordinates,
        });
    }

    clauses
}

/// Collapses whitespace inside a clause body: runs of blanks containing
/// three or more newlines become a single blank line, shorter newline runs
/// are kept, and anything else shrinks to one space.
pub fn clean_clause_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_newlines = 0usize;
    let mut pending_blank = false;

    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            if ch == '\n' {
                pending_newlines += 1;
            }
            pending_blank = true;
            continue;
        }

        if pending_blank {
            match pending_newlines {
                0 => out.push(' '),
                1 | 2 => {
                    for _ in 0..pending_newlines {
                        out.push('\n');
                    }
                }
                _ => out.push_str("\n\n"),
            }
            pending_newlines = 0;
            pending_blank = false;
        }

        out.push(ch);
    }

    out
}

/// Builds the display title from the pattern prefix plus whatever the match
/// captured, degrading to number-only, title-only, or prefix-only.
pub fn compose_title(kind: PatternKind, number: Option<&str>, title: Option<&str>) -> String {
    let prefix = kind.title_prefix();

    match (number, title) {
        (Some(number), Some(title)) => format!("{prefix} {number} - {title}"),
        (Some(number), None) => format!("{prefix} {number}"),
        (None, Some(title)) => format!("{prefix} - {title}"),
        (None, None) => prefix.to_string(),
    }
}

/// Content-addressed clause identifier: stable across runs for the same
/// document, pattern, number, and leading text.
pub fn make_clause_id(
    document_id: &str,
    kind: &str,
    number: Option<&str>,
    text: &str,
) -> String {
    let sample: String = text.chars().take(200).collect();
    let id_input = format!(
        "{}_{}_{}_{}",
        document_id,
        kind,
        number.unwrap_or("unnumbered"),
        sample.trim()
    );

    format!("clause_{}_{}", kind, &sha256_hex(&id_input)[..12])
}

/// Maps a character span onto an estimated page and vertical band, assuming
/// uniform text distribution across pages. A clause band never exceeds a
/// third of the page height.
pub fn estimate_coordinates(
    start: usize,
    end: usize,
    total_chars: usize,
    total_pages: i64,
) -> BoundingBox {
    if total_chars == 0 || total_pages <= 0 {
        return full_page_box();
    }

    let chars_per_page = total_chars as f64 / total_pages as f64;
    let page = ((start as f64 / chars_per_page) as i64).min(total_pages - 1);

    let char_in_page = start as f64 - page as f64 * chars_per_page;
    let top = ((char_in_page / chars_per_page) * PAGE_HEIGHT).clamp(0.0, PAGE_HEIGHT);

    let span_chars = end.saturating_sub(start) as f64;
    let height = (span_chars / chars_per_page * PAGE_HEIGHT).min(PAGE_HEIGHT / 3.0);

    BoundingBox {
        x0: PAGE_MARGIN,
        x1: PAGE_WIDTH - PAGE_MARGIN,
        top,
        bottom: (top + height).min(PAGE_HEIGHT),
        page_number: page,
        page_height: PAGE_HEIGHT,
    }
}

pub fn full_page_box() -> BoundingBox {
    BoundingBox {
        x0: 0.0,
        x1: PAGE_WIDTH,
        top: 0.0,
        bottom: PAGE_HEIGHT,
        page_number: 0,
        page_height: PAGE_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_spaces_and_blank_line_runs() {
        assert_eq!(clean_clause_text("a  b\tc"), "a b c");
        assert_eq!(clean_clause_text("a\nb"), "a\nb");
        assert_eq!(clean_clause_text("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_clause_text("  leading  "), "leading");
    }

    #[test]
    fn titles_degrade_gracefully() {
        assert_eq!(
            compose_title(PatternKind::Clausula, Some("3"), Some("DA CONVERSÃO")),
            "CLÁUSULA 3 - DA CONVERSÃO"
        );
        assert_eq!(
            compose_title(PatternKind::Numbered, Some("2.1"), Some("DIREITOS")),
            "ITEM 2.1 - DIREITOS"
        );
        assert_eq!(compose_title(PatternKind::Secao, Some("II"), None), "SEÇÃO II");
        assert_eq!(
            compose_title(PatternKind::Letter, None, Some("condição")),
            "ALÍNEA - condição"
        );
        assert_eq!(compose_title(PatternKind::Paragrafo, None, None), "PARÁGRAFO");
    }

    #[test]
    fn clause_ids_are_deterministic_and_kind_prefixed() {
        let first = make_clause_id("doc-1", "clausula", Some("3"), "DA CONVERSÃO texto");
        let second = make_clause_id("doc-1", "clausula", Some("3"), "DA CONVERSÃO texto");
        assert_eq!(first, second);
        assert!(first.starts_with("clause_clausula_"));
        assert_eq!(first.len(), "clause_clausula_".len() + 12);

        let other_doc = make_clause_id("doc-2", "clausula", Some("3"), "DA CONVERSÃO texto");
        assert_ne!(first, other_doc);
    }

    #[test]
    fn coordinates_stay_inside_the_declared_page_range() {
        let bbox = estimate_coordinates(900, 1000, 1000, 2);
        assert_eq!(bbox.page_number, 1);
        assert!(bbox.top >= 0.0 && bbox.top <= PAGE_HEIGHT);
        assert!(bbox.bottom >= bbox.top);
        assert!(bbox.bottom <= PAGE_HEIGHT);

        let band = estimate_coordinates(0, 1000, 1000, 1);
        assert!(band.bottom - band.top <= PAGE_HEIGHT / 3.0 + 1e-9);
    }

    #[test]
    fn degenerate_inputs_get_a_full_page_box() {
        let bbox = estimate_coordinates(0, 0, 0, 3);
        assert_eq!(bbox.page_number, 0);
        assert_eq!(bbox.top, 0.0);
        assert_eq!(bbox.bottom, PAGE_HEIGHT);

        let bbox = estimate_coordinates(10, 20, 100, 0);
        assert_eq!(bbox.bottom, PAGE_HEIGHT);
    }

    #[test]
    fn spans_cover_from_each_boundary_to_the_next() {
        let text = "1. OBJETO\nTexto.\n\n2. VALOR\nTexto2.";
        let boundaries = vec![
            CandidateBoundary {
                start: 0,
                end: 9,
                number: Some("1".to_string()),
                title: Some("OBJETO".to_string()),
                level: 1,
                kind: PatternKind::Numbered,
                confidence: 0.9,
            },
            CandidateBoundary {
                start: 18,
                end: 26,
                number: Some("2".to_string()),
                title: Some("VALOR".to_string()),
                level: 1,
                kind: PatternKind::Numbered,
                confidence: 0.9,
            },
        ];

        let clauses = assemble_clauses(&boundaries, text, "doc-1", 1);
        assert_eq!(clauses.len(), 2);
        assert!(clauses.iter().all(|c| c.kind == ClauseKind::Numbered));
        assert!(clauses[0].text.contains("OBJETO"));
        assert!(clauses[0].text.contains("Texto."));
        assert!(!clauses[0].text.contains("VALOR"));
        assert!(clauses[1].text.contains("Texto2."));
    }
}
