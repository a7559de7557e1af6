use crate::model::{Clause, ClauseKind};
use crate::segmenter::assemble::{estimate_coordinates, full_page_box, make_clause_id};

/// Splits the normalized text into blank-line-delimited paragraphs and
/// promotes each sufficiently long, non-artifact paragraph to a clause.
/// Returns an empty list when fewer than two paragraphs qualify so the
/// caller can fall through to the single-clause terminal state.
pub fn paragraph_clauses(
    text: &str,
    document_id: &str,
    page_count: i64,
    min_paragraph_chars: usize,
) -> Vec<Clause> {
    let total_chars = text.len();
    let mut clauses = Vec::new();
    let mut cursor = 0usize;
    let mut ordinal = 0usize;

    for paragraph in text.trim().split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.chars().count() <= min_paragraph_chars || is_page_marker(paragraph) {
            continue;
        }

        let start = text[cursor..]
            .find(paragraph)
            .map(|offset| cursor + offset)
            .unwrap_or(cursor);
        let end = start + paragraph.len();
        cursor = end;
        ordinal += 1;

        let mut snippet: String = paragraph.chars().take(50).collect();
        if paragraph.chars().count() > 50 {
            snippet.push_str("...");
        }

        clauses.push(Clause {
            clause_id: make_clause_id(
                document_id,
                ClauseKind::Paragraph.as_str(),
                Some(&ordinal.to_string()),
                paragraph,
            ),
            text: paragraph.to_string(),
            title: format!("Parágrafo {}: {}", ordinal, snippet.trim()),
            level: 1,
            clause_number: None,
            kind: ClauseKind::Paragraph,
            coordinates: estimate_coordinates(start, end, total_chars, page_count),
        });
    }

    if clauses.len() < 2 {
        return Vec::new();
    }

    clauses
}

/// Terminal fallback: the whole document as one clause. Always succeeds.
pub fn single_clause(text: &str, document_id: &str) -> Clause {
    Clause {
        clause_id: make_clause_id(document_id, ClauseKind::Document.as_str(), None, text),
        text: text.to_string(),
        title: "Documento Completo".to_string(),
        level: 1,
        clause_number: None,
        kind: ClauseKind::Document,
        coordinates: full_page_box(),
    }
}

/// Page-break artifacts introduced by the text extractor, e.g.
/// "--- Página 4 ---" or stray "Página 4" references.
fn is_page_marker(paragraph: &str) -> bool {
    let lowered = paragraph.to_lowercase();
    if lowered.starts_with("página") || lowered.starts_with("pagina") {
        return true;
    }

    lowered.starts_with("---")
        && lowered.ends_with("---")
        && (lowered.contains("página") || lowered.contains("pagina"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_paragraph(seed: &str) -> String {
        format!(
            "{seed} estabelece as condições gerais aplicáveis ao investimento realizado, \
             incluindo prazos, valores e obrigações assumidas pelas partes contratantes."
        )
    }

    #[test]
    fn two_long_paragraphs_become_two_clauses() {
        let text = format!("{}\n\n{}", long_paragraph("Primeiro"), long_paragraph("Segundo"));
        let clauses = paragraph_clauses(&text, "doc-1", 1, 100);

        assert_eq!(clauses.len(), 2);
        assert!(clauses[0].title.starts_with("Parágrafo 1:"));
        assert!(clauses[1].title.starts_with("Parágrafo 2:"));
        assert!(clauses[0].clause_id.starts_with("clause_paragraph_"));
        assert!(clauses.iter().all(|c| c.kind == ClauseKind::Paragraph));
    }

    #[test]
    fn short_paragraphs_and_page_markers_are_skipped() {
        let text = format!(
            "curto\n\n--- Página 2 ---\n\n{}\n\n{}",
            long_paragraph("Primeiro"),
            long_paragraph("Segundo")
        );
        let clauses = paragraph_clauses(&text, "doc-1", 1, 100);
        assert_eq!(clauses.len(), 2);
        assert!(clauses.iter().all(|c| !c.text.contains("Página")));
    }

    #[test]
    fn fewer_than_two_paragraphs_yields_nothing() {
        let clauses = paragraph_clauses(&long_paragraph("Único"), "doc-1", 1, 100);
        assert!(clauses.is_empty());
    }

    #[test]
    fn single_clause_wraps_the_whole_document() {
        let clause = single_clause("Texto integral do contrato.", "doc-1");
        assert_eq!(clause.title, "Documento Completo");
        assert_eq!(clause.text, "Texto integral do contrato.");
        assert_eq!(clause.coordinates.page_number, 0);
        assert!(clause.clause_id.starts_with("clause_document_"));
    }
}
