//! Header plausibility heuristics. Two consumers: the strict numbered
//! detector runs `is_probable_header` with line context to reject numbers
//! that merely continue a sentence, and the roman detector runs
//! `looks_like_section_header` against Portuguese section vocabulary.
//! Thresholds are tuned, not exact.

const PT_STOPWORDS: &[&str] = &[
    "de", "da", "do", "das", "dos", "e", "a", "o", "as", "os", "para", "por", "em", "no", "na",
    "nos", "nas", "um", "uma",
];

const SECTION_KEYWORDS: &[&str] = &[
    "OBJETO",
    "FINALIDADE",
    "PROPÓSITO",
    "PARTES",
    "QUALIFICAÇÃO",
    "DEFINIÇÕES",
    "CONCEITOS",
    "TERMOS",
    "INVESTIMENTO",
    "VALOR",
    "MONTANTE",
    "CONVERSÃO",
    "TRANSFORMAÇÃO",
    "DIREITOS",
    "PRERROGATIVAS",
    "OBRIGAÇÕES",
    "DEVERES",
    "COMPROMISSOS",
    "GOVERNANÇA",
    "ADMINISTRAÇÃO",
    "INFORMAÇÕES",
    "TRANSFERÊNCIA",
    "CESSÃO",
    "ALIENAÇÃO",
    "LIQUIDAÇÃO",
    "DISSOLUÇÃO",
    "PRAZO",
    "VIGÊNCIA",
    "DURAÇÃO",
    "FORO",
    "JURISDIÇÃO",
    // Portuguese contracted articles and generic header vocabulary.
    "DO",
    "DA",
    "DOS",
    "DAS",
    "SOBRE",
    "ACERCA",
    "TERMO",
    "ACORDO",
    "FORMA",
    "MODO",
    "CONDIÇÕES",
    "CONDICOES",
];

pub fn upper_ratio(text: &str) -> f64 {
    let letters: Vec<char> = text.chars().filter(|ch| ch.is_alphabetic()).collect();
    if letters.is_empty() {
        return 0.0;
    }
    let upper = letters.iter().filter(|ch| ch.is_uppercase()).count();
    upper as f64 / letters.len() as f64
}

pub fn titlecase_ratio(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let good = words
        .iter()
        .filter(|word| {
            PT_STOPWORDS.contains(&word.to_lowercase().as_str())
                || word.chars().next().is_some_and(char::is_uppercase)
        })
        .count();

    good as f64 / words.len() as f64
}

/// Line-context filter for the strict numbered detector. Rejects overlong or
/// punctuation-terminated titles outright, then accepts headers that are
/// isolated by blank lines, mostly uppercase, or title-cased. A line that
/// continues an unterminated sentence is rejected unless its casing still
/// looks like a header.
pub fn is_probable_header(prev_line: &str, next_line: &str, title: &str) -> bool {
    if title.chars().count() > 90 {
        return false;
    }
    if title.ends_with('.') || title.ends_with(';') || title.ends_with(',') {
        return false;
    }

    let spaced_block = prev_line.trim().is_empty() || next_line.trim().is_empty();
    let looks_upper = upper_ratio(title) >= 0.55;
    let looks_titlecase = titlecase_ratio(title) >= 0.7 && title.split_whitespace().count() <= 10;

    if spaced_block || looks_upper || looks_titlecase {
        let prev = prev_line.trim();
        let prev_ends_sentence =
            prev.is_empty() || prev.ends_with(['.', ':', ';', '!', '?']);
        if !prev_ends_sentence && !(looks_upper || looks_titlecase) {
            return false;
        }
        return true;
    }

    false
}

/// Keyword filter for bare roman-numeral candidates. Only keeps titles that
/// carry recognizable Brazilian contract section vocabulary.
pub fn looks_like_section_header(title: &str) -> bool {
    if title.is_empty() || title.chars().count() > 100 {
        return false;
    }

    let lowered = title.to_lowercase();
    if title.chars().count() > 50 || lowered.contains(" que ") || lowered.contains(" para ") {
        return false;
    }

    let upper = title.to_uppercase();
    upper
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| SECTION_KEYWORDS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_ratio_ignores_non_letters() {
        assert_eq!(upper_ratio("123 - !"), 0.0);
        assert!(upper_ratio("DO OBJETO") > 0.99);
        assert!(upper_ratio("Do Objeto") < 0.55);
    }

    #[test]
    fn titlecase_ratio_counts_stopwords_as_good() {
        assert!(titlecase_ratio("Condições de Pagamento") > 0.99);
        assert!(titlecase_ratio("pagamento em duas parcelas") < 0.7);
    }

    #[test]
    fn probable_header_rejects_trailing_punctuation_and_long_titles() {
        assert!(!is_probable_header("", "", "Do Objeto."));
        assert!(!is_probable_header("", "", &"x".repeat(91)));
    }

    #[test]
    fn probable_header_accepts_isolated_uppercase_lines() {
        assert!(is_probable_header("", "O presente contrato...", "OBJETO DO CONTRATO"));
        assert!(is_probable_header("texto anterior.", "", "Das Partes"));
    }

    #[test]
    fn probable_header_rejects_sentence_continuations() {
        // Previous line does not end a sentence and the title reads like prose.
        assert!(!is_probable_header(
            "conforme previsto no item",
            "",
            "acima deste instrumento entre as partes"
        ));
    }

    #[test]
    fn section_header_keywords_match_on_word_boundaries() {
        assert!(looks_like_section_header("DO OBJETO"));
        assert!(looks_like_section_header("Valor e Forma de Pagamento"));
        assert!(!looks_like_section_header("instrumento firmado entre empresas"));
        assert!(!looks_like_section_header(""));
    }
}
