use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::Profile;
use crate::model::PatternKind;

/// Compiled boundary detectors for the Brazilian legal numbering
/// conventions. One regex per pattern family; every regex captures the
/// number (group 1, may be empty) and the header title text (group 2).
///
/// The numbered detector is the only profile-dependent one: the loose form
/// accepts any line-leading hierarchical number, the strict form bounds
/// top-level numbers to two digits, requires a separator, and is paired with
/// the header plausibility filter during detection.
#[derive(Debug)]
pub struct PatternLibrary {
    numbered: Regex,
    clausula: Regex,
    secao: Regex,
    roman: Regex,
    artigo: Regex,
    paragrafo: Regex,
    letter: Regex,
}

const NUMBERED_LOOSE: &str = r"(?m)^[ \t]*(\d+(?:\.\d+)*)[ \t]*\.?[ \t]*[-–—:]?[ \t]*([^\n]*)$";
const NUMBERED_STRICT: &str =
    r"(?m)^[ \t]*[-•]?[ \t]*((?:\d+\.)+\d+|\d{1,2})[ \t]*[-–—:]?[ \t]+([^\n]{1,100})$";
const CLAUSULA: &str =
    r"(?mi)^[ \t]*CL[ÁA]USULA[ \t]*(\d+(?:\.\d+)*)?[ªº°]?[ \t]*[-–—:]?[ \t]*([^\n]*)$";
const SECAO: &str =
    r"(?mi)^[ \t]*SE[ÇC][ÃA]O[ \t]+([IVXLCDM]+\b|\d+(?:\.\d+)*)?[ªº°]?[ \t]*[-–—:]?[ \t]*([^\n]*)$";
const ROMAN: &str = r"(?m)^[ \t]*([IVXLCDM]+)\b[ \t]*[-–—:.]?[ \t]*([^\n]{1,100})$";
const ARTIGO: &str =
    r"(?mi)^[ \t]*(?:ARTIGO|ART\.?)[ \t]*(\d+(?:\.\d+)*)[ªº°]?[ \t]*[-–—:.]?[ \t]*([^\n]*)$";
const PARAGRAFO: &str =
    r"(?mi)^[ \t]*(?:PAR[ÁA]GRAFO|§)[ \t]*(\d+(?:\.\d+)*)[ªº°]?[ \t]*[-–—:]?[ \t]*([^\n]*)$";
const LETTER: &str = r"(?m)^[ \t]*([a-z])\)[ \t]*(\S[^\n]{0,99})$";

impl PatternLibrary {
    pub fn new(profile: Profile) -> Result<Self> {
        let numbered_pattern = match profile {
            Profile::Loose => NUMBERED_LOOSE,
            Profile::Strict => NUMBERED_STRICT,
        };

        Ok(Self {
            numbered: Regex::new(numbered_pattern)
                .context("failed to compile numbered heading regex")?,
            clausula: Regex::new(CLAUSULA).context("failed to compile clausula heading regex")?,
            secao: Regex::new(SECAO).context("failed to compile secao heading regex")?,
            roman: Regex::new(ROMAN).context("failed to compile roman heading regex")?,
            artigo: Regex::new(ARTIGO).context("failed to compile artigo heading regex")?,
            paragrafo: Regex::new(PARAGRAFO)
                .context("failed to compile paragrafo heading regex")?,
            letter: Regex::new(LETTER).context("failed to compile letter heading regex")?,
        })
    }

    /// Detectors in fixed evaluation order. Every pattern scans the full
    /// text independently; overlap resolution happens afterwards.
    pub fn entries(&self) -> [(PatternKind, &Regex); 7] {
        [
            (PatternKind::Numbered, &self.numbered),
            (PatternKind::Clausula, &self.clausula),
            (PatternKind::Secao, &self.secao),
            (PatternKind::Roman, &self.roman),
            (PatternKind::Artigo, &self.artigo),
            (PatternKind::Paragrafo, &self.paragrafo),
            (PatternKind::Letter, &self.letter),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNumber {
    /// Dot-separated arabic components, e.g. "2.6.1" -> [2, 6, 1].
    Arabic(Vec<u32>),
    Roman(u32),
}

/// Validates a captured clause number. Returns `None` instead of failing so
/// detection can silently discard implausible candidates.
pub fn parse_clause_number(raw: &str) -> Option<ParsedNumber> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        let mut components = Vec::new();
        for part in trimmed.split('.') {
            if part.is_empty() {
                return None;
            }
            components.push(part.parse::<u32>().ok()?);
        }
        return Some(ParsedNumber::Arabic(components));
    }

    parse_roman(trimmed).map(ParsedNumber::Roman)
}

/// Parses an uppercase Roman numeral with the usual subtractive rule.
/// Lenient about repetition (the source documents are not canonical), but
/// rejects anything containing a non-Roman character.
pub fn parse_roman(raw: &str) -> Option<u32> {
    fn digit(ch: char) -> Option<u32> {
        match ch {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            'L' => Some(50),
            'C' => Some(100),
            'D' => Some(500),
            'M' => Some(1000),
            _ => None,
        }
    }

    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    let values: Vec<u32> = upper.chars().map(digit).collect::<Option<Vec<_>>>()?;
    let mut total = 0i64;
    for (index, value) in values.iter().enumerate() {
        if values.get(index + 1).is_some_and(|next| next > value) {
            total -= i64::from(*value);
        } else {
            total += i64::from(*value);
        }
    }

    u32::try_from(total).ok().filter(|&n| n > 0)
}

/// Hierarchy depth for a candidate: dot-component count for hierarchical
/// numeric numbering, the pattern's fixed default otherwise (so "§ 1" stays
/// a sub-level even though its number is a bare digit).
pub fn hierarchy_level(number: Option<&str>, kind: PatternKind) -> u32 {
    match number {
        Some(value)
            if value.contains('.')
                && value.chars().all(|ch| ch.is_ascii_digit() || ch == '.') =>
        {
            value.split('.').filter(|part| !part.is_empty()).count().max(1) as u32
        }
        _ => kind.default_level(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_profiles_compile() {
        assert!(PatternLibrary::new(Profile::Loose).is_ok());
        assert!(PatternLibrary::new(Profile::Strict).is_ok());
    }

    #[test]
    fn loose_numbered_matches_bare_hierarchical_numbers() {
        let library = PatternLibrary::new(Profile::Loose).unwrap();
        let text = "2.6.1 Conversão em participação";
        let captures = library.numbered.captures(text).unwrap();
        assert_eq!(&captures[1], "2.6.1");
        assert_eq!(captures[2].trim(), "Conversão em participação");
    }

    #[test]
    fn strict_numbered_rejects_long_top_level_numbers() {
        let library = PatternLibrary::new(Profile::Strict).unwrap();
        assert!(library.numbered.captures("2024 foi um ano atípico").is_none());
        assert!(library.numbered.captures("3 - Condições de Pagamento").is_some());
        assert!(library.numbered.captures("2.6 Direitos de Preferência").is_some());
    }

    #[test]
    fn clausula_matches_with_and_without_ordinal() {
        let library = PatternLibrary::new(Profile::Loose).unwrap();
        let captures = library.clausula.captures("CLÁUSULA 1ª - DO OBJETO").unwrap();
        assert_eq!(&captures[1], "1");
        assert_eq!(captures[2].trim(), "DO OBJETO");

        let captures = library.clausula.captures("CLAUSULA 3 - PRAZO").unwrap();
        assert_eq!(&captures[1], "3");
    }

    #[test]
    fn secao_does_not_steal_roman_letters_from_the_title() {
        let library = PatternLibrary::new(Profile::Loose).unwrap();
        let captures = library
            .secao
            .captures("SEÇÃO DISPOSIÇÕES GERAIS")
            .unwrap();
        assert!(captures.get(1).is_none());
        assert_eq!(captures[2].trim(), "DISPOSIÇÕES GERAIS");

        let captures = library.secao.captures("SEÇÃO II - DIREITOS").unwrap();
        assert_eq!(&captures[1], "II");
    }

    #[test]
    fn roman_requires_word_boundary_after_numeral() {
        let library = PatternLibrary::new(Profile::Loose).unwrap();
        assert!(library.roman.captures("DO PRAZO").is_none());
        let captures = library.roman.captures("III - VALOR E FORMA").unwrap();
        assert_eq!(&captures[1], "III");
    }

    #[test]
    fn parse_clause_number_handles_arabic_roman_and_junk() {
        assert_eq!(
            parse_clause_number("2.6.1"),
            Some(ParsedNumber::Arabic(vec![2, 6, 1]))
        );
        assert_eq!(parse_clause_number("IV"), Some(ParsedNumber::Roman(4)));
        assert_eq!(parse_clause_number(""), None);
        assert_eq!(parse_clause_number("2..1"), None);
        assert_eq!(parse_clause_number("99999999999999999999"), None);
    }

    #[test]
    fn parse_roman_handles_subtractive_positions() {
        assert_eq!(parse_roman("IV"), Some(4));
        assert_eq!(parse_roman("IX"), Some(9));
        assert_eq!(parse_roman("XL"), Some(40));
        assert_eq!(parse_roman("XC"), Some(90));
        assert_eq!(parse_roman("CDXLIV"), Some(444));
        assert_eq!(parse_roman("MCMXCIX"), Some(1999));
        assert_eq!(parse_roman("XII"), Some(12));
        assert_eq!(parse_roman("ABC"), None);
    }

    #[test]
    fn hierarchy_level_counts_dot_components() {
        assert_eq!(hierarchy_level(Some("2"), PatternKind::Numbered), 1);
        assert_eq!(hierarchy_level(Some("2.1"), PatternKind::Numbered), 2);
        assert_eq!(hierarchy_level(Some("2.1.3"), PatternKind::Clausula), 3);
        assert_eq!(hierarchy_level(Some("IV"), PatternKind::Roman), 1);
        assert_eq!(hierarchy_level(Some("1"), PatternKind::Paragrafo), 2);
        assert_eq!(hierarchy_level(None, PatternKind::Paragrafo), 2);
        assert_eq!(hierarchy_level(None, PatternKind::Letter), 3);
    }
}
