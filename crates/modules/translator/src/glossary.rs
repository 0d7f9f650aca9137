//! Glossary Applier (spec §4.5): ordered source → target substitution run
//! ahead of (or, as here, inside) backend translation.

use interface::Glossary;
use regex::{Regex, RegexBuilder};

/// Applies every term of `glossary` to `text`, in listing order. Earlier
/// terms win: once a term substitutes, later terms scan the already-
/// substituted text, and no term is re-applied to its own output.
pub fn apply_glossary(text: &str, glossary: &Glossary) -> String {
    let mut current = text.to_string();
    for term in &glossary.terms {
        if term.case_sensitive {
            current = current.replace(term.source.as_str(), term.target.as_str());
        } else if let Ok(re) = case_insensitive_regex(&term.source) {
            current = re.replace_all(&current, term.target.as_str()).into_owned();
        }
    }
    current
}

fn case_insensitive_regex(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(source)).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface::GlossaryTerm;

    fn glossary(terms: Vec<GlossaryTerm>) -> Glossary {
        Glossary { terms }
    }

    #[test]
    fn case_sensitive_exact_match() {
        let g = glossary(vec![GlossaryTerm::new("Gutenberg", "古腾堡", true)]);
        assert_eq!(apply_glossary("Gutenberg war wichtig", &g), "古腾堡 war wichtig");
        assert_eq!(apply_glossary("gutenberg war wichtig", &g), "gutenberg war wichtig");
    }

    #[test]
    fn case_insensitive_match_keeps_target_verbatim() {
        let g = glossary(vec![GlossaryTerm::new("Renaissance", "文艺复兴", false)]);
        assert_eq!(apply_glossary("RENAISSANCE begann", &g), "文艺复兴 begann");
    }

    #[test]
    fn earlier_terms_win_over_later_overlapping_ones() {
        let g = glossary(vec![
            GlossaryTerm::new("modern typography", "现代字体设计", false),
            GlossaryTerm::new("typography", "字体排印", false),
        ]);
        let out = apply_glossary("modern typography is key", &g);
        assert_eq!(out, "现代字体设计 is key");
    }

    #[test]
    fn terms_are_not_reapplied_to_their_own_output() {
        let g = glossary(vec![GlossaryTerm::new("a", "aa", false)]);
        assert_eq!(apply_glossary("a", &g), "aa");
    }
}
