//! Markup Shield (spec §4.4): hides inline markup and placeholders from the
//! translation backend behind opaque tokens, then restores them afterward.

/// Result of [`shield`]: the stripped text handed to a translator backend,
/// plus the token → original-chunk mapping needed to restore it.
pub struct Shielded {
    pub stripped: String,
    pub tokens: Vec<(String, String)>,
}

fn token_for(index: usize) -> String {
    format!("__PLACEHOLDER_{index}__")
}

/// Replaces every markup/placeholder chunk in `text` with a synthetic
/// `__PLACEHOLDER_{k}__` token, in order of appearance.
pub fn shield(text: &str) -> Shielded {
    let ranges = typography::markup_match_ranges(text);
    let mut stripped = String::with_capacity(text.len());
    let mut tokens = Vec::with_capacity(ranges.len());
    let mut last = 0;

    for (i, (start, end)) in ranges.into_iter().enumerate() {
        stripped.push_str(&text[last..start]);
        let token = token_for(i);
        stripped.push_str(&token);
        tokens.push((token, text[start..end].to_string()));
        last = end;
    }
    stripped.push_str(&text[last..]);

    Shielded { stripped, tokens }
}

/// Replaces every occurrence of every recorded token with its original
/// chunk. Tokens are restored in order; a missing token (dropped or mangled
/// by the backend) simply fails to round-trip, per the documented backend
/// contract.
pub fn unshield(translated: &str, tokens: &[(String, String)]) -> String {
    let mut out = translated.to_string();
    for (token, original) in tokens {
        out = out.replace(token.as_str(), original.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shields_and_restores_mixed_markup() {
        let text = "Die {FN:1} moderne <i>Typografie</i> war wichtig";
        let shielded = shield(text);
        assert!(!shielded.stripped.contains("{FN:1}"));
        assert!(!shielded.stripped.contains("<i>"));
        assert_eq!(shielded.tokens.len(), 2);

        let restored = unshield(&shielded.stripped, &shielded.tokens);
        assert_eq!(restored, text);
    }

    #[test]
    fn restores_tokens_even_if_backend_duplicates_one() {
        let text = "<b>bold</b> word";
        let shielded = shield(text);
        let mutated_backend_output = format!("{0} and {0} again", shielded.stripped);
        let restored = unshield(&mutated_backend_output, &shielded.tokens);
        assert_eq!(restored.matches("<b>bold</b>").count(), 2);
    }

    #[test]
    fn no_markup_is_a_no_op() {
        let text = "plain text only";
        let shielded = shield(text);
        assert_eq!(shielded.stripped, text);
        assert!(shielded.tokens.is_empty());
    }
}
