//! Reference `TranslationBackend` (spec §4.6, "Mock implementation"):
//! glossary-first substitution plus a small built-in German/Swedish
//! vocabulary and a crude word-pattern fallback, good enough to exercise
//! the rest of the pipeline without a real translation API.

use std::collections::HashMap;

use async_trait::async_trait;
use interface::{Error, Glossary, LengthPolicy, TranslationBackend};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use unicode_segmentation::UnicodeSegmentation;

static GERMAN_PHRASES: Lazy<Vec<(&str, &str)>> = Lazy::new(|| {
    vec![
        ("Die Entwicklung der modernen Typografie", "现代字体设计的发展"),
        ("Die Geschichte der Typografie", "字体排印史"),
        ("Johannes Gutenberg", "约翰内斯·古腾堡"),
        ("beweglichen Lettern", "活字印刷"),
        ("Renaissance", "文艺复兴"),
        ("humanistische Minuskel", "人文主义小写字母"),
        ("Gutenberg-Bible", "古腾堡圣经"),
        ("Mainz", "美因茨"),
    ]
});

static SWEDISH_PHRASES: Lazy<Vec<(&str, &str)>> = Lazy::new(|| {
    vec![
        ("Typografins utveckling", "字体设计的发展"),
        ("Modern design", "现代设计"),
        ("Tryckkonst", "印刷艺术"),
    ]
});

static GERMAN_WORD_PATTERNS: Lazy<Vec<(Regex, &str)>> = Lazy::new(|| {
    build_word_patterns(&[
        (r"\bder\b", "这个"),
        (r"\bdie\b", "这个"),
        (r"\bdas\b", "这个"),
        (r"\bund\b", "和"),
        (r"\bin\b", "在"),
        (r"\bmit\b", "用"),
        (r"\bvon\b", "来自"),
        (r"\bzu\b", "到"),
        (r"\bist\b", "是"),
        (r"\bwird\b", "被"),
        (r"\bwurde\b", "被"),
        (r"\bsich\b", ""),
        (r"ung\b", "化"),
        (r"tion\b", "动"),
        (r"ität\b", "性"),
    ])
});

static SWEDISH_WORD_PATTERNS: Lazy<Vec<(Regex, &str)>> = Lazy::new(|| {
    build_word_patterns(&[
        (r"\ben\b", "一个"),
        (r"\bett\b", "一个"),
        (r"\boch\b", "和"),
        (r"\bi\b", "在"),
        (r"\bav\b", "的"),
        (r"\bför\b", "为了"),
        (r"\bsom\b", "如"),
        (r"\bär\b", "是"),
    ])
});

static CONCISE_FILLER_PATTERNS: Lazy<Vec<&str>> =
    Lazy::new(|| vec!["，这个", "的这个", "，它", "，该", "，其", "所谓的", "也就是说", "换句话说"]);

fn build_word_patterns(pairs: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    pairs
        .iter()
        .map(|(pattern, replacement)| {
            let re = RegexBuilder::new(pattern).case_insensitive(true).build().unwrap();
            (re, *replacement)
        })
        .collect()
}

fn case_insensitive_literal(term: &str) -> Regex {
    RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build().unwrap()
}

/// A built-in-vocabulary translation backend. Never consults a network; a
/// real deployment supplies its own `TranslationBackend`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }

    fn apply_builtin_phrases(&self, text: &str, source_lang: &str) -> String {
        let phrases: &[(&str, &str)] = match source_lang {
            "de" => &GERMAN_PHRASES,
            "sv" => &SWEDISH_PHRASES,
            _ => return text.to_string(),
        };
        let mut out = text.to_string();
        for (src, tgt) in phrases {
            if out.to_lowercase().contains(&src.to_lowercase()) {
                out = case_insensitive_literal(src).replace_all(&out, *tgt).into_owned();
            }
        }
        out
    }

    fn mock_word_substitution(&self, text: &str, source_lang: &str, target_lang: &str, fallback_lang: &str) -> String {
        if target_lang != "zh-CN" {
            return text.to_string();
        }
        let patterns: &[(Regex, &str)] = match source_lang {
            "de" => &GERMAN_WORD_PATTERNS,
            "sv" => &SWEDISH_WORD_PATTERNS,
            _ => return text.to_string(),
        };

        let mut result = text.to_string();
        for (re, replacement) in patterns {
            result = re.replace_all(&result, *replacement).into_owned();
        }
        result.retain(|c| !c.is_whitespace());

        let non_ascii_count = result.chars().filter(|c| *c as u32 > 127).count();
        if result == text || non_ascii_count < 3 {
            let excerpt: String = text.graphemes(true).take(20).collect();
            result = format!("这是一段从{fallback_lang}语翻译过来的文本：{excerpt}...");
        }
        result
    }

    fn make_concise(&self, text: &str, target_ratio: f64) -> String {
        let char_count = text.chars().count();
        if char_count <= 10 {
            return text.to_string();
        }
        let target_length = (char_count as f64 * target_ratio) as usize;

        let mut result = text.to_string();
        for pattern in CONCISE_FILLER_PATTERNS.iter() {
            if result.chars().count() > target_length {
                result = result.replace(pattern, "");
            }
        }

        if result.chars().count() > target_length {
            let mut sentences: Vec<&str> = result.split('。').collect();
            while sentences.join("。").chars().count() > target_length && sentences.len() > 1 {
                sentences.pop();
            }
            result = sentences.join("。");
            if !result.is_empty() && !result.ends_with('。') {
                result.push('。');
            }
        }

        if result.is_empty() {
            text.to_string()
        } else {
            result
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        glossary: &Glossary,
        length_policy: LengthPolicy,
    ) -> Result<String, Error> {
        let mut translated = translator::apply_glossary(text, glossary);
        translated = self.apply_builtin_phrases(&translated, source_lang);

        let fallback_lang = match source_lang {
            "de" => "德",
            "sv" => "瑞典",
            other => other,
        };
        if matches!(source_lang, "de" | "sv") {
            translated = self.mock_word_substitution(&translated, source_lang, target_lang, fallback_lang);
        }

        if let LengthPolicy::Concise(target_ratio) = length_policy {
            translated = self.make_concise(&translated, target_ratio);
        }

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface::GlossaryTerm;

    #[tokio::test]
    async fn glossary_applies_before_builtin_vocabulary() {
        let backend = MockBackend::new();
        let glossary = Glossary::new(vec![GlossaryTerm::new("Gutenberg", "顾腾堡", true)]);
        let out = backend
            .translate("Johannes Gutenberg", "de", "zh-CN", &glossary, LengthPolicy::Normal)
            .await
            .unwrap();
        assert!(out.contains("顾腾堡"));
    }

    #[tokio::test]
    async fn builtin_phrase_table_translates_known_phrase() {
        let backend = MockBackend::new();
        let out = backend
            .translate("Renaissance", "de", "zh-CN", &Glossary::default(), LengthPolicy::Normal)
            .await
            .unwrap();
        assert!(out.contains("文艺复兴"));
    }

    #[tokio::test]
    async fn unknown_text_falls_back_to_placeholder_output() {
        let backend = MockBackend::new();
        let out = backend
            .translate("Ein ganz neuer Satz ohne Treffer", "de", "zh-CN", &Glossary::default(), LengthPolicy::Normal)
            .await
            .unwrap();
        assert!(out.starts_with("这是一段从德语翻译过来的文本："));
    }

    #[tokio::test]
    async fn concise_policy_shortens_filler_heavy_output() {
        // an unrecognized source language skips phrase/word substitution entirely, so
        // this isolates the concise pass against already-settled Chinese text.
        let backend = MockBackend::new();
        let text = "背景，这个内容，这个内容，这个内容，这个内容，这个内容，这个总结部分";
        let normal = backend
            .translate(text, "zz", "zh-CN", &Glossary::default(), LengthPolicy::Normal)
            .await
            .unwrap();
        let concise = backend
            .translate(text, "zz", "zh-CN", &Glossary::default(), LengthPolicy::Concise(0.9))
            .await
            .unwrap();
        assert!(concise.chars().count() < normal.chars().count());
    }

    #[tokio::test]
    async fn never_returns_empty_for_non_empty_input() {
        let backend = MockBackend::new();
        let out = backend
            .translate("x", "de", "zh-CN", &Glossary::default(), LengthPolicy::Normal)
            .await
            .unwrap();
        assert!(!out.is_empty());
    }
}
