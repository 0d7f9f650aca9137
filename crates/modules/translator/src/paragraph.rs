//! Paragraph Translator (spec §4.6): composes the Markup Shield with a
//! backend, implemented as a thin, backend-agnostic wrapper.

use async_trait::async_trait;
use interface::{Error, Glossary, LengthPolicy, ParagraphTranslate, Shortener, TranslationBackend};
use log::warn;

use crate::shield::{shield, unshield};

/// Wires a [`TranslationBackend`] into the composed Paragraph Translator
/// pipeline: trim-check → shield → backend → restore.
pub struct ParagraphTranslator<B> {
    backend: B,
    source_lang: String,
    target_lang: String,
}

impl<B: TranslationBackend> ParagraphTranslator<B> {
    pub fn new(backend: B, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            backend,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

#[async_trait]
impl<B: TranslationBackend> ParagraphTranslate for ParagraphTranslator<B> {
    async fn translate_paragraph(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        glossary: &Glossary,
        length_policy: LengthPolicy,
    ) -> Result<String, Error> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let shielded = shield(text);
        let translated = self
            .backend
            .translate(&shielded.stripped, source_lang, target_lang, glossary, length_policy)
            .await?;

        if let LengthPolicy::Concise(_) = length_policy {
            if translated.len() > shielded.stripped.len() {
                warn!(
                    "backend returned a longer string ({} bytes) than requested under a concise length policy ({} bytes)",
                    translated.len(),
                    shielded.stripped.len()
                );
            }
        }

        Ok(unshield(&translated, &shielded.tokens))
    }
}

/// Exposes the Paragraph Translator to the Fit Loop as a [`Shortener`]: a
/// shorten request is just a re-translation at `LengthPolicy::Concise(target_ratio)`
/// against an empty glossary (the glossary has already been applied once,
/// up front, by the caller that produced the text being shortened).
#[async_trait]
impl<B: TranslationBackend> Shortener for ParagraphTranslator<B> {
    async fn shorten(&self, original_text: &str, target_ratio: f64) -> Result<String, Error> {
        self.translate_paragraph(
            original_text,
            &self.source_lang,
            &self.target_lang,
            &Glossary::default(),
            LengthPolicy::Concise(target_ratio),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TranslationBackend for EchoBackend {
        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            _target_lang: &str,
            _glossary: &Glossary,
            _length_policy: LengthPolicy,
        ) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("[{text}]"))
        }
    }

    #[tokio::test]
    async fn empty_input_short_circuits_without_calling_backend() {
        let translator = ParagraphTranslator::new(EchoBackend { calls: AtomicUsize::new(0) }, "de", "zh-CN");
        let out = translator
            .translate_paragraph("   ", "de", "zh-CN", &Glossary::default(), LengthPolicy::Normal)
            .await
            .unwrap();
        assert_eq!(out, "   ");
        assert_eq!(translator.backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn markup_survives_a_backend_round_trip() {
        let translator = ParagraphTranslator::new(EchoBackend { calls: AtomicUsize::new(0) }, "de", "zh-CN");
        let out = translator
            .translate_paragraph(
                "Die <b>Schrift</b> ist schön",
                "de",
                "zh-CN",
                &Glossary::default(),
                LengthPolicy::Normal,
            )
            .await
            .unwrap();
        assert!(out.contains("<b>Schrift</b>"));
    }

    #[tokio::test]
    async fn shortener_uses_concise_policy() {
        struct PolicyCapturingBackend {
            seen: std::sync::Mutex<Option<LengthPolicy>>,
        }
        #[async_trait]
        impl TranslationBackend for PolicyCapturingBackend {
            async fn translate(
                &self,
                text: &str,
                _s: &str,
                _t: &str,
                _g: &Glossary,
                length_policy: LengthPolicy,
            ) -> Result<String, Error> {
                *self.seen.lock().unwrap() = Some(length_policy);
                Ok(text.to_string())
            }
        }
        let translator =
            ParagraphTranslator::new(PolicyCapturingBackend { seen: std::sync::Mutex::new(None) }, "de", "zh-CN");
        let _ = translator.shorten("etwas Text", 0.9).await.unwrap();
        assert_eq!(*translator.backend.seen.lock().unwrap(), Some(LengthPolicy::Concise(0.9)));
    }

    #[tokio::test]
    async fn warns_but_does_not_fail_when_backend_ignores_concise_policy() {
        struct VerboseBackend;
        #[async_trait]
        impl TranslationBackend for VerboseBackend {
            async fn translate(
                &self,
                text: &str,
                _s: &str,
                _t: &str,
                _g: &Glossary,
                _length_policy: LengthPolicy,
            ) -> Result<String, Error> {
                Ok(format!("{text} und noch viel mehr Text als zuvor"))
            }
        }
        let translator = ParagraphTranslator::new(VerboseBackend, "de", "zh-CN");
        let out = translator
            .translate_paragraph("kurz", "de", "zh-CN", &Glossary::default(), LengthPolicy::Concise(0.5))
            .await
            .unwrap();
        assert!(out.contains("und noch viel mehr Text als zuvor"));
    }
}
