use async_trait::async_trait;

use crate::{
    error::Error,
    model::{Glossary, LengthPolicy, StyleProperties},
};

/// External collaborator: given rendered content and style, returns
/// `(width_px, height_px)`. Implementations need not be exact typesetters —
/// they must only be monotonic in the fit loop's knobs (§4.2) and pure in
/// their arguments (§5).
#[async_trait]
pub trait MeasurementOracle: Send + Sync {
    async fn measure(&self, content: &str, style: &StyleProperties) -> Result<(f64, f64), Error>;
}

/// External collaborator: the opaque text-to-text translation backend
/// behind the Paragraph Translator (§4.6).
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        glossary: &Glossary,
        length_policy: LengthPolicy,
    ) -> Result<String, Error>;
}

/// The composed Paragraph Translator (Markup Shield + Glossary Applier +
/// backend + length policy, §4.6), exposed as a trait so the Page Layout
/// Driver and the Fit Loop's `shorten` hook can depend on it without
/// depending on a particular backend.
#[async_trait]
pub trait ParagraphTranslate: Send + Sync {
    async fn translate_paragraph(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        glossary: &Glossary,
        length_policy: LengthPolicy,
    ) -> Result<String, Error>;
}

/// A function that returns a semantically equivalent, strictly shorter
/// translation of the same source text. Passed to the fit loop as the last
/// resort once the compression ladder is exhausted (§4.3 step 3).
/// `target_ratio` is the fit loop's configured `concise_threshold`.
#[async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, original_text: &str, target_ratio: f64) -> Result<String, Error>;
}
