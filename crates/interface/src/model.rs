use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub type BlockId = String;
pub type PageId = String;

/// A rectangle in page pixel units. `w` and `h` must be positive once a
/// block reaches the fit loop; OCR output that produced a degenerate box is
/// rejected at that boundary rather than silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Checked for the invariant the fit loop relies on: finite, non-negative
    /// origin, strictly positive extent.
    pub fn validate(&self) -> Result<(), Error> {
        if ![self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidFrame("non-finite bounding box".into()));
        }
        if self.x < 0.0 || self.y < 0.0 {
            return Err(Error::InvalidFrame("negative origin".into()));
        }
        if self.w <= 0.0 || self.h <= 0.0 {
            return Err(Error::InvalidFrame(format!(
                "non-positive extent: {}x{}",
                self.w, self.h
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Heading,
    Paragraph,
    Caption,
    Footnote,
    Figure,
    PageNumber,
}

impl BlockType {
    /// The only block types the fit loop is invoked for (§4.3 block-type policy).
    pub fn is_fitted(&self) -> bool {
        matches!(
            self,
            BlockType::Paragraph | BlockType::Caption | BlockType::Footnote
        )
    }
}

/// A block of OCR'd text with a reading-order position and bounding box.
/// Mutated only by the translator (adds `text_translated`) and the layout
/// driver (records typeset status); never by the rest of the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub block_type: BlockType,
    pub bbox: BoundingBox,
    pub order: i64,
    /// Source text, already normalized to NFC by the caller (§3).
    pub text_source: String,
    pub text_translated: Option<String>,
}

impl Block {
    pub fn new(
        id: impl Into<BlockId>,
        block_type: BlockType,
        bbox: BoundingBox,
        order: i64,
        text_source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            block_type,
            bbox,
            order,
            text_source: text_source.into(),
            text_translated: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub blocks: Vec<Block>,
}

/// A single source -> target substitution. Earlier terms in a `Glossary`
/// win on overlapping matches (§4.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub source: String,
    pub target: String,
    pub case_sensitive: bool,
    pub note: Option<String>,
}

impl GlossaryTerm {
    pub fn new(source: impl Into<String>, target: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            case_sensitive,
            note: None,
        }
    }
}

/// An ordered list of terms. Read-only once loaded (§5) — nothing in the
/// core mutates a `Glossary` after construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Glossary {
    pub terms: Vec<GlossaryTerm>,
}

impl Glossary {
    pub fn new(terms: Vec<GlossaryTerm>) -> Self {
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// `Concise`'s payload is the target length ratio relative to the input
/// (spec §6 `FitLoopConfig::concise_threshold`) — carried on the variant so
/// every caller that asks for a concise translation states the ratio it
/// means, rather than relying on a hardcoded constant downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    Normal,
    Concise(f64),
}

/// The fit loop's two irreversible compression flags. `Light` is the ladder's
/// `font-weight: 300` rung; `Bold` is only ever set by the per-type defaults
/// for headings and never touched by the fit loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Light,
    Bold,
}

impl FontWeight {
    pub fn css_value(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Light => "300",
            FontWeight::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStretch {
    Normal,
    Condensed,
}

impl FontStretch {
    pub fn css_value(&self) -> &'static str {
        match self {
            FontStretch::Normal => "normal",
            FontStretch::Condensed => "condensed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Left,
    Center,
    Justify,
}

impl TextAlign {
    pub fn css_value(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }
}

/// Typographic parameters, mutable during the fit loop, plus the static
/// declarative properties every frame carries regardless of fit outcome.
///
/// Invariants enforced by the fit loop: `min_line_height <= line_height <=
/// max_line_height` and `min_letter_spacing <= letter_spacing <=
/// max_letter_spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    pub font_family: String,
    pub font_size_px: f64,
    pub line_height: f64,
    pub letter_spacing_em: f64,
    pub font_weight: FontWeight,
    pub font_stretch: FontStretch,
    pub text_align: TextAlign,
    pub text_indent_em: f64,
    pub italic: bool,
}

impl StyleProperties {
    /// Flattens to the CSS property map a downstream HTML templater carries
    /// verbatim onto each absolutely-positioned frame (§6 "Layout output").
    pub fn to_css_map(&self) -> BTreeMap<String, String> {
        let mut css = BTreeMap::new();
        css.insert(
            "font-family".into(),
            format!("\"{}\", serif", self.font_family),
        );
        css.insert("font-size".into(), format!("{}px", self.font_size_px));
        css.insert("line-height".into(), self.line_height.to_string());
        css.insert(
            "letter-spacing".into(),
            format!("{}em", self.letter_spacing_em),
        );
        css.insert("font-weight".into(), self.font_weight.css_value().into());
        css.insert(
            "font-stretch".into(),
            self.font_stretch.css_value().into(),
        );
        css.insert("text-align".into(), self.text_align.css_value().into());
        if self.text_indent_em != 0.0 {
            css.insert(
                "text-indent".into(),
                format!("{}em", self.text_indent_em),
            );
        }
        if self.italic {
            css.insert("font-style".into(), "italic".into());
        }
        css.insert("text-justify".into(), "inter-ideograph".into());
        css.insert("word-break".into(), "keep-all".into());
        css.insert("line-break".into(), "strict".into());
        css.insert("hyphens".into(), "none".into());
        css
    }
}

/// Bounds and starting point for the fit loop's parameter search (§3/§6).
/// The only configuration surface the core exposes — an explicit,
/// enumerated struct, never a dynamic keyword map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitLoopConfig {
    pub initial_line_height: f64,
    pub min_line_height: f64,
    pub max_line_height: f64,
    pub initial_letter_spacing: f64,
    pub min_letter_spacing: f64,
    pub max_letter_spacing: f64,
    pub overflow_tolerance: f64,
    pub concise_threshold: f64,
    pub min_density: f64,
    pub max_iterations: u32,
}

impl Default for FitLoopConfig {
    fn default() -> Self {
        Self {
            initial_line_height: 1.5,
            min_line_height: 1.45,
            max_line_height: 1.6,
            initial_letter_spacing: 0.0,
            min_letter_spacing: -0.02,
            max_letter_spacing: 0.01,
            overflow_tolerance: 0.02,
            concise_threshold: 0.9,
            min_density: 0.40,
            max_iterations: 10,
        }
    }
}

/// Outcome of running the fit loop over one block's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub fits: bool,
    pub overflow_ratio: f64,
    pub density_ratio: f64,
    pub style: StyleProperties,
    pub iterations: u32,
    pub final_content: String,
}

/// A laid-out block: the block's bounding box, final translated content, and
/// final style. Coordinate units are page pixels at the page's stored dpi.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesetFrame {
    pub block_id: BlockId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub content: String,
    pub style: StyleProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesetPage {
    pub page_id: PageId,
    pub width: u32,
    pub height: u32,
    pub frames: Vec<TypesetFrame>,
}
