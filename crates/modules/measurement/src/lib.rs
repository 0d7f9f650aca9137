//! Reference Measurement Oracle (spec §4.2).
//!
//! Not a real text shaper: an estimator cheap enough to call on every fit
//! loop iteration, built to satisfy the monotonicity contract the fit loop
//! relies on rather than to predict pixel-perfect layout. Real deployments
//! are expected to supply their own [`interface::MeasurementOracle`] backed
//! by an actual font-shaping engine; this crate exists so the fit loop and
//! layout driver have something to run against, in tests and as a default.

use async_trait::async_trait;
use interface::{Error, MeasurementOracle, StyleProperties};

/// Parses a CSS-style font-size string (`"16px"`, `"12pt"`, `"1em"`) into
/// pixels, defaulting to 16px for anything else. Mirrors the reference
/// engine's `_parse_font_size`.
pub fn parse_font_size_px(raw: &str) -> f64 {
    if let Some(px) = raw.strip_suffix("px") {
        px.trim().parse().unwrap_or(16.0)
    } else if let Some(pt) = raw.strip_suffix("pt") {
        pt.trim().parse::<f64>().map(|v| v * 1.333_333).unwrap_or(16.0)
    } else if let Some(em) = raw.strip_suffix("em") {
        em.trim().parse::<f64>().map(|v| v * 16.0).unwrap_or(16.0)
    } else {
        16.0
    }
}

/// Estimates text block dimensions from character-class width fractions and
/// a simple per-line height model. Monotonic in every fit loop knob:
/// widening letter-spacing or shrinking font-size/weight/stretch can only
/// shrink the returned width, and increasing line-height can only grow the
/// returned height — the property the fit loop's ladders depend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceMeasurementOracle;

impl ReferenceMeasurementOracle {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core, exposed directly so callers outside the trait
    /// object (e.g. the fit loop's own unit tests) don't need a runtime.
    pub fn measure_sync(&self, content: &str, style: &StyleProperties) -> (f64, f64) {
        let cjk_ratio = (1.0 + style.letter_spacing_em).max(0.0);
        let widest_line = content
            .split('\n')
            .map(|line| typography::estimate_width(line, style.font_size_px, cjk_ratio))
            .fold(0.0_f64, f64::max);

        let line_count = content.split('\n').filter(|l| !l.trim().is_empty()).count().max(1);
        let height = line_count as f64 * style.font_size_px * style.line_height;

        (widest_line, height)
    }
}

#[async_trait]
impl MeasurementOracle for ReferenceMeasurementOracle {
    async fn measure(&self, content: &str, style: &StyleProperties) -> Result<(f64, f64), Error> {
        Ok(self.measure_sync(content, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface::{FontStretch, FontWeight, TextAlign};

    fn style(font_size_px: f64, line_height: f64, letter_spacing_em: f64) -> StyleProperties {
        StyleProperties {
            font_family: "Noto Serif CJK SC".into(),
            font_size_px,
            line_height,
            letter_spacing_em,
            font_weight: FontWeight::Normal,
            font_stretch: FontStretch::Normal,
            text_align: TextAlign::Justify,
            text_indent_em: 0.0,
            italic: false,
        }
    }

    #[test]
    fn parses_px_pt_em_font_sizes() {
        assert_eq!(parse_font_size_px("16px"), 16.0);
        assert!((parse_font_size_px("12pt") - 16.0).abs() < 1e-3);
        assert_eq!(parse_font_size_px("1em"), 16.0);
        assert_eq!(parse_font_size_px("garbage"), 16.0);
    }

    #[test]
    fn widening_letter_spacing_never_increases_width() {
        let oracle = ReferenceMeasurementOracle::new();
        let tight = style(16.0, 1.5, 0.0);
        let loose = style(16.0, 1.5, -0.02);
        let (w_tight, _) = oracle.measure_sync("这是一段测试文字", &tight);
        let (w_loose, _) = oracle.measure_sync("这是一段测试文字", &loose);
        assert!(w_loose <= w_tight);
    }

    #[test]
    fn taller_line_height_never_decreases_height() {
        let oracle = ReferenceMeasurementOracle::new();
        let short = style(16.0, 1.45, 0.0);
        let tall = style(16.0, 1.6, 0.0);
        let (_, h_short) = oracle.measure_sync("一行文字\n第二行", &short);
        let (_, h_tall) = oracle.measure_sync("一行文字\n第二行", &tall);
        assert!(h_tall >= h_short);
    }

    #[tokio::test]
    async fn measure_trait_method_matches_sync_core() {
        let oracle = ReferenceMeasurementOracle::new();
        let s = style(16.0, 1.5, 0.0);
        let via_trait = oracle.measure("你好", &s).await.unwrap();
        let direct = oracle.measure_sync("你好", &s);
        assert_eq!(via_trait, direct);
    }
}
