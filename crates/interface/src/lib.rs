pub mod error;
pub mod model;
pub mod reading_order;
pub mod traits;

pub use error::Error;
pub use model::*;
pub use reading_order::infer_reading_order;
pub use traits::{MeasurementOracle, ParagraphTranslate, Shortener, TranslationBackend};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_rejects_non_positive_extent() {
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 10.0).validate().is_err());
        assert!(BoundingBox::new(0.0, 0.0, 10.0, -1.0).validate().is_err());
        assert!(BoundingBox::new(0.0, 0.0, 10.0, 10.0).validate().is_ok());
    }

    #[test]
    fn style_properties_css_map_carries_enumerated_knobs() {
        let style = StyleProperties {
            font_family: "Noto Serif CJK SC".into(),
            font_size_px: 16.0,
            line_height: 1.5,
            letter_spacing_em: -0.01,
            font_weight: FontWeight::Normal,
            font_stretch: FontStretch::Condensed,
            text_align: TextAlign::Justify,
            text_indent_em: 2.0,
            italic: false,
        };
        let css = style.to_css_map();
        assert_eq!(css.get("line-height").unwrap(), "1.5");
        assert_eq!(css.get("letter-spacing").unwrap(), "-0.01em");
        assert_eq!(css.get("font-stretch").unwrap(), "condensed");
        assert_eq!(css.get("text-indent").unwrap(), "2em");
        assert_eq!(css.get("word-break").unwrap(), "keep-all");
    }

    #[test]
    fn fit_loop_config_defaults_match_spec() {
        let cfg = FitLoopConfig::default();
        assert_eq!(cfg.initial_line_height, 1.5);
        assert_eq!(cfg.min_line_height, 1.45);
        assert_eq!(cfg.max_line_height, 1.6);
        assert_eq!(cfg.min_density, 0.40);
        assert_eq!(cfg.max_iterations, 10);
    }

    #[test]
    fn typeset_page_round_trips_through_json() {
        let page = TypesetPage {
            page_id: "p1".into(),
            width: 800,
            height: 1100,
            frames: vec![TypesetFrame {
                block_id: "b1".into(),
                x: 0.0,
                y: 0.0,
                w: 100.0,
                h: 50.0,
                content: "中文".into(),
                style: StyleProperties {
                    font_family: "Noto Sans CJK SC".into(),
                    font_size_px: 20.0,
                    line_height: 1.3,
                    letter_spacing_em: 0.0,
                    font_weight: FontWeight::Bold,
                    font_stretch: FontStretch::Normal,
                    text_align: TextAlign::Center,
                    text_indent_em: 0.0,
                    italic: false,
                },
            }],
        };
        let json = serde_json::to_string(&page).expect("serialize");
        let back: TypesetPage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.frames[0].content, "中文");
    }
}
