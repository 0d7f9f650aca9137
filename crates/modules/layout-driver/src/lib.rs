//! Page Layout Driver (spec §4.7): turns a page's translated blocks into a
//! declarative [`TypesetPage`], invoking the Fit Loop for running text and
//! falling back to fixed per-type defaults for everything else.

use fit_loop::FitLoop;
use interface::{
    Block, BlockType, FitLoopConfig, FontStretch, FontWeight, Glossary, LengthPolicy, MeasurementOracle,
    ParagraphTranslate, Page, Shortener, StyleProperties, TextAlign, TypesetFrame, TypesetPage,
};
use log::{debug, error};

/// The fixed per-type defaults of spec §4.7, used directly for
/// `heading | figure | page-number` and as the Fit Loop's starting point
/// for `paragraph | caption | footnote`.
pub fn default_style_for_block_type(block_type: BlockType) -> StyleProperties {
    let mut style = StyleProperties {
        font_family: "Noto Serif CJK SC".into(),
        font_size_px: 16.0,
        line_height: 1.5,
        letter_spacing_em: 0.0,
        font_weight: FontWeight::Normal,
        font_stretch: FontStretch::Normal,
        text_align: TextAlign::Justify,
        text_indent_em: 0.0,
        italic: false,
    };

    match block_type {
        BlockType::Heading => {
            style.font_family = "Noto Sans CJK SC".into();
            style.font_size_px = 20.0;
            style.font_weight = FontWeight::Bold;
            style.line_height = 1.3;
            style.text_align = TextAlign::Center;
        }
        BlockType::Paragraph => {
            style.font_size_px = 16.0;
            style.line_height = 1.6;
            style.text_indent_em = 2.0;
        }
        BlockType::Caption => {
            style.font_size_px = 14.0;
            style.line_height = 1.4;
            style.text_align = TextAlign::Center;
            style.italic = true;
        }
        BlockType::Footnote => {
            style.font_size_px = 12.0;
            style.line_height = 1.3;
            style.text_indent_em = 1.0;
        }
        BlockType::Figure => {
            style.text_align = TextAlign::Center;
        }
        BlockType::PageNumber => {
            style.font_size_px = 12.0;
            style.text_align = TextAlign::Center;
        }
    }
    style
}

/// Drives §4.7's per-page layout. Holds no page-specific state; a single
/// instance can lay out any number of pages concurrently, since the fit
/// loop and oracle calls are the only suspension points (§5).
pub struct PageLayoutDriver<'a> {
    fit_loop: FitLoop,
    oracle: &'a dyn MeasurementOracle,
}

impl<'a> PageLayoutDriver<'a> {
    pub fn new(config: FitLoopConfig, oracle: &'a dyn MeasurementOracle) -> Self {
        Self { fit_loop: FitLoop::new(config), oracle }
    }

    /// Lays out every block of `page` (§4.7 step 1: grouped by page, sorted
    /// by reading order — trivial here since blocks already nest under their
    /// page). `translate_missing`, when given, is invoked for blocks still
    /// missing `text_translated` before layout; a block that has neither a
    /// stored translation nor a successful on-demand one is skipped, per
    /// §4.7 step 2.
    pub async fn layout_page(
        &self,
        page: &Page,
        translate_missing: Option<&dyn ParagraphTranslate>,
        shortener: Option<&dyn Shortener>,
        source_lang: &str,
        target_lang: &str,
        glossary: &Glossary,
    ) -> TypesetPage {
        let mut ordered: Vec<&Block> = page.blocks.iter().collect();
        ordered.sort_by_key(|b| b.order);

        let mut frames = Vec::with_capacity(ordered.len());
        for block in ordered {
            let translated = match &block.text_translated {
                Some(text) => Some(text.clone()),
                None => match translate_missing {
                    Some(translator) => translator
                        .translate_paragraph(&block.text_source, source_lang, target_lang, glossary, LengthPolicy::Normal)
                        .await
                        .ok(),
                    None => None,
                },
            };

            let Some(translated) = translated else {
                debug!("skipping block {} with no translation", block.id);
                continue;
            };

            frames.push(self.typeset_block(block, &translated, shortener).await);
        }

        TypesetPage { page_id: page.id.clone(), width: page.width, height: page.height, frames }
    }

    async fn typeset_block(&self, block: &Block, translated: &str, shortener: Option<&dyn Shortener>) -> TypesetFrame {
        let processed = typography::apply_line_break_rules(translated);
        let default_style = default_style_for_block_type(block.block_type);

        if let Err(e) = block.bbox.validate() {
            error!("block {} has an invalid frame, emitting fallback: {e}", block.id);
            return TypesetFrame {
                block_id: block.id.clone(),
                x: block.bbox.x,
                y: block.bbox.y,
                w: block.bbox.w,
                h: block.bbox.h,
                content: processed,
                style: default_style,
            };
        }

        if matches!(block.block_type, BlockType::Paragraph | BlockType::Caption | BlockType::Footnote) {
            match self
                .fit_loop
                .fit(block.bbox.w, block.bbox.h, &processed, &default_style, self.oracle, shortener)
                .await
            {
                Ok(result) => {
                    debug!("block {} fit: fits={} iterations={}", block.id, result.fits, result.iterations);
                    return TypesetFrame {
                        block_id: block.id.clone(),
                        x: block.bbox.x,
                        y: block.bbox.y,
                        w: block.bbox.w,
                        h: block.bbox.h,
                        content: result.final_content,
                        style: result.style,
                    };
                }
                Err(e) => {
                    error!("fit loop failed for block {}: {e}", block.id);
                }
            }
        }

        TypesetFrame {
            block_id: block.id.clone(),
            x: block.bbox.x,
            y: block.bbox.y,
            w: block.bbox.w,
            h: block.bbox.h,
            content: processed,
            style: default_style,
        }
    }
}

/// Lays out every page in `pages`. A thin convenience over repeated
/// [`PageLayoutDriver::layout_page`] calls.
pub async fn layout_pages<'a>(
    driver: &PageLayoutDriver<'a>,
    pages: &[Page],
    translate_missing: Option<&dyn ParagraphTranslate>,
    shortener: Option<&dyn Shortener>,
    source_lang: &str,
    target_lang: &str,
    glossary: &Glossary,
) -> Vec<TypesetPage> {
    let mut out = Vec::with_capacity(pages.len());
    for page in pages {
        out.push(driver.layout_page(page, translate_missing, shortener, source_lang, target_lang, glossary).await);
    }
    out
}
