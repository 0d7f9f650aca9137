//! Fit Loop (spec §4.3): iterative typographic parameter search that fits
//! translated content into a fixed-size frame by walking a compression
//! ladder, an expansion ladder, and — as a last resort — a single
//! semantically-equivalent shortening pass.

use interface::{Error, FitLoopConfig, FitResult, FontStretch, FontWeight, MeasurementOracle, Shortener, StyleProperties};
use log::{debug, warn};

/// Drives the search described in spec §4.3 against a caller-supplied
/// [`MeasurementOracle`] and an optional [`Shortener`].
pub struct FitLoop {
    config: FitLoopConfig,
}

impl FitLoop {
    pub fn new(config: FitLoopConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitLoopConfig {
        &self.config
    }

    /// Fits `content` into a `frame_w` × `frame_h` box starting from
    /// `initial_style`. Every field of `initial_style` other than
    /// `line_height`, `letter_spacing_em`, `font_weight`, and `font_stretch`
    /// is preserved verbatim in the result; those four are reset to the
    /// config's initial values before the search begins.
    pub async fn fit(
        &self,
        frame_w: f64,
        frame_h: f64,
        content: &str,
        initial_style: &StyleProperties,
        oracle: &dyn MeasurementOracle,
        shortener: Option<&dyn Shortener>,
    ) -> Result<FitResult, Error> {
        let original_content = content.to_string();
        let mut current_content = content.to_string();
        let mut style = initial_style.clone();
        reset_fit_knobs(&mut style, &self.config);

        let mut last_iteration = 0;
        let mut shortened_once = false;

        for iteration in 0..self.config.max_iterations {
            last_iteration = iteration;
            let (width, height) = oracle.measure(&current_content, &style).await?;
            let overflow_ratio = if frame_h > 0.0 { height / frame_h } else { 0.0 };
            let density_ratio = if frame_w > 0.0 { width / frame_w } else { 0.0 };

            debug!(
                "fit loop iteration {iteration}: overflow={overflow_ratio:.3}, density={density_ratio:.3}"
            );

            if overflow_ratio <= 1.0 + self.config.overflow_tolerance {
                if density_ratio >= self.config.min_density {
                    return Ok(FitResult {
                        fits: true,
                        overflow_ratio,
                        density_ratio,
                        style,
                        iterations: iteration + 1,
                        final_content: current_content,
                    });
                }
                expand(&mut style, iteration, &self.config);
                continue;
            }

            if compress(&mut style, iteration, &self.config) {
                continue;
            }

            if let Some(shortener) = shortener {
                if iteration < 3 && !shortened_once {
                    shortened_once = true;
                    match shortener.shorten(&original_content, self.config.concise_threshold).await {
                        Ok(shortened) if shortened.chars().count() < current_content.chars().count() => {
                            current_content = shortened;
                            style = initial_style.clone();
                            reset_fit_knobs(&mut style, &self.config);
                            continue;
                        }
                        Ok(_) => {}
                        Err(e) => warn!("shorten attempt failed: {e}"),
                    }
                }
            }

            warn!("could not fit text after {} iterations, allowing overflow", iteration + 1);
            break;
        }

        let (width, height) = oracle.measure(&current_content, &style).await?;
        let overflow_ratio = if frame_h > 0.0 { height / frame_h } else { 0.0 };
        let density_ratio = if frame_w > 0.0 { width / frame_w } else { 0.0 };

        Ok(FitResult {
            fits: overflow_ratio <= 1.1,
            overflow_ratio,
            density_ratio,
            style,
            iterations: last_iteration + 1,
            final_content: current_content,
        })
    }
}

fn reset_fit_knobs(style: &mut StyleProperties, config: &FitLoopConfig) {
    style.line_height = config.initial_line_height;
    style.letter_spacing_em = config.initial_letter_spacing;
    style.font_weight = FontWeight::Normal;
    style.font_stretch = FontStretch::Normal;
}

/// One rung of the compression ladder (§4.3.1). Returns whether a rung
/// fired at this iteration.
fn compress(style: &mut StyleProperties, iteration: u32, config: &FitLoopConfig) -> bool {
    match iteration {
        0 => {
            if style.letter_spacing_em > config.min_letter_spacing {
                style.letter_spacing_em = (style.letter_spacing_em - 0.01).max(config.min_letter_spacing);
                true
            } else {
                false
            }
        }
        1 => {
            if style.line_height > config.min_line_height {
                style.line_height = (style.line_height - 0.05).max(config.min_line_height);
                true
            } else {
                false
            }
        }
        2 => {
            if style.font_stretch == FontStretch::Normal {
                style.font_stretch = FontStretch::Condensed;
                true
            } else {
                false
            }
        }
        3 => {
            if style.font_weight == FontWeight::Normal {
                style.font_weight = FontWeight::Light;
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

/// One rung of the expansion ladder (§4.3.2), applied when text is too
/// sparse for its frame.
fn expand(style: &mut StyleProperties, iteration: u32, config: &FitLoopConfig) {
    match iteration {
        0 => {
            if style.line_height < config.max_line_height {
                style.line_height = (style.line_height + 0.10).min(config.max_line_height);
            }
        }
        1 => {
            if style.letter_spacing_em < config.max_letter_spacing {
                style.letter_spacing_em = (style.letter_spacing_em + 0.005).min(config.max_letter_spacing);
            }
        }
        _ => {}
    }
}
