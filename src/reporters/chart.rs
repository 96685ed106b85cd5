//! Bar chart reporter
//!
//! Draws the health, security and final scores as three labeled bars on a
//! fixed 0-110 axis and writes the result as a PNG.

use super::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

pub const WIDTH: u32 = 700;
pub const HEIGHT: u32 = 500;
pub const Y_MAX: f64 = 110.0;
pub const TITLE: &str = "Jenkins Health & Security Score";
pub const LABELS: [&str; 3] = ["Health", "Security", "Final"];

/// Plot area (pixels)
const PLOT_LEFT: u32 = 70;
const PLOT_RIGHT: u32 = 680;
const PLOT_TOP: u32 = 60;
const PLOT_BOTTOM: u32 = 440;

/// Share of each slot covered by its bar
const BAR_FILL: f64 = 0.8;
const TEXT_SCALE: u32 = 2;
const Y_TICK_STEP: usize = 20;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const BAR_COLOR: Rgb<u8> = Rgb([31, 119, 180]);

/// Render the three scores and write them to `path` as PNG
pub fn render(health: f64, security: f64, final_score: f64, path: &Path) -> Result<()> {
    let img = draw(&[health, security, final_score]);
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    debug!("Chart written to {}", path.display());
    Ok(())
}

/// Draw the chart in memory
pub fn draw(values: &[f64; 3]) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let text_h = GLYPH_HEIGHT * TEXT_SCALE;

    let title_w = text_width(TITLE, TEXT_SCALE);
    draw_text(&mut img, TITLE, WIDTH.saturating_sub(title_w) / 2, 20, TEXT_SCALE, INK);

    for tick in (0..=100).step_by(Y_TICK_STEP) {
        let y = y_to_px(tick as f64);
        fill_rect(&mut img, PLOT_LEFT - 6, y, PLOT_LEFT, y + 1, INK);
        let label = tick.to_string();
        let label_w = text_width(&label, TEXT_SCALE);
        draw_text(
            &mut img,
            &label,
            PLOT_LEFT.saturating_sub(10 + label_w),
            y.saturating_sub(text_h / 2),
            TEXT_SCALE,
            INK,
        );
    }

    let slot = (PLOT_RIGHT - PLOT_LEFT) / LABELS.len() as u32;
    let bar_w = (f64::from(slot) * BAR_FILL) as u32;

    for (i, (&value, label)) in values.iter().zip(LABELS).enumerate() {
        let center = PLOT_LEFT + slot * i as u32 + slot / 2;
        let x0 = center - bar_w / 2;
        fill_rect(&mut img, x0, y_to_px(value), x0 + bar_w, PLOT_BOTTOM, BAR_COLOR);

        // Value sits one axis unit above the bar
        let annotation = format!("{:.1}", value);
        let annotation_w = text_width(&annotation, TEXT_SCALE);
        draw_text(
            &mut img,
            &annotation,
            center.saturating_sub(annotation_w / 2),
            y_to_px(value + 1.0).saturating_sub(text_h),
            TEXT_SCALE,
            INK,
        );

        let label_w = text_width(label, TEXT_SCALE);
        draw_text(
            &mut img,
            label,
            center.saturating_sub(label_w / 2),
            PLOT_BOTTOM + 12,
            TEXT_SCALE,
            INK,
        );
    }

    // Axes last so bars never cover them
    fill_rect(&mut img, PLOT_LEFT, PLOT_TOP, PLOT_LEFT + 1, PLOT_BOTTOM + 1, INK);
    fill_rect(&mut img, PLOT_LEFT, PLOT_BOTTOM, PLOT_RIGHT, PLOT_BOTTOM + 1, INK);

    img
}

/// Map an axis value to a pixel row, clamped to the plot area
fn y_to_px(value: f64) -> u32 {
    let value = if value.is_finite() {
        value.clamp(0.0, Y_MAX)
    } else {
        0.0
    };
    let span = f64::from(PLOT_BOTTOM - PLOT_TOP);
    PLOT_BOTTOM - (value / Y_MAX * span).round() as u32
}

/// Fill `[x0, x1) × [y0, y1)`, clipped to the image
fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    let x1 = x1.min(img.width());
    let y1 = y1.min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    n * (GLYPH_WIDTH + 1) * scale - scale
}

fn draw_text(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                        let px = cursor + col * scale;
                        let py = y + row as u32 * scale;
                        fill_rect(img, px, py, px + scale, py + scale, color);
                    }
                }
            }
        }
        cursor += (GLYPH_WIDTH + 1) * scale;
    }
}
