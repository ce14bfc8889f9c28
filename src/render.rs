//! Comparison graphic: a fixed 950x700 JPEG with a header band, two team
//! columns and one striped row per category.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::{info, warn};

use crate::model::TeamReport;
use crate::report::format_stat_display;

const IMG_WIDTH: u32 = 950;
const IMG_HEIGHT: u32 = 700;
const HEADER_HEIGHT: u32 = 60;
const ROW_HEIGHT: i32 = 28;
const JPEG_QUALITY: u8 = 95;

const HEADER_SIZE: f32 = 22.0;
const TEAM_SIZE: f32 = 18.0;
const STAT_SIZE: f32 = 13.0;

const MAROON: Rgb<u8> = Rgb([128, 0, 32]);
const GOLD: Rgb<u8> = Rgb([255, 215, 0]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT_GRAY: Rgb<u8> = Rgb([240, 240, 240]);

const FONT_CANDIDATES: &[&str] = &[
    "arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub enum Typeface {
    Scalable(FontVec),
    /// Built-in 8x8 glyphs, scaled by whole pixels.
    Bitmap,
}

impl Typeface {
    /// First loadable font out of `preferred` and the usual system locations;
    /// the bitmap face otherwise.
    pub fn load(preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .into_iter()
            .map(Path::to_path_buf)
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = fs::read(&path) else {
                continue;
            };
            match FontVec::try_from_vec(bytes) {
                Ok(font) => return Typeface::Scalable(font),
                Err(err) => warn!("Ignoring font {}: {err}", path.display()),
            }
        }
        warn!("No scalable font found, falling back to bitmap font");
        Typeface::Bitmap
    }

    fn draw(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match self {
            Typeface::Scalable(font) => {
                draw_text_mut(img, color, x, y, PxScale::from(size), font, text);
            }
            Typeface::Bitmap => draw_bitmap_text(img, color, x, y, size, text),
        }
    }
}

fn draw_bitmap_text(img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
    let px = ((size / 8.0).round() as i32).max(1);
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(glyph) = BASIC_FONTS.get(ch) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let rect = Rect::at(pen_x + col * px, y + row as i32 * px)
                        .of_size(px as u32, px as u32);
                    draw_filled_rect_mut(img, rect, color);
                }
            }
        }
        pen_x += 8 * px;
    }
}

/// `<team1>_vs_<team2>_FCS_comparison.jpg` with spaces turned into underscores.
pub fn default_image_filename(team1: &str, team2: &str) -> String {
    format!(
        "{}_vs_{}_FCS_comparison.jpg",
        team1.replace(' ', "_"),
        team2.replace(' ', "_")
    )
}

/// Draws the comparison. The footer date is only drawn when given, so equal
/// inputs always give equal pixels.
pub fn render_comparison<'a>(
    categories: impl IntoIterator<Item = &'a str>,
    team1: &TeamReport,
    team2: &TeamReport,
    generated_on: Option<NaiveDate>,
    face: &Typeface,
) -> RgbImage {
    let width = IMG_WIDTH as i32;
    let height = IMG_HEIGHT as i32;
    let mut img = RgbImage::from_pixel(IMG_WIDTH, IMG_HEIGHT, GOLD);

    draw_filled_rect_mut(
        &mut img,
        Rect::at(0, 0).of_size(IMG_WIDTH, HEADER_HEIGHT),
        MAROON,
    );
    let header = format!(
        "{}-{} FCS STATISTICS AND NOTES",
        team1.team.to_uppercase(),
        team2.team.to_uppercase()
    );
    face.draw(&mut img, GOLD, 70, 18, HEADER_SIZE, &header);

    let section_y = HEADER_HEIGHT as i32 + 20;
    face.draw(
        &mut img,
        BLACK,
        20,
        section_y,
        TEAM_SIZE,
        "▶ STAT COMPARISON (FCS NATIONAL RANK)",
    );

    let col_y = section_y + 40;
    face.draw(&mut img, BLACK, 50, col_y, TEAM_SIZE, &team1.team);
    face.draw(&mut img, BLACK, width - 250, col_y, TEAM_SIZE, &team2.team);

    let line_y = (col_y + 30) as f32;
    draw_line_segment_mut(&mut img, (20.0, line_y), ((width - 20) as f32, line_y), BLACK);

    let mut current_y = col_y + 30 + 15;
    for (i, category) in categories.into_iter().enumerate() {
        if current_y > height - 50 {
            break;
        }
        if i % 2 == 0 {
            draw_filled_rect_mut(
                &mut img,
                Rect::at(0, current_y - 5).of_size(IMG_WIDTH, ROW_HEIGHT as u32),
                LIGHT_GRAY,
            );
        }
        face.draw(&mut img, BLACK, 30, current_y, STAT_SIZE, category);
        let left = format_stat_display(team1.get(category));
        face.draw(&mut img, BLACK, 400, current_y, STAT_SIZE, &left);
        let right = format_stat_display(team2.get(category));
        face.draw(&mut img, BLACK, 650, current_y, STAT_SIZE, &right);
        current_y += ROW_HEIGHT;
    }

    if let Some(date) = generated_on {
        let footer = format!("Generated {}", date.format("%b %d, %Y"));
        face.draw(&mut img, BLACK, 30, height - 30, STAT_SIZE, &footer);
    }

    img
}

pub fn save_jpeg(img: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .with_context(|| format!("encode {}", path.display()))?;
    Ok(())
}

/// Renders and writes the comparison graphic to `path`.
pub fn create_comparison_image<'a>(
    categories: impl IntoIterator<Item = &'a str>,
    team1: &TeamReport,
    team2: &TeamReport,
    generated_on: Option<NaiveDate>,
    path: &Path,
    font_path: Option<&Path>,
) -> Result<PathBuf> {
    let face = Typeface::load(font_path);
    let img = render_comparison(categories, team1, team2, generated_on, &face);
    save_jpeg(&img, path)?;
    info!("FCS comparison chart saved as: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filename_replaces_spaces() {
        assert_eq!(
            default_image_filename("Bethune-Cookman", "Alabama A&M"),
            "Bethune-Cookman_vs_Alabama_A&M_FCS_comparison.jpg"
        );
    }

    #[test]
    fn missing_font_file_still_draws_text() {
        let face = Typeface::load(Some(Path::new("/nonexistent/font.ttf")));
        let mut img = RgbImage::from_pixel(40, 20, GOLD);
        face.draw(&mut img, BLACK, 0, 0, 12.0, "A");
        assert!(img.pixels().any(|p| *p != GOLD));
    }

    #[test]
    fn bitmap_text_skips_unknown_glyphs() {
        let mut img = RgbImage::from_pixel(40, 20, GOLD);
        draw_bitmap_text(&mut img, BLACK, 0, 0, 8.0, "\u{25B6}");
        assert!(img.pixels().all(|p| *p == GOLD));
    }

    #[test]
    fn render_has_fixed_canvas_and_header_band() {
        let a = TeamReport::new("A");
        let b = TeamReport::new("B");
        let img = render_comparison(["Scoring Offense"], &a, &b, None, &Typeface::Bitmap);
        assert_eq!(img.dimensions(), (950, 700));
        assert_eq!(*img.get_pixel(5, 5), MAROON);
        assert_eq!(*img.get_pixel(5, 690), GOLD);
    }

    #[test]
    fn render_is_stable_without_footer_date() {
        let mut a = TeamReport::new("Bethune-Cookman");
        a.push(
            "Scoring Offense",
            crate::model::CategoryResult::Found {
                value: "22.5".to_string(),
                rank: "(40/119)".to_string(),
            },
        );
        let b = TeamReport::new("Alabama A&M");
        let first = render_comparison(["Scoring Offense"], &a, &b, None, &Typeface::Bitmap);
        let second = render_comparison(["Scoring Offense"], &a, &b, None, &Typeface::Bitmap);
        assert_eq!(first.as_raw(), second.as_raw());
        assert!((0..IMG_WIDTH).all(|x| *first.get_pixel(x, IMG_HEIGHT - 25) == GOLD));

        let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        let dated = render_comparison(["Scoring Offense"], &a, &b, Some(date), &Typeface::Bitmap);
        assert_ne!(first.as_raw(), dated.as_raw());
    }
}
