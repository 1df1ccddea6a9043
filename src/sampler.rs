use crate::glyphs;

/// Alpha values strictly above this count as inked when sampling.
pub const INK_THRESHOLD: u8 = 128;

/// A grid point that landed on inked text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Offscreen alpha-only surface the text is drawn into before sampling.
pub struct Raster {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at a pixel, 0 outside the surface.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Draws `text` centered on (center_x, center_y) at `font_px` tall.
    ///
    /// Characters without a glyph advance the pen but leave no ink, so
    /// unsupported input degrades to blank space instead of failing.
    pub fn fill_text(&mut self, text: &str, center_x: f32, center_y: f32, font_px: f32) {
        let count = text.chars().count();
        if font_px <= 0.0 || count == 0 {
            return;
        }
        let cell = font_px / glyphs::GLYPH_HEIGHT as f32;
        let advance = glyphs::GLYPH_ADVANCE as f32 * cell;
        let glyph_width = glyphs::GLYPH_WIDTH as f32 * cell;
        let total_width = advance * count as f32 - (advance - glyph_width);
        let left = center_x - total_width / 2.0;
        let top = center_y - font_px / 2.0;

        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = glyphs::rows(ch) else {
                continue;
            };
            let origin_x = left + i as f32 * advance;
            for (row, &mask) in rows.iter().enumerate() {
                for col in 0..glyphs::GLYPH_WIDTH {
                    if (mask >> (glyphs::GLYPH_WIDTH - 1 - col)) & 1 != 0 {
                        self.fill_box(
                            origin_x + col as f32 * cell,
                            top + row as f32 * cell,
                            cell,
                        );
                    }
                }
            }
        }
    }

    fn fill_box(&mut self, x: f32, y: f32, size: f32) {
        let x0 = x.round().max(0.0) as u32;
        let y0 = y.round().max(0.0) as u32;
        let x1 = ((x + size).round() as i64).clamp(0, self.width as i64) as u32;
        let y1 = ((y + size).round() as i64).clamp(0, self.height as i64) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.alpha[(py as usize) * (self.width as usize) + px as usize] = 255;
            }
        }
    }
}

/// Walks the raster on a `spacing`-pixel grid, row by row, and keeps
/// every grid point whose alpha clears the ink threshold.
pub fn sample_ink_points(raster: &Raster, spacing: u32) -> Vec<Point> {
    let mut points = Vec::new();
    if spacing == 0 {
        return points;
    }
    let mut y = 0;
    while y < raster.height() {
        let mut x = 0;
        while x < raster.width() {
            if raster.alpha_at(x, y) > INK_THRESHOLD {
                points.push(Point { x, y });
            }
            x += spacing;
        }
        y += spacing;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_raster_samples_nothing() {
        let raster = Raster::new(300, 150);
        assert!(sample_ink_points(&raster, 15).is_empty());
    }

    #[test]
    fn test_fill_text_inks_the_glyph_interior() {
        let mut raster = Raster::new(400, 200);
        raster.fill_text("A", 200.0, 100.0, 70.0);
        // The crossbar row of A spans the full glyph width at mid-height.
        assert_eq!(raster.alpha_at(200, 100), 255);
        assert_eq!(raster.alpha_at(2, 2), 0);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let mut raster = Raster::new(400, 200);
        raster.fill_text("O", 200.0, 100.0, 140.0);
        let first = sample_ink_points(&raster, 15);
        let second = sample_ink_points(&raster, 15);
        assert_eq!(first, second);
    }

    #[test]
    fn test_points_land_on_the_grid_in_row_major_order() {
        let mut raster = Raster::new(400, 200);
        raster.fill_text("O", 200.0, 100.0, 140.0);
        let points = sample_ink_points(&raster, 15);
        assert!(!points.is_empty());
        for p in &points {
            assert_eq!(p.x % 15, 0);
            assert_eq!(p.y % 15, 0);
        }
        for pair in points.windows(2) {
            assert!((pair[0].y, pair[0].x) < (pair[1].y, pair[1].x));
        }
    }

    #[test]
    fn test_unsupported_text_yields_no_points() {
        let mut raster = Raster::new(400, 200);
        raster.fill_text("~~~", 200.0, 100.0, 140.0);
        assert!(sample_ink_points(&raster, 15).is_empty());
    }

    #[test]
    fn test_alpha_out_of_range_reads_zero() {
        let raster = Raster::new(10, 10);
        assert_eq!(raster.alpha_at(10, 0), 0);
        assert_eq!(raster.alpha_at(0, 99), 0);
    }
}
