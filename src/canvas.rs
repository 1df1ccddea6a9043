use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Virtual pixel dimensions backing a canvas of terminal cells.
///
/// Every cell is 2x4 braille dots and every dot is `scale` virtual
/// pixels wide, so effect geometry stays proportional when the
/// terminal or the scale changes.
pub fn viewport_size(canvas_width: u16, canvas_height: u16, scale: u32) -> (u32, u32) {
    let width = (canvas_width as u32 * 2).max(2) * scale;
    let height = (canvas_height as u32 * 4).max(4) * scale;
    (width, height)
}

/// One frame of dots and link lines at braille-dot resolution.
///
/// Dots and lines are plotted into separate planes so the particle
/// color can win over the line color wherever they overlap in a cell.
pub struct FrameCanvas {
    dot_width: usize,
    dot_height: usize,
    scale: u32,
    dots: Vec<bool>,
    lines: Vec<bool>,
}

impl FrameCanvas {
    pub fn new(canvas_width: u16, canvas_height: u16, scale: u32) -> Self {
        let dot_width = canvas_width as usize * 2;
        let dot_height = canvas_height as usize * 4;
        Self {
            dot_width,
            dot_height,
            scale: scale.max(1),
            dots: vec![false; dot_width * dot_height],
            lines: vec![false; dot_width * dot_height],
        }
    }

    pub fn dot_width(&self) -> usize {
        self.dot_width
    }

    pub fn dot_height(&self) -> usize {
        self.dot_height
    }

    pub fn dot_at(&self, x: usize, y: usize) -> bool {
        x < self.dot_width && y < self.dot_height && self.dots[y * self.dot_width + x]
    }

    pub fn line_at(&self, x: usize, y: usize) -> bool {
        x < self.dot_width && y < self.dot_height && self.lines[y * self.dot_width + x]
    }

    fn to_dot(&self, v: f32) -> i64 {
        (v / self.scale as f32).floor() as i64
    }

    fn set_dot(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.dot_width as i64 || y >= self.dot_height as i64 {
            return;
        }
        self.dots[y as usize * self.dot_width + x as usize] = true;
    }

    fn set_line(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.dot_width as i64 || y >= self.dot_height as i64 {
            return;
        }
        self.lines[y as usize * self.dot_width + x as usize] = true;
    }

    /// Plots a filled square with its top-left corner at (x, y),
    /// `size` virtual pixels on a side. Off-canvas parts are clipped.
    pub fn fill_square(&mut self, x: f32, y: f32, size: f32) {
        let size = size.max(1.0);
        let x0 = self.to_dot(x);
        let y0 = self.to_dot(y);
        let x1 = self.to_dot(x + size - 1.0);
        let y1 = self.to_dot(y + size - 1.0);
        for dy in y0..=y1 {
            for dx in x0..=x1 {
                self.set_dot(dx, dy);
            }
        }
    }

    /// Plots a line between two virtual-pixel points with Bresenham's
    /// algorithm at dot resolution.
    pub fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let mut x = self.to_dot(x0);
        let mut y = self.to_dot(y0);
        let ex = self.to_dot(x1);
        let ey = self.to_dot(y1);
        let dx = (ex - x).abs();
        let dy = -(ey - y).abs();
        let sx = if x < ex { 1 } else { -1 };
        let sy = if y < ey { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_line(x, y);
            if x == ex && y == ey {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Collapses both planes into colored braille cells.
    ///
    /// Only cells with at least one lit dot are emitted. A cell that
    /// contains any particle dot takes `dot_color`; cells with only
    /// line dots take `line_color`.
    pub fn cells(&self, dot_color: Color, line_color: Color) -> Vec<BrailleCell> {
        let cells_w = self.dot_width / 2;
        let cells_h = self.dot_height / 4;
        let mut cells = Vec::with_capacity(cells_w * cells_h / 4);

        for cy in 0..cells_h {
            for cx in 0..cells_w {
                let mut pattern: u8 = 0;
                let mut has_particle = false;

                for dx in 0..2 {
                    for dy in 0..4 {
                        let px = cx * 2 + dx;
                        let py = cy * 4 + dy;
                        if self.dot_at(px, py) {
                            pattern |= BRAILLE_DOTS[dx][dy];
                            has_particle = true;
                        } else if self.line_at(px, py) {
                            pattern |= BRAILLE_DOTS[dx][dy];
                        }
                    }
                }

                if pattern != 0 {
                    let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                    cells.push(BrailleCell {
                        x: cx as u16,
                        y: cy as u16,
                        char: braille_char,
                        color: if has_particle { dot_color } else { line_color },
                    });
                }
            }
        }

        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_pattern() {
        assert_eq!(BRAILLE_DOTS[0][0], 0x01); // Top-left
        assert_eq!(BRAILLE_DOTS[1][0], 0x08); // Top-right
        assert_eq!(BRAILLE_DOTS[0][3], 0x40); // Bottom-left
        assert_eq!(BRAILLE_DOTS[1][3], 0x80); // Bottom-right

        // All dots should give 0xFF
        let all_dots: u8 = BRAILLE_DOTS[0].iter().sum::<u8>() + BRAILLE_DOTS[1].iter().sum::<u8>();
        assert_eq!(all_dots, 0xFF);
    }

    #[test]
    fn test_fill_square_lights_the_scaled_dots() {
        let mut canvas = FrameCanvas::new(4, 4, 8);
        canvas.fill_square(0.0, 0.0, 10.0);
        assert!(canvas.dot_at(0, 0));
        assert!(canvas.dot_at(1, 1));
        assert!(!canvas.dot_at(3, 3));

        let cells = canvas.cells(Color::Red, Color::Blue);
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].x, cells[0].y), (0, 0));
        assert_eq!(cells[0].color, Color::Red);
    }

    #[test]
    fn test_horizontal_line_spans_cells() {
        let mut canvas = FrameCanvas::new(4, 2, 8);
        canvas.stroke_line(0.0, 0.0, 63.0, 0.0);
        let cells = canvas.cells(Color::Red, Color::Blue);
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert_eq!(cell.y, 0);
            assert_eq!(cell.color, Color::Blue);
        }
    }

    #[test]
    fn test_particle_color_wins_over_line_color() {
        let mut canvas = FrameCanvas::new(2, 2, 8);
        canvas.stroke_line(0.0, 0.0, 20.0, 0.0);
        canvas.fill_square(0.0, 0.0, 8.0);
        let cells = canvas.cells(Color::Red, Color::Blue);
        assert!(cells.iter().any(|c| c.color == Color::Red));
        assert!(!cells.iter().any(|c| (c.x, c.y) == (0, 0) && c.color == Color::Blue));
    }

    #[test]
    fn test_off_canvas_plots_are_clipped() {
        let mut canvas = FrameCanvas::new(2, 2, 8);
        canvas.fill_square(-100.0, -100.0, 5.0);
        canvas.stroke_line(500.0, 500.0, 600.0, 600.0);
        assert!(canvas.cells(Color::Red, Color::Blue).is_empty());
    }

    #[test]
    fn test_viewport_size_scales_braille_resolution() {
        assert_eq!(viewport_size(100, 40, 8), (1600, 1280));
        assert_eq!(viewport_size(0, 0, 8), (16, 32));
    }
}
