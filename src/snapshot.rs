use crate::canvas::FrameCanvas;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Renders the frame at dot resolution onto a black background.
/// Particle dots win over line dots, matching the terminal output.
pub fn render_image(canvas: &FrameCanvas, dot_rgb: (u8, u8, u8), line_rgb: (u8, u8, u8)) -> RgbaImage {
    let width = canvas.dot_width().max(1) as u32;
    let height = canvas.dot_height().max(1) as u32;
    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    for y in 0..canvas.dot_height() {
        for x in 0..canvas.dot_width() {
            if canvas.dot_at(x, y) {
                image.put_pixel(x as u32, y as u32, Rgba([dot_rgb.0, dot_rgb.1, dot_rgb.2, 255]));
            } else if canvas.line_at(x, y) {
                image.put_pixel(x as u32, y as u32, Rgba([line_rgb.0, line_rgb.1, line_rgb.2, 255]));
            }
        }
    }
    image
}

/// Saves the image under `dir` with the first free numbered name.
pub fn save_in(dir: &Path, image: &RgbaImage) -> Result<PathBuf, String> {
    for n in 0..1000 {
        let path = dir.join(format!("glyph-plexus-{:03}.png", n));
        if !path.exists() {
            image
                .save(&path)
                .map_err(|e| format!("Failed to write snapshot: {}", e))?;
            return Ok(path);
        }
    }
    Err("No free snapshot slot (glyph-plexus-000..999 all exist)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_paints_dots_and_lines() {
        let mut canvas = FrameCanvas::new(2, 1, 4);
        canvas.fill_square(0.0, 0.0, 4.0);
        canvas.stroke_line(8.0, 0.0, 12.0, 0.0);

        let image = render_image(&canvas, (255, 0, 0), (0, 0, 255));
        assert_eq!((image.width(), image.height()), (4, 4));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_save_picks_the_first_free_slot() {
        let dir = tempdir().unwrap();
        let mut canvas = FrameCanvas::new(2, 1, 4);
        canvas.fill_square(0.0, 0.0, 4.0);
        let image = render_image(&canvas, (255, 0, 0), (0, 0, 255));

        let first = save_in(dir.path(), &image).unwrap();
        assert!(first.ends_with("glyph-plexus-000.png"));
        let second = save_in(dir.path(), &image).unwrap();
        assert!(second.ends_with("glyph-plexus-001.png"));
    }
}
