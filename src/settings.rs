use serde::{Deserialize, Serialize};

/// All effect settings consolidated into one struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSettings {
    // === Shape Parameters ===
    /// Text rasterized into the dot grid
    pub text: String,
    /// Text height in virtual pixels (60-600)
    pub font_px: f32,
    /// Sampling grid step in virtual pixels (6-60)
    pub spacing: u32,
    /// Link reach as a multiple of spacing (1.0-3.0)
    pub neighbor_factor: f32,

    // === Pointer Parameters ===
    /// Pointer influence radius in virtual pixels (40-400)
    pub repel_radius: f32,
    /// Hard cap on push distance in virtual pixels (5-120)
    pub max_repel: f32,

    // === Visual Parameters ===
    /// Dot square edge in virtual pixels (2-40)
    pub dot_size: f32,
    /// Virtual pixels per braille dot (2-16)
    pub scale: u32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            text: "PLEX".to_string(),
            font_px: 200.0,
            spacing: 15,
            neighbor_factor: 1.5,
            repel_radius: 150.0,
            max_repel: 30.0,
            dot_size: 10.0,
            scale: 8,
        }
    }
}

impl EffectSettings {
    /// Maximum anchor distance for two dots to be linked
    pub fn neighbor_radius(&self) -> f32 {
        self.spacing as f32 * self.neighbor_factor
    }

    /// Adjust font height within bounds
    pub fn adjust_font_px(&mut self, delta: f32) {
        self.font_px = (self.font_px + delta).clamp(60.0, 600.0);
    }

    /// Adjust grid spacing within bounds
    pub fn adjust_spacing(&mut self, delta: i32) {
        self.spacing = (self.spacing as i32 + delta).clamp(6, 60) as u32;
    }

    /// Adjust link reach factor within bounds
    pub fn adjust_neighbor_factor(&mut self, delta: f32) {
        self.neighbor_factor = (self.neighbor_factor + delta).clamp(1.0, 3.0);
    }

    /// Adjust pointer influence radius within bounds
    pub fn adjust_repel_radius(&mut self, delta: f32) {
        self.repel_radius = (self.repel_radius + delta).clamp(40.0, 400.0);
    }

    /// Adjust push cap within bounds
    pub fn adjust_max_repel(&mut self, delta: f32) {
        self.max_repel = (self.max_repel + delta).clamp(5.0, 120.0);
    }

    /// Adjust dot edge within bounds
    pub fn adjust_dot_size(&mut self, delta: f32) {
        self.dot_size = (self.dot_size + delta).clamp(2.0, 40.0);
    }

    /// Adjust canvas scale within bounds
    pub fn adjust_scale(&mut self, delta: i32) {
        self.scale = (self.scale as i32 + delta).clamp(2, 16) as u32;
    }
}
