use crate::autopilot::Autopilot;
use crate::canvas::{self, FrameCanvas};
use crate::field::ParticleField;
use crate::palette::{Palette, PaletteColor};
use crate::presets::Preset;
use crate::sampler::{self, Raster};
use crate::settings::EffectSettings;
use crate::snapshot;
use std::path::Path;

/// Focus state for parameter editing in the sidebar
/// Alphabetically ordered for consistent UI display
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    // Alphabetical order
    DotSize,
    FontSize,
    MaxRepel,
    NeighborFactor,
    RepelRadius,
    Scale,
    Scheme,
    Spacing,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through parameters in alphabetical order
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::DotSize,
            Focus::DotSize => Focus::FontSize,
            Focus::FontSize => Focus::MaxRepel,
            Focus::MaxRepel => Focus::NeighborFactor,
            Focus::NeighborFactor => Focus::RepelRadius,
            Focus::RepelRadius => Focus::Scale,
            Focus::Scale => Focus::Scheme,
            Focus::Scheme => Focus::Spacing,
            Focus::Spacing => Focus::DotSize, // Loop back
        }
    }

    /// Shift+Tab cycles through parameters in reverse alphabetical order
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Spacing,
            Focus::DotSize => Focus::Spacing, // Loop back
            Focus::FontSize => Focus::DotSize,
            Focus::MaxRepel => Focus::FontSize,
            Focus::NeighborFactor => Focus::MaxRepel,
            Focus::RepelRadius => Focus::NeighborFactor,
            Focus::Scale => Focus::RepelRadius,
            Focus::Scheme => Focus::Scale,
            Focus::Spacing => Focus::Scheme,
        }
    }

    /// Get the line index in the parameters box for this focus (alphabetical order)
    pub fn line_index(&self) -> u16 {
        match self {
            Focus::None | Focus::Controls => 0,
            Focus::DotSize => 0,
            Focus::FontSize => 1,
            Focus::MaxRepel => 2,
            Focus::NeighborFactor => 3,
            Focus::RepelRadius => 4,
            Focus::Scale => 5,
            Focus::Scheme => 6,
            Focus::Spacing => 7,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }
}

/// Main application state
pub struct App {
    pub settings: EffectSettings,
    pub palette: Palette,
    pub field: ParticleField,
    /// Canvas size in terminal cells
    cells: (u16, u16),
    /// Virtual pixel dimensions derived from cells and scale
    pub viewport: (u32, u32),
    /// Last pointer position in virtual pixels
    pub pointer: Option<(f32, f32)>,
    /// Color links are drawn with; lags the accent until the next
    /// pointer pass, so a click recolors dots before lines
    pub line_color: PaletteColor,
    pub autopilot: Autopilot,
    pub autopilot_on: bool,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub controls_scroll: u16,
    /// One-line status message shown in the sidebar
    pub notice: Option<String>,
}

impl App {
    pub fn new(canvas_width: u16, canvas_height: u16, settings: EffectSettings, palette: Palette) -> Self {
        let viewport = canvas::viewport_size(canvas_width, canvas_height, settings.scale);
        let line_color = palette.active();
        let mut app = Self {
            settings,
            palette,
            field: ParticleField::new(),
            cells: (canvas_width, canvas_height),
            viewport,
            pointer: None,
            line_color,
            autopilot: Autopilot::new(viewport.0 as f32, viewport.1 as f32),
            autopilot_on: false,
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            controls_scroll: 0,
            notice: None,
        };
        app.rebuild();
        app
    }

    /// Rasterize the text and repopulate the field from scratch.
    /// Every particle starts at rest; the pointer is not re-applied.
    pub fn rebuild(&mut self) {
        self.field.clear();
        let mut raster = Raster::new(self.viewport.0, self.viewport.1);
        raster.fill_text(
            &self.settings.text,
            self.viewport.0 as f32 / 2.0,
            self.viewport.1 as f32 / 2.0,
            self.settings.font_px,
        );
        let points = sampler::sample_ink_points(&raster, self.settings.spacing);
        self.field.populate(&points, self.settings.neighbor_radius());
        self.line_color = self.palette.active();
    }

    fn update_viewport(&mut self) {
        self.viewport = canvas::viewport_size(self.cells.0, self.cells.1, self.settings.scale);
        self.autopilot
            .recenter(self.viewport.0 as f32, self.viewport.1 as f32);
        self.rebuild();
    }

    /// Handle a canvas size change; a no-op if the size is unchanged
    pub fn resize(&mut self, canvas_width: u16, canvas_height: u16) {
        if self.cells != (canvas_width, canvas_height) {
            self.cells = (canvas_width, canvas_height);
            self.update_viewport();
        }
    }

    /// Push the field away from a pointer position in virtual pixels
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
        self.field
            .apply_pointer(x, y, self.settings.repel_radius, self.settings.max_repel);
        self.line_color = self.palette.active();
    }

    /// Advance the accent color. Dots pick the new color up on the
    /// next frame; lines keep the previous color until a pointer pass.
    pub fn cycle_color(&mut self) {
        self.palette.cycle();
    }

    /// Cycle color scheme
    pub fn cycle_scheme(&mut self) {
        self.palette.set_scheme(self.palette.scheme().next());
    }

    /// Cycle color scheme backward
    pub fn cycle_scheme_prev(&mut self) {
        self.palette.set_scheme(self.palette.scheme().prev());
    }

    /// Per-frame update; drives the synthetic pointer when enabled
    pub fn tick(&mut self) {
        if self.autopilot_on {
            let (x, y) = self
                .autopilot
                .step(self.viewport.0 as f32, self.viewport.1 as f32);
            self.pointer_moved(x, y);
        }
    }

    /// Plot the current frame: link lines first, then dot squares
    pub fn compose(&self) -> FrameCanvas {
        let mut canvas = FrameCanvas::new(self.cells.0, self.cells.1, self.settings.scale);
        let half = self.settings.dot_size / 2.0;
        for &(a, b) in self.field.pairs() {
            let pa = self.field.particles()[a];
            let pb = self.field.particles()[b];
            canvas.stroke_line(
                pa.current_x + half,
                pa.current_y + half,
                pb.current_x + half,
                pb.current_y + half,
            );
        }
        for particle in self.field.particles() {
            canvas.fill_square(particle.current_x, particle.current_y, self.settings.dot_size);
        }
        canvas
    }

    /// Apply a preset, keeping the current text
    pub fn apply_preset(&mut self, preset: &Preset) {
        let text = self.settings.text.clone();
        self.settings = preset.settings.clone();
        self.settings.text = text;
        self.palette.set_scheme(preset.scheme);
        self.update_viewport();
        self.notice = Some(format!("{}: {}", preset.name, preset.description));
    }

    /// Render the current frame to a PNG in the working directory
    pub fn save_snapshot(&mut self) {
        let canvas = self.compose();
        let image = snapshot::render_image(&canvas, self.palette.active().rgb, self.line_color.rgb);
        match snapshot::save_in(Path::new("."), &image) {
            Ok(path) => self.notice = Some(format!("Saved {}", path.display())),
            Err(e) => self.notice = Some(e),
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::DotSize => self.settings.adjust_dot_size(2.0),
            Focus::FontSize => {
                self.settings.adjust_font_px(20.0);
                self.rebuild();
            }
            Focus::MaxRepel => self.settings.adjust_max_repel(5.0),
            Focus::NeighborFactor => {
                self.settings.adjust_neighbor_factor(0.1);
                self.rebuild();
            }
            Focus::RepelRadius => self.settings.adjust_repel_radius(10.0),
            Focus::Scale => {
                self.settings.adjust_scale(1);
                self.update_viewport();
            }
            Focus::Scheme => self.cycle_scheme(),
            Focus::Spacing => {
                self.settings.adjust_spacing(1);
                self.rebuild();
            }
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_down(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::DotSize => self.settings.adjust_dot_size(-2.0),
            Focus::FontSize => {
                self.settings.adjust_font_px(-20.0);
                self.rebuild();
            }
            Focus::MaxRepel => self.settings.adjust_max_repel(-5.0),
            Focus::NeighborFactor => {
                self.settings.adjust_neighbor_factor(-0.1);
                self.rebuild();
            }
            Focus::RepelRadius => self.settings.adjust_repel_radius(-10.0),
            Focus::Scale => {
                self.settings.adjust_scale(-1);
                self.update_viewport();
            }
            Focus::Scheme => self.cycle_scheme_prev(),
            Focus::Spacing => {
                self.settings.adjust_spacing(-1);
                self.rebuild();
            }
        }
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Navigate to previous parameter (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggle the synthetic pointer
    pub fn toggle_autopilot(&mut self) {
        self.autopilot_on = !self.autopilot_on;
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    /// Scroll help content up
    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    /// Scroll help content down
    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    /// Scroll controls box up
    pub fn scroll_controls_up(&mut self) {
        self.controls_scroll = self.controls_scroll.saturating_sub(1);
    }

    /// Scroll controls box down
    pub fn scroll_controls_down(&mut self, max_scroll: u16) {
        self.controls_scroll = (self.controls_scroll + 1).min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ColorScheme;

    fn test_app() -> App {
        let settings = EffectSettings {
            text: "I".to_string(),
            font_px: 140.0,
            ..Default::default()
        };
        App::new(40, 20, settings, Palette::new(ColorScheme::Classic))
    }

    #[test]
    fn test_new_populates_a_resting_field() {
        let app = test_app();
        assert_eq!(app.viewport, (640, 640));
        assert!(!app.field.is_empty());
        for particle in app.field.particles() {
            assert_eq!(particle.displacement(), 0.0);
        }
    }

    #[test]
    fn test_resize_matches_a_fresh_build() {
        let mut app = test_app();
        app.resize(30, 15);
        let fresh = App::new(30, 15, app.settings.clone(), Palette::new(ColorScheme::Classic));
        assert_eq!(app.viewport, (480, 480));
        assert_eq!(app.field.len(), fresh.field.len());
        assert_eq!(app.field.link_count(), fresh.field.link_count());
    }

    #[test]
    fn test_color_cycle_wraps() {
        let mut app = test_app();
        for _ in 0..7 {
            app.cycle_color();
        }
        assert_eq!(app.palette.cursor(), 7 % 3);
    }

    #[test]
    fn test_line_color_lags_until_a_pointer_pass() {
        let mut app = test_app();
        let initial = app.palette.active();
        app.cycle_color();
        assert_eq!(app.line_color, initial);
        app.pointer_moved(320.0, 320.0);
        assert_ne!(app.line_color, initial);
        assert_eq!(app.line_color, app.palette.active());
    }

    #[test]
    fn test_pointer_displaces_near_dots_only() {
        let mut app = test_app();
        app.pointer_moved(320.0, 320.0);
        assert!(app.field.particles().iter().any(|p| p.displacement() > 0.0));
        app.pointer_moved(-10000.0, -10000.0);
        for particle in app.field.particles() {
            assert_eq!(particle.displacement(), 0.0);
        }
    }

    #[test]
    fn test_preset_keeps_the_current_text() {
        let mut app = test_app();
        let preset = crate::presets::find("Billboard").unwrap();
        app.apply_preset(&preset);
        assert_eq!(app.settings.text, "I");
        assert_eq!(app.settings.font_px, 320.0);
        assert_eq!(app.palette.scheme(), ColorScheme::Ember);
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_tick_drives_the_pointer_on_autopilot() {
        let mut app = test_app();
        app.tick();
        assert!(app.pointer.is_none());
        app.toggle_autopilot();
        app.tick();
        assert!(app.pointer.is_some());
    }

    #[test]
    fn test_compose_plots_the_field() {
        let app = test_app();
        let canvas = app.compose();
        let active = app.palette.active().color();
        assert!(!canvas.cells(active, app.line_color.color()).is_empty());
    }

    #[test]
    fn test_scale_adjustment_rebuilds_the_viewport() {
        let mut app = test_app();
        app.focus = Focus::Scale;
        app.adjust_focused_up();
        assert_eq!(app.settings.scale, 9);
        assert_eq!(app.viewport, (720, 720));
    }

    #[test]
    fn test_focus_cycle_walks_all_params() {
        let mut focus = Focus::Controls.next();
        let mut seen = Vec::new();
        for _ in 0..8 {
            assert!(focus.is_param());
            seen.push(focus.line_index());
            focus = focus.next();
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
        assert_eq!(focus, Focus::DotSize);
    }

    #[test]
    fn test_focus_prev_inverts_next_for_params() {
        let mut focus = Focus::DotSize;
        for _ in 0..8 {
            assert_eq!(focus.next().prev(), focus);
            focus = focus.next();
        }
    }
}
