mod app;
mod autopilot;
mod canvas;
mod config;
mod field;
mod glyphs;
mod palette;
mod presets;
mod sampler;
mod settings;
mod snapshot;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use palette::{ColorScheme, Palette};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "glyph-plexus")]
#[command(about = "Interactive particle-text effect in the terminal")]
struct Args {
    // === Shape Parameters ===
    /// Text to render as a dot grid (default PLEX)
    #[arg(short = 't', long)]
    text: Option<String>,

    /// Text height in virtual pixels (60-600, default 200)
    #[arg(long = "font-size")]
    font_size: Option<f32>,

    /// Sampling grid step in virtual pixels (6-60, default 15)
    #[arg(short = 's', long)]
    spacing: Option<u32>,

    /// Link reach as a multiple of spacing (1.0-3.0, default 1.5)
    #[arg(long = "link-factor")]
    link_factor: Option<f32>,

    // === Pointer Parameters ===
    /// Pointer influence radius in virtual pixels (40-400, default 150)
    #[arg(long = "repel-radius")]
    repel_radius: Option<f32>,

    /// Hard cap on push distance in virtual pixels (5-120, default 30)
    #[arg(long = "max-repel")]
    max_repel: Option<f32>,

    /// Start with the autopilot pointer enabled
    #[arg(short = 'a', long, default_value = "false")]
    autopilot: bool,

    // === Visual Parameters ===
    /// Dot square edge in virtual pixels (2-40, default 10)
    #[arg(long = "dot-size")]
    dot_size: Option<f32>,

    /// Virtual pixels per braille dot (2-16, default 8)
    #[arg(long)]
    scale: Option<u32>,

    /// Color scheme (classic, neon, ember, ocean, mono)
    #[arg(short = 'c', long)]
    colors: Option<String>,

    /// Start from a named preset (see the in-app help)
    #[arg(long)]
    preset: Option<String>,

    // === Config ===
    /// Load configuration from this file instead of the default path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file and exit
    #[arg(long = "write-config")]
    write_config: Option<PathBuf>,
}

fn parse_color_scheme(s: &str) -> ColorScheme {
    match s.to_lowercase().as_str() {
        "neon" => ColorScheme::Neon,
        "ember" | "fire" => ColorScheme::Ember,
        "ocean" | "sea" => ColorScheme::Ocean,
        "mono" | "grey" | "gray" => ColorScheme::Mono,
        _ => ColorScheme::Classic,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load config: an explicit path must parse, the default path is optional
    let mut cfg = match &args.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => config::default_path()
            .filter(|p| p.exists())
            .and_then(|p| AppConfig::load_from_file(&p).ok())
            .unwrap_or_default(),
    };

    // Presets override the config file but keep its text
    if let Some(name) = &args.preset {
        match presets::find(name) {
            Some(preset) => {
                let text = cfg.settings.text.clone();
                cfg.settings = preset.settings.clone();
                cfg.settings.text = text;
                cfg.scheme = preset.scheme;
            }
            None => {
                eprintln!("Unknown preset: {}", name);
                std::process::exit(1);
            }
        }
    }

    // Explicit flags win over both
    if let Some(text) = args.text {
        cfg.settings.text = text;
    }
    if let Some(font_px) = args.font_size {
        cfg.settings.font_px = font_px.clamp(60.0, 600.0);
    }
    if let Some(spacing) = args.spacing {
        cfg.settings.spacing = spacing.clamp(6, 60);
    }
    if let Some(factor) = args.link_factor {
        cfg.settings.neighbor_factor = factor.clamp(1.0, 3.0);
    }
    if let Some(radius) = args.repel_radius {
        cfg.settings.repel_radius = radius.clamp(40.0, 400.0);
    }
    if let Some(max_repel) = args.max_repel {
        cfg.settings.max_repel = max_repel.clamp(5.0, 120.0);
    }
    if let Some(dot_size) = args.dot_size {
        cfg.settings.dot_size = dot_size.clamp(2.0, 40.0);
    }
    if let Some(scale) = args.scale {
        cfg.settings.scale = scale.clamp(2, 16);
    }
    if let Some(colors) = &args.colors {
        cfg.scheme = parse_color_scheme(colors);
    }
    if args.autopilot {
        cfg.autopilot = true;
    }

    if let Some(path) = &args.write_config {
        cfg.save_to_file(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Get initial terminal size and create app
    let size = terminal.size()?;
    let frame_rect = ratatui::layout::Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    };
    let (canvas_width, canvas_height) = ui::get_canvas_size(frame_rect, false);
    let palette = Palette::new(cfg.scheme);
    let autopilot_on = cfg.autopilot;
    let mut app = App::new(canvas_width, canvas_height, cfg.settings, palette);
    app.autopilot_on = autopilot_on;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Target ~60fps for smooth animation
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('a') | KeyCode::Char('A') => app.toggle_autopilot(),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.rebuild(),
                        KeyCode::Char('v') | KeyCode::Char('V') => {
                            app.toggle_fullscreen();
                            // No resize event fires for this, so recompute here
                            let size = terminal.size().unwrap_or_default();
                            let (canvas_width, canvas_height) = ui::get_canvas_size(
                                ratatui::layout::Rect {
                                    x: 0,
                                    y: 0,
                                    width: size.width,
                                    height: size.height,
                                },
                                app.fullscreen_mode,
                            );
                            app.resize(canvas_width, canvas_height);
                        }
                        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                            app.toggle_help()
                        }
                        KeyCode::Char('x') | KeyCode::Char('X') => app.save_snapshot(),

                        // Color controls
                        KeyCode::Char('c') | KeyCode::Char('C') => app.cycle_color(),
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            app.cycle_scheme();
                            app.focus = Focus::Scheme;
                        }

                        // Presets
                        KeyCode::Char(c @ '1'..='6') => {
                            let index = c as usize - '1' as usize;
                            if let Some(preset) = presets::builtin().get(index) {
                                app.apply_preset(preset);
                            }
                        }

                        // Quick pointer tuning
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.settings.adjust_repel_radius(10.0);
                            app.focus = Focus::RepelRadius;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.settings.adjust_repel_radius(-10.0);
                            app.focus = Focus::RepelRadius;
                        }
                        KeyCode::Char('[') => {
                            app.settings.adjust_max_repel(-5.0);
                            app.focus = Focus::MaxRepel;
                        }
                        KeyCode::Char(']') => {
                            app.settings.adjust_max_repel(5.0);
                            app.focus = Focus::MaxRepel;
                        }

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help {
                                if app.focus.is_param() {
                                    app.adjust_focused_up();
                                } else {
                                    app.scroll_controls_up();
                                }
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help {
                                if app.focus.is_param() {
                                    app.adjust_focused_down();
                                } else {
                                    let term_size = terminal.size().unwrap_or_default();
                                    let visible = ui::get_controls_visible_lines(term_size.height);
                                    app.scroll_controls_down(ui::CONTROLS_CONTENT_LINES.saturating_sub(visible));
                                }
                            }
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else if app.focus.is_param() {
                                app.focus = Focus::Controls;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        let size = terminal.size().unwrap_or_default();
                        let area = ratatui::layout::Rect {
                            x: 0,
                            y: 0,
                            width: size.width,
                            height: size.height,
                        };
                        let (x, y) = ui::pointer_to_pixels(
                            mouse.column,
                            mouse.row,
                            area,
                            app.fullscreen_mode,
                            app.settings.scale,
                        );
                        app.pointer_moved(x, y);
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        let size = terminal.size().unwrap_or_default();
                        let area = ratatui::layout::Rect {
                            x: 0,
                            y: 0,
                            width: size.width,
                            height: size.height,
                        };
                        if ui::in_canvas(mouse.column, mouse.row, area, app.fullscreen_mode) {
                            app.cycle_color();
                        }
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    let (canvas_width, canvas_height) = ui::get_canvas_size(
                        ratatui::layout::Rect {
                            x: 0,
                            y: 0,
                            width,
                            height,
                        },
                        app.fullscreen_mode,
                    );
                    app.resize(canvas_width, canvas_height);
                }
                _ => {}
            }
        }

        // Advance the autopilot pointer
        app.tick();
    }
}
