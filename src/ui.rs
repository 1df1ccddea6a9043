use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;
const STATUS_HEIGHT: u16 = 7;
const PARAMS_HEIGHT: u16 = 12;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

/// Number of lines in controls content
pub const CONTROLS_CONTENT_LINES: u16 = 13;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Calculate the canvas size (excluding borders)
pub fn get_canvas_size(frame_area: Rect, fullscreen: bool) -> (u16, u16) {
    if fullscreen {
        (frame_area.width.saturating_sub(2), frame_area.height.saturating_sub(2))
    } else {
        let canvas_width = frame_area.width.saturating_sub(SIDEBAR_WIDTH + 2);
        let canvas_height = frame_area.height.saturating_sub(2);
        (canvas_width, canvas_height)
    }
}

/// Canvas interior in terminal coordinates
fn canvas_inner(frame_area: Rect, fullscreen: bool) -> Rect {
    let (width, height) = get_canvas_size(frame_area, fullscreen);
    let x = if fullscreen {
        frame_area.x + 1
    } else {
        frame_area.x + SIDEBAR_WIDTH + 1
    };
    Rect { x, y: frame_area.y + 1, width, height }
}

/// Map a terminal mouse position to virtual pixels at the center of
/// the hovered cell. Positions outside the canvas map to coordinates
/// beyond the viewport, which the field treats as a distant pointer.
pub fn pointer_to_pixels(column: u16, row: u16, frame_area: Rect, fullscreen: bool, scale: u32) -> (f32, f32) {
    let inner = canvas_inner(frame_area, fullscreen);
    let cell_x = column as i32 - inner.x as i32;
    let cell_y = row as i32 - inner.y as i32;
    let px = (cell_x * 2 + 1) * scale as i32;
    let py = (cell_y * 4 + 2) * scale as i32;
    (px as f32, py as f32)
}

/// Whether a terminal mouse position is over the canvas interior
pub fn in_canvas(column: u16, row: u16, frame_area: Rect, fullscreen: bool) -> bool {
    let inner = canvas_inner(frame_area, fullscreen);
    column >= inner.x
        && column < inner.x + inner.width
        && row >= inner.y
        && row < inner.y + inner.height
}

/// Visible lines of the controls box for a given terminal height
pub fn get_controls_visible_lines(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(STATUS_HEIGHT + PARAMS_HEIGHT + 2)
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(PARAMS_HEIGHT),
            Constraint::Min(10),
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Glyph Plexus ");

    let displaced = app
        .field
        .particles()
        .iter()
        .filter(|p| p.displacement() > 0.0)
        .count();

    let active = app.palette.active();
    let (mode_text, mode_color) = if app.autopilot_on {
        ("AUTOPILOT", HIGHLIGHT_COLOR)
    } else {
        ("POINTER", BORDER_COLOR)
    };

    let content = vec![
        Line::from(Span::styled(
            format!("{} dots  {} links", app.field.len(), app.field.link_count()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("displaced {}", displaced),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(vec![
            Span::styled("██ ", Style::default().fg(active.color())),
            Span::styled(active.name, Style::default().fg(TEXT_COLOR)),
            Span::styled(
                format!(" ({}/{})", app.palette.cursor() + 1, app.palette.scheme().colors().len()),
                Style::default().fg(DIM_TEXT_COLOR),
            ),
        ]),
        Line::from(Span::styled(mode_text, Style::default().fg(mode_color))),
        Line::from(Span::styled(
            app.notice.as_deref().unwrap_or("").to_string(),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let settings = &app.settings;

    let content = vec![
        make_line(
            "Dot size",
            format!("{:.0}", settings.dot_size),
            app.focus == Focus::DotSize,
        ),
        make_line(
            "Font",
            format!("{:.0}", settings.font_px),
            app.focus == Focus::FontSize,
        ),
        make_line(
            "Max repel",
            format!("{:.0}", settings.max_repel),
            app.focus == Focus::MaxRepel,
        ),
        make_line(
            "Neighbor",
            format!("{:.1}", settings.neighbor_factor),
            app.focus == Focus::NeighborFactor,
        ),
        make_line(
            "Repel radius",
            format!("{:.0}", settings.repel_radius),
            app.focus == Focus::RepelRadius,
        ),
        make_line(
            "Scale",
            format!("{}", settings.scale),
            app.focus == Focus::Scale,
        ),
        make_line(
            "Scheme",
            app.palette.scheme().name().to_string(),
            app.focus == Focus::Scheme,
        ),
        make_line(
            "Spacing",
            format!("{}", settings.spacing),
            app.focus == Focus::Spacing,
        ),
        Line::from(Span::styled(
            format!("  Text: {}", settings.text),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("  Links reach: {:.1}", settings.neighbor_radius()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    // Calculate scroll to keep focused item visible based on actual area
    let focus_line = app.focus.line_index();
    let visible_height = area.height.saturating_sub(2); // minus borders
    let content_height = content.len() as u16;

    let scroll = if visible_height == 0 || visible_height >= content_height {
        0 // No scrolling needed
    } else if focus_line >= visible_height {
        // Scroll to show focused line at bottom of visible area
        focus_line.saturating_sub(visible_height - 1)
    } else {
        0 // Focus is within first visible lines
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Mouse", "stir the dots".to_string()),
        make_control("Click", "cycle color".to_string()),
        make_control("C", format!("color: {}", app.palette.active().name)),
        make_control("M", format!("scheme: {}", app.palette.scheme().name())),
        make_control("A", "autopilot".to_string()),
        make_control("R", "resample".to_string()),
        make_control("X", "save PNG".to_string()),
        make_control("V", "fullscreen".to_string()),
        make_control("H/?", "help".to_string()),
        make_control("1-6", "presets".to_string()),
        make_control("+/-", "repel radius".to_string()),
        make_control("[/]", "max repel".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let content_height = content.len() as u16;
    let visible_height = area.height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    let title = if is_scrollable {
        " Controls (↑↓) "
    } else {
        " Controls "
    };

    let block = styled_block(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((app.controls_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.field.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "no dots sampled - try other text or a larger font",
            Style::default().fg(DIM_TEXT_COLOR),
        )));
        frame.render_widget(hint, inner);
        return;
    }

    let canvas = app.compose();
    let cells = canvas.cells(app.palette.active().color(), app.line_color.color());

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            let paragraph = Paragraph::new(Line::from(span));
            frame.render_widget(paragraph, cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(40);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("GLYPH PLEXUS", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Your text becomes a grid of dots joined by short links. Dots flee the mouse and snap back when it leaves."),
        Line::from(""),
        Line::from(Span::styled("POINTER:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Move over the canvas to stir the dots. Click the canvas to cycle the accent color; links catch up on the next pointer pass. A toggles a wandering autopilot pointer."),
        Line::from(""),
        Line::from(Span::styled("PRESETS (1-6):", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("1=Classic, 2=Fine Mesh, 3=Billboard, 4=Skittish, 5=Calm, 6=Wireframe. Presets keep your text."),
        Line::from(""),
        Line::from(Span::styled("PARAMETERS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from(""),
        Line::from(Span::styled("Spacing / Neighbor", Style::default().fg(TEXT_COLOR))),
        Line::from("Spacing sets the sampling grid step; dots link when closer than spacing times the neighbor factor."),
        Line::from(""),
        Line::from(Span::styled("Font / Text", Style::default().fg(TEXT_COLOR))),
        Line::from("Text height in virtual pixels. Change the text itself with the -t flag at startup."),
        Line::from(""),
        Line::from(Span::styled("Repel radius / Max repel", Style::default().fg(TEXT_COLOR))),
        Line::from("How far the pointer reaches and how far a dot can be pushed. Outside the radius dots sit exactly on their grid anchors."),
        Line::from(""),
        Line::from(Span::styled("Scale", Style::default().fg(TEXT_COLOR))),
        Line::from("Virtual pixels per braille dot. Lower = more detail on screen, higher = bigger dots."),
        Line::from(""),
        Line::from(Span::styled("SNAPSHOTS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("X saves the current frame as a numbered PNG in the working directory."),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab/Arrows=Adjust, R=Resample, C=Color, M=Scheme, V=Fullscreen, Esc=Back, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    // Update title to show scroll hint if scrollable
    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_accounts_for_borders() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(get_canvas_size(area, true), (98, 38));
        assert_eq!(get_canvas_size(area, false), (100 - SIDEBAR_WIDTH - 2, 38));
    }

    #[test]
    fn test_pointer_maps_to_cell_centers() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(pointer_to_pixels(SIDEBAR_WIDTH + 1, 1, area, false, 8), (8.0, 16.0));
        assert_eq!(pointer_to_pixels(1, 1, area, true, 8), (8.0, 16.0));
        assert_eq!(pointer_to_pixels(SIDEBAR_WIDTH + 2, 2, area, false, 8), (24.0, 48.0));
    }

    #[test]
    fn test_pointer_outside_the_canvas_maps_far_away() {
        let area = Rect::new(0, 0, 100, 40);
        let (x, _) = pointer_to_pixels(0, 1, area, false, 8);
        assert!(x < 0.0);
    }

    #[test]
    fn test_in_canvas_bounds() {
        let area = Rect::new(0, 0, 100, 40);
        assert!(in_canvas(SIDEBAR_WIDTH + 1, 1, area, false));
        assert!(!in_canvas(0, 1, area, false));
        assert!(!in_canvas(99, 39, area, false));
        assert!(in_canvas(1, 1, area, true));
    }

    #[test]
    fn test_controls_visible_lines_shrink_with_the_terminal() {
        assert_eq!(get_controls_visible_lines(40), 40 - STATUS_HEIGHT - PARAMS_HEIGHT - 2);
        assert_eq!(get_controls_visible_lines(10), 0);
    }
}
