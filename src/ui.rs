use crate::app::{App, Popup};
use crate::braille::{BrailleCanvas, CLASS_NONE, CLASS_NO_DATA};
use crate::classify::{LegendRow, NO_DATA_COLOR, RAMP};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

/// Character width of the legend sidebar.
pub const LEGEND_WIDTH: u16 = 30;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map row and status bar, then map and legend columns
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map + legend
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)])
        .split(rows[0]);

    render_map(frame, app, columns[0]);
    render_legend(frame, app, columns[1]);
    render_status_bar(frame, app, rows[1]);

    if let Some(popup) = &app.popup {
        render_popup(frame, popup, area);
    }
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Subsidence Hazard ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Update viewport size for rendering
    let mut viewport = app.viewport.clone();
    // Braille gives 2x4 resolution per character
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let mut canvas = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    let field = app.selection.field_name();
    app.layer.render(&mut canvas, &viewport, &field, &app.breaks);

    // Click marker position in character cells
    let click_pos = app.click_marker.and_then(|(lon, lat)| {
        let (px, py) = viewport.project(lon, lat);
        cell_pos(px, py, inner)
    });

    // Mouse cursor position for the crosshair
    let cursor_pos = app
        .mouse_pixel_pos()
        .and_then(|(px, py)| cell_pos(px, py, inner));

    let map_widget = MapWidget {
        canvas,
        click_pos,
        cursor_pos,
    };
    frame.render_widget(map_widget, inner);
}

/// Braille pixel coordinates -> in-bounds character cell, if visible.
fn cell_pos(px: i32, py: i32, inner: Rect) -> Option<(u16, u16)> {
    if px < 0 || py < 0 {
        return None;
    }
    let cx = (px / 2) as u16;
    let cy = (py / 4) as u16;
    if cx < inner.width && cy < inner.height {
        Some((cx, cy))
    } else {
        None
    }
}

/// Ramp color for a canvas class index.
fn class_color(class: u8) -> Color {
    if class == CLASS_NO_DATA {
        let (r, g, b) = NO_DATA_COLOR;
        return Color::Rgb(r, g, b);
    }
    let (r, g, b) = RAMP[(class as usize) % RAMP.len()];
    Color::Rgb(r, g, b)
}

/// Widget drawing the classed braille canvas plus markers.
struct MapWidget {
    canvas: BrailleCanvas,
    click_pos: Option<(u16, u16)>,
    cursor_pos: Option<(u16, u16)>,
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row_idx in 0..self.canvas.height() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, (ch, class)) in self.canvas.row_cells(row_idx).enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' || class == CLASS_NONE {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(class_color(class));
            }
        }

        // Click marker over the map content
        if let Some((cx, cy)) = self.click_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('◉').set_fg(Color::White);
            }
        }

        // Mouse crosshair
        if let Some((cx, cy)) = self.cursor_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Legend ", Style::default().fg(Color::Cyan)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    // Color bar, high class on top with the rounded max beside it,
    // zero at the bottom.
    for (i, row) in app.legend.iter().enumerate().rev() {
        let LegendRow { color: (r, g, b), label } = row;
        let edge = if i == app.legend.len() - 1 {
            format!(" {:.0}%", app.breaks.rounded_max)
        } else {
            String::new()
        };
        lines.push(Line::from(vec![
            Span::styled("██", Style::default().fg(Color::Rgb(*r, *g, *b))),
            Span::styled(format!(" {}", label), Style::default().fg(Color::Gray)),
            Span::styled(edge, Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "   0%",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        app.legend_label.clone(),
        Style::default().fg(Color::White),
    )));
    lines.push(Line::default());

    lines.push(selector_line("[d] scenario", app.selection.condition_label()));
    lines.push(selector_line(
        "[t] threshold",
        &format!("{} cm", app.selection.threshold_cm()),
    ));
    lines.push(selector_line(
        "[y] horizon",
        &format!("{} yr", app.selection.year()),
    ));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn selector_line(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", key), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
    ])
}

fn render_popup(frame: &mut Frame, popup: &Popup, area: Rect) {
    let width = (area.width * 3 / 5).clamp(30, 76).min(area.width);
    let height = 9.min(area.height);
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Coastal Point ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let image = popup.current();
    let pager = format!(
        "◀ Prev   {}/{}   Next ▶",
        popup.page + 1,
        popup.images.len()
    );
    let point_info = format!(
        "Sample point #{} · {:.1} km from click",
        popup.point.index, popup.distance_km
    );

    let lines = vec![
        Line::from(Span::styled(
            popup.title.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(point_info, Style::default().fg(Color::DarkGray))),
        Line::default(),
        Line::from(Span::styled(
            image.title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            image.path.clone(),
            Style::default().fg(Color::Cyan),
        )),
        Line::default(),
        Line::from(Span::styled(pager, Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = Line::from(vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | field: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.selection.field_name(), Style::default().fg(Color::Magenta)),
        Span::styled(
            " | hjkl:pan +/-:zoom d/t/y:selectors right-click:inspect q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(status);
    frame.render_widget(paragraph, area);
}
