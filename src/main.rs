use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::path::Path;
use std::time::Duration;
use subsidence_map::app::App;
use subsidence_map::{data, ui};

fn main() -> Result<()> {
    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events for panning, zooming and inspection
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track mouse position for cursor marker
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        // Scroll wheel for zooming towards mouse position
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        // Right click to inspect the nearest coastal point
        MouseEventKind::Down(MouseButton::Right) => {
            app.inspect(mouse.column, mouse.row);
        }
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    let size = terminal.size()?;

    let (layer, coastal_points) = data::load_all(Path::new("data"));
    let mut app = App::new(size.width as usize, size.height as usize, layer, coastal_points);

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Popup captures navigation keys while open
                    if app.popup.is_some() {
                        match key.code {
                            KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
                            KeyCode::Left | KeyCode::Char('h') => {
                                if let Some(popup) = app.popup.as_mut() {
                                    popup.prev_page();
                                }
                            }
                            KeyCode::Right | KeyCode::Char('l') => {
                                if let Some(popup) = app.popup.as_mut() {
                                    popup.next_page();
                                }
                            }
                            _ => {}
                        }
                        continue;
                    }

                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                        // Pan with hjkl or arrow keys
                        KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                        KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                        KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                        KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                        // Zoom
                        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                        // Selectors driving the choropleth field
                        KeyCode::Char('d') | KeyCode::Char('D') => app.cycle_condition(),
                        KeyCode::Char('t') | KeyCode::Char('T') => app.cycle_threshold(),
                        KeyCode::Char('y') | KeyCode::Char('Y') => app.cycle_year(),

                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
