mod input;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::clock::Clock;
use crate::convert::{DisplayMode, PRECISION_PRESETS};
use crate::event_loop::{EventLoop, LoopControl};
use crate::report::{align_row, column_widths, formatted_rows, header, line_width};
use crate::session::Session;
use crate::tui::input::map_key_event;
use crate::Result;

fn table_style(mode: DisplayMode) -> Style {
    let style = Style::default().fg(Color::Green);
    match mode {
        DisplayMode::Hertz => style.add_modifier(Modifier::ITALIC),
        DisplayMode::Milliseconds => style,
    }
}

fn status_lines(session: &Session) -> Vec<Line<'static>> {
    let presets = PRECISION_PRESETS
        .iter()
        .map(|p| {
            if *p == session.precision() {
                format!("[{}]", p)
            } else {
                format!(" {} ", p)
            }
        })
        .collect::<String>();

    let bpm_style = if crate::convert::parse_bpm(session.bpm_input()).is_ok() {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };

    vec![
        Line::from(vec![
            Span::raw("BPM: "),
            Span::styled(format!("{}_", session.bpm_input()), bpm_style),
        ]),
        Line::from(format!("Unit: {}", session.mode())),
        Line::from(format!("Decimals: {}", presets)),
        Line::from(format!("Taps: {}", session.tap_count())),
    ]
}

fn table_lines(session: &Session) -> Vec<Line<'static>> {
    let table = session.table();
    let header = header(table);
    let rows = formatted_rows(table);
    let widths = column_widths(&header, &rows);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(Line::from(Span::styled(
        align_row(&header, &widths),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from("-".repeat(line_width(&widths))));
    lines.extend(rows.iter().map(|row| Line::from(align_row(row, &widths))));
    lines
}

pub fn render_ui(f: &mut Frame, session: &Session) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),  // Title area
                Constraint::Length(6),  // BPM and settings
                Constraint::Length(13), // Results table
                Constraint::Min(1),     // Instructions area
            ]
            .as_ref(),
        )
        .split(size);

    let title_block = Block::default()
        .title("Delay Time Calculator")
        .borders(Borders::ALL);
    f.render_widget(title_block, chunks[0]);

    let status = Paragraph::new(status_lines(session))
        .block(Block::default().title("Tempo").borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let table = Paragraph::new(table_lines(session))
        .style(table_style(session.mode()))
        .block(Block::default().title("Delay Times").borders(Borders::ALL));
    f.render_widget(table, chunks[2]);

    let instructions = Paragraph::new(Span::styled(
        "0-9 . Bksp: BPM | Space: Tap | U: ms/Hz | [ ] F1-F5: Decimals | R: Round | Q: Quit",
        Style::default().fg(Color::Yellow),
    ));
    let instructions_block = Block::default().title("Controls").borders(Borders::ALL);
    f.render_widget(instructions.block(instructions_block), chunks[3]);
}

fn run_event_loop<C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    event_loop: &mut EventLoop<C>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, event_loop.session()))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                log::debug!("Key event received: {:?}", key_event);
                if let Some(message) = map_key_event(key_event) {
                    if event_loop.handle(message) == LoopControl::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Runs the interactive calculator until the user quits and hands back the
/// final session.
pub fn run_tui<C: Clock>(session: Session, clock: C) -> Result<Session> {
    log::info!("Starting TUI event loop");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_loop = EventLoop::new(session, clock);
    let result = run_event_loop(&mut terminal, &mut event_loop);

    // Restore the terminal even if the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("Terminal cleaned up, exiting TUI event loop");

    result.map(|()| event_loop.into_session())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::event_loop::EngineMessage;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    // Title (3) + tempo panel (6) + table border, header and rule (3), then
    // the bar and half-note rows.
    const QUARTER_NOTE_ROW: u16 = 14;

    fn render(session: &Session) -> Buffer {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, session)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render_to_string(session: &Session) -> String {
        format!("{:?}", render(session))
    }

    /// Words of the rendered line that starts with `label`.
    fn row_words(screen: &str, label: &str) -> Vec<String> {
        let start = screen.find(label).expect("row not rendered");
        let line = &screen[start..];
        let end = line.find('"').unwrap_or(line.len());
        line[..end]
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn quarter_row_is_italic(buffer: &Buffer) -> bool {
        // "1/4 note" occupies columns 1..9 inside the border.
        (1..9).all(|x| {
            buffer
                .get(x, QUARTER_NOTE_ROW)
                .modifier
                .contains(Modifier::ITALIC)
        })
    }

    #[test]
    fn test_renders_default_table() {
        let screen = render_to_string(&Session::default());
        assert!(screen.contains("Delay Time Calculator"));
        assert!(screen.contains("BPM: 120_"));
        assert!(screen.contains("Notes (ms)"));
        assert_eq!(
            row_words(&screen, "1/4 note")[..5],
            ["1/4", "note", "750.00", "500.00", "333.33"]
        );
        assert!(screen.contains("1/256 note"));
        assert!(screen.contains("F1-F5: Decimals"));
    }

    #[test]
    fn test_renders_after_messages() {
        let clock = ManualClock::new(0.0);
        let mut event_loop = EventLoop::new(Session::default(), clock);
        event_loop.handle(EngineMessage::ToggleUnit);
        event_loop.handle(EngineMessage::PrecisionDown);

        let screen = render_to_string(event_loop.session());
        assert!(screen.contains("Notes (Hz)"));
        assert!(screen.contains("Unit: Hz"));
        assert!(screen.contains("[1]"));
        // quarter note at 120 BPM: dotted 1.3 Hz, straight 2 Hz, triplet 3 Hz
        assert_eq!(
            row_words(&screen, "1/4 note")[..5],
            ["1/4", "note", "1.3", "2.0", "3.0"]
        );
    }

    #[test]
    fn test_table_is_italic_only_in_hertz() {
        let mut event_loop = EventLoop::new(Session::default(), ManualClock::default());
        let buffer = render(event_loop.session());
        assert!(!quarter_row_is_italic(&buffer));

        event_loop.handle(EngineMessage::ToggleUnit);
        let buffer = render(event_loop.session());
        assert!(quarter_row_is_italic(&buffer));
        // The tempo panel above the table keeps its plain style.
        assert!(!buffer.get(1, 4).modifier.contains(Modifier::ITALIC));

        event_loop.handle(EngineMessage::ToggleUnit);
        let buffer = render(event_loop.session());
        assert!(!quarter_row_is_italic(&buffer));
    }

    #[test]
    fn test_function_key_preset_is_highlighted() {
        let mut event_loop = EventLoop::new(Session::default(), ManualClock::default());
        let message = map_key_event(crossterm::event::KeyEvent::from(
            crossterm::event::KeyCode::F(5),
        ))
        .unwrap();
        event_loop.handle(message);

        let screen = render_to_string(event_loop.session());
        assert!(screen.contains("[4]"));
        assert_eq!(
            row_words(&screen, "1/4 note")[..5],
            ["1/4", "note", "750.0000", "500.0000", "333.3333"]
        );
    }
}
