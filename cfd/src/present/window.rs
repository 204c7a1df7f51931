//! Full-screen scrollable window presenter
//!
//! Owns the terminal for the lifetime of one presentation: enters the
//! alternate screen, draws a bordered read-only viewport titled with the
//! header, and blocks on crossterm events until the user closes it.

use std::io::{self, Stdout};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::{debug, info, warn};

use super::{Completion, Presenter};
use crate::config::ViewportConfig;
use crate::error::DumpError;

/// Terminal type alias
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Lines scrolled per mouse wheel notch
const WHEEL_STEP: u16 = 3;

/// What a key press asks the window to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Close,
}

/// Scroll state and rendering for the read-only text viewport
///
/// Kept separate from the terminal so it can be driven and rendered
/// headlessly.
#[derive(Debug)]
pub struct Viewer {
    title: String,
    body: String,
    viewport: ViewportConfig,
    line_count: u16,
    max_width: u16,
    scroll_y: u16,
    scroll_x: u16,
    /// Inner size of the last rendered viewport (width, height)
    inner: (u16, u16),
}

impl Viewer {
    pub fn new(header: &str, body: &str, viewport: ViewportConfig) -> Self {
        let line_count = u16::try_from(body.lines().count()).unwrap_or(u16::MAX);
        let max_width = body
            .lines()
            .map(|l| Line::raw(l).width())
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;

        Self {
            title: format!(" {} ", header),
            body: body.to_string(),
            viewport,
            line_count,
            max_width,
            scroll_y: 0,
            scroll_x: 0,
            inner: (viewport.columns, viewport.rows),
        }
    }

    /// Current (vertical, horizontal) scroll offset
    pub fn offset(&self) -> (u16, u16) {
        (self.scroll_y, self.scroll_x)
    }

    fn max_scroll_y(&self) -> u16 {
        self.line_count.saturating_sub(self.inner.1)
    }

    fn max_scroll_x(&self) -> u16 {
        self.max_width.saturating_sub(self.inner.0)
    }

    fn scroll_down(&mut self, n: u16) {
        self.scroll_y = self.scroll_y.saturating_add(n).min(self.max_scroll_y());
    }

    fn scroll_up(&mut self, n: u16) {
        self.scroll_y = self.scroll_y.saturating_sub(n);
    }

    fn scroll_right(&mut self, n: u16) {
        self.scroll_x = self.scroll_x.saturating_add(n).min(self.max_scroll_x());
    }

    fn scroll_left(&mut self, n: u16) {
        self.scroll_x = self.scroll_x.saturating_sub(n);
    }

    /// Apply a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let page = self.inner.1.max(1);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Close,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Action::Close,
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(page),
            KeyCode::PageUp => self.scroll_up(page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_y = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll_y = self.max_scroll_y(),
            KeyCode::Right | KeyCode::Char('l') => self.scroll_right(1),
            KeyCode::Left | KeyCode::Char('h') => self.scroll_left(1),
            _ => {}
        }
        Action::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_STEP),
            MouseEventKind::ScrollRight => self.scroll_right(WHEEL_STEP),
            MouseEventKind::ScrollLeft => self.scroll_left(WHEEL_STEP),
            _ => {}
        }
    }

    /// Draw the window centered in the frame, sized by the viewport hint
    pub fn render(&mut self, frame: &mut Frame) {
        let area = window_area(frame.area(), self.viewport);
        self.inner = (area.width.saturating_sub(2), area.height.saturating_sub(2));
        // Re-clamp after a resize shrank or grew the viewport
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
        self.scroll_x = self.scroll_x.min(self.max_scroll_x());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.as_str())
            .title_bottom(" q: close  ↑↓←→ PgUp PgDn: scroll ");
        let text = Paragraph::new(self.body.as_str())
            .block(block)
            .scroll((self.scroll_y, self.scroll_x));

        frame.render_widget(Clear, area);
        frame.render_widget(text, area);
    }
}

/// Center a (columns + border) × (rows + border) rectangle in `area`,
/// shrinking it to fit
fn window_area(area: Rect, hint: ViewportConfig) -> Rect {
    let width = hint.columns.saturating_add(2).min(area.width);
    let height = hint.rows.saturating_add(2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Shows the dump in a terminal window until the user closes it
pub struct WindowPresenter {
    viewport: ViewportConfig,
}

impl WindowPresenter {
    pub fn new(viewport: ViewportConfig) -> Self {
        Self { viewport }
    }

    fn run(&self, terminal: &mut Tui, viewer: &mut Viewer) -> Result<(), DumpError> {
        loop {
            terminal
                .draw(|f| viewer.render(f))
                .map_err(|e| DumpError::presentation("Failed to draw window", e))?;

            match event::read().map_err(|e| DumpError::presentation("Failed to read terminal event", e))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if viewer.handle_key(key) == Action::Close {
                        debug!(offset = ?viewer.offset(), "WindowPresenter::run: close requested");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => viewer.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}

/// Initialize the terminal for window mode
fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

impl Presenter for WindowPresenter {
    fn present(&mut self, header: &str, body: &str) -> Result<Completion, DumpError> {
        info!("Opening window: {}", header);
        let mut viewer = Viewer::new(header, body, self.viewport);

        // Restore the terminal even on early return or error
        struct TerminalGuard;
        impl Drop for TerminalGuard {
            fn drop(&mut self) {
                if let Err(e) = restore() {
                    warn!("Failed to restore terminal: {}", e);
                }
            }
        }

        let mut terminal = match init() {
            Ok(t) => t,
            Err(e) => {
                let _ = restore();
                return Err(DumpError::DisplayUnavailable { source: e });
            }
        };
        let _guard = TerminalGuard;

        self.run(&mut terminal, &mut viewer)?;
        Ok(Completion::Closed)
    }
}
