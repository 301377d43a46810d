//! Terminal viewer for waveform bars with mouse seeking.
//!
//! The bar frame is rasterized into a [`Raster`] at two vertical pixels per
//! terminal cell and drawn with upper-half-block characters. Mouse presses and
//! drags over the bars are translated into [`PointerEvent`]s for the controller.

use crate::controller::{PointerEvent, WaveformBars};
use crate::raster::Raster;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    buffer::Buffer,
    prelude::*,
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};
use std::io::{stdout, Stdout};
use std::time::Duration;

/// Fraction of the track a single arrow key press seeks by.
const SEEK_STEP: f64 = 0.05;

/// User input during viewing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Nothing to act on
    Continue,
    /// Leave the viewer (Escape, 'q' or Ctrl+C)
    Quit,
    /// Start or stop the playhead (Space)
    TogglePlayback,
    /// Move progress by a signed fraction (Left/Right arrows)
    Seek(f64),
    /// Mouse seek gesture over the bars
    Pointer(PointerEvent),
}

/// Text shown in the footer line.
pub struct StatusLine {
    pub playing: bool,
    pub elapsed: Duration,
    pub total: Duration,
    pub mode: String,
}

/// Draws a [`Raster`] with one terminal cell per two stacked pixels.
pub struct RasterView<'a> {
    raster: &'a Raster,
}

impl<'a> RasterView<'a> {
    pub fn new(raster: &'a Raster) -> Self {
        Self { raster }
    }
}

fn cell_color(pixel: Option<crate::waveform::HexColor>) -> Color {
    match pixel {
        Some(c) => Color::Rgb(c.r, c.g, c.b),
        None => Color::Reset,
    }
}

impl Widget for RasterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.raster.pixel(col as usize, row as usize * 2);
                let bottom = self.raster.pixel(col as usize, row as usize * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(cell_color(top))
                        .set_bg(cell_color(bottom));
                }
            }
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Maps a crossterm mouse event to a seek gesture, if it is one.
///
/// Presses only count inside `area`; drags and releases are reported anywhere
/// so a gesture can leave the bars and still be tracked.
pub fn pointer_event(kind: MouseEventKind, column: u16, row: u16, area: Rect) -> Option<PointerEvent> {
    // Pointer sits at the centre of the cell it reports
    let x = column as f64 + 0.5;
    match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let inside = column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height;
            inside.then_some(PointerEvent::Press { x })
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { x }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Release),
        _ => None,
    }
}

/// Full-screen terminal viewer.
pub struct WaveformViewer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    raster: Raster,
    bars_area: Rect,
}

impl WaveformViewer {
    /// Enters alternate screen mode with mouse capture enabled.
    ///
    /// # Errors
    /// - If terminal cannot be initialized
    /// - If raw mode cannot be enabled
    /// - If alternate screen or mouse capture cannot be entered
    pub fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(WaveformViewer {
            terminal,
            raster: Raster::new(0, 0),
            bars_area: Rect::default(),
        })
    }

    /// The screen region the bars were last drawn into.
    pub fn bars_area(&self) -> Rect {
        self.bars_area
    }

    /// Draws the current controller state and the footer.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render(&mut self, bars: &WaveformBars, status: &StatusLine) -> anyhow::Result<()> {
        let raster = &mut self.raster;
        let bars_area = &mut self.bars_area;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let footer_height = 1;

            let content_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(footer_height),
            };
            *bars_area = content_area;

            raster.resize(content_area.width as usize, content_area.height as usize * 2);
            bars.draw(&mut *raster);
            frame.render_widget(RasterView::new(&*raster), content_area);

            let footer_area = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(footer_height),
                width: area.width,
                height: footer_height,
            };

            let indicator = if status.playing {
                ratatui::text::Span::styled("▶ ", Style::default().fg(Color::Green))
            } else {
                ratatui::text::Span::styled("⏸ ", Style::default().fg(Color::Yellow))
            };

            let hint = if bars.is_dragging() {
                "release to seek"
            } else {
                "drag to seek · space play/pause · ←/→ skip · q quit"
            };

            let footer_text = ratatui::text::Line::from(vec![
                indicator,
                ratatui::text::Span::raw(format!(
                    "{} / {}",
                    format_duration(status.elapsed),
                    format_duration(status.total)
                )),
                ratatui::text::Span::raw(format!(" / {} / ", status.mode)),
                ratatui::text::Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ]);

            let footer = Paragraph::new(footer_text).style(
                Style::default()
                    .fg(Color::Rgb(185, 207, 212))
                    .bg(Color::Rgb(0, 0, 0)),
            );
            frame.render_widget(footer, footer_area);
        })?;

        Ok(())
    }

    /// Waits up to `timeout` for input and maps it to a viewer command.
    ///
    /// # Errors
    /// - If event polling fails
    pub fn handle_input(&mut self, timeout: Duration) -> anyhow::Result<ViewerCommand> {
        if !event::poll(timeout)? {
            return Ok(ViewerCommand::Continue);
        }

        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    tracing::debug!("Escape or 'q' pressed: leaving viewer");
                    ViewerCommand::Quit
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    tracing::debug!("Ctrl+C pressed: leaving viewer");
                    ViewerCommand::Quit
                }
                KeyCode::Char(' ') => ViewerCommand::TogglePlayback,
                KeyCode::Left => ViewerCommand::Seek(-SEEK_STEP),
                KeyCode::Right => ViewerCommand::Seek(SEEK_STEP),
                _ => ViewerCommand::Continue,
            },
            Event::Mouse(mouse) => {
                pointer_event(mouse.kind, mouse.column, mouse.row, self.bars_area)
                    .map_or(ViewerCommand::Continue, ViewerCommand::Pointer)
            }
            _ => ViewerCommand::Continue,
        })
    }

    /// Restores the terminal.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If cursor cannot be shown
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for WaveformViewer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
