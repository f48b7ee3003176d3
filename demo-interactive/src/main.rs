//! Interactive Burning-Bush Viewer
//!
//! Runs the animation live in the terminal. Each frame is rasterized into the
//! software framebuffer, box-filtered down to the terminal grid and drawn with
//! half-block cells (two pixels per cell).
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --package demo-interactive
//! RUST_LOG=debug cargo run --package demo-interactive 2> bush.log
//! ```
//!
//! # Keys
//!
//! - `space` - Pause or resume
//! - `r` - Unmount and remount with a fresh seed
//! - `q` / `Esc` - Quit

use bush_sim_core::{
    Animation, BushSimulation, Canvas, ConfigError, FieldTuning, FrameClock, Framebuffer,
    ManualScheduler,
};
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Input poll timeout, roughly one display refresh
const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    // stderr shares the terminal with the UI, so logging is opt-in.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(io::stderr)
        .init();

    let mut viewer = Viewer::new().map_err(io::Error::other)?;
    let mut terminal = ratatui::init();
    let result = viewer.run(&mut terminal);
    ratatui::restore();

    let remounts = viewer.remounts;
    viewer.animation.unmount();
    info!("Viewer closed after {} remounts", remounts);
    result
}

struct Viewer {
    canvas: Canvas,
    animation: Animation<ManualScheduler>,
    framebuffer: Framebuffer,
    started: Instant,
    paused: bool,
    remounts: u32,
}

impl Viewer {
    fn new() -> Result<Self, ConfigError> {
        let canvas = Canvas::default();
        Ok(Self {
            canvas,
            animation: mount(canvas)?,
            framebuffer: Framebuffer::for_canvas(&canvas),
            started: Instant::now(),
            paused: false,
            remounts: 0,
        })
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        loop {
            if !self.paused {
                self.pump();
            }
            terminal.draw(|frame| self.draw(frame))?;

            if !event::poll(FRAME_BUDGET)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ') => self.paused = !self.paused,
                KeyCode::Char('r') => self.remount().map_err(io::Error::other)?,
                _ => {}
            }
        }
    }

    /// Fire the pending frame callback, if the animation has one.
    fn pump(&mut self) {
        if let Some(request) = self.animation.scheduler_mut().take_pending() {
            let clock = FrameClock::from_elapsed(self.started.elapsed());
            self.animation.on_frame(request, clock, &mut self.framebuffer);
        }
    }

    fn remount(&mut self) -> Result<(), ConfigError> {
        let fresh = mount(self.canvas)?;
        let old = std::mem::replace(&mut self.animation, fresh);
        old.unmount();
        self.remounts += 1;
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let [field, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(FieldView(&self.framebuffer), field);

        let sim = self.animation.simulation();
        let state = if self.paused { "paused" } else { "running" };
        let line = Line::from(vec![
            Span::from(format!(" {state} ")).black().on_yellow(),
            Span::from(format!(
                " seed {} | frame {} | respawns {} | {:.1}ms/frame | remounts {} ",
                sim.seed(),
                sim.frame_count(),
                sim.respawn_count(),
                self.animation.timer().mean_frame_time_ms(),
                self.remounts
            )),
            Span::from(" space pause  r reseed  q quit").dark_gray(),
        ]);
        frame.render_widget(line, status);
    }
}

fn mount(canvas: Canvas) -> Result<Animation<ManualScheduler>, ConfigError> {
    let simulation = BushSimulation::from_entropy(canvas, FieldTuning::default())?;
    Ok(Animation::mount(simulation, ManualScheduler::new()))
}

/// Framebuffer drawn into a cell area with `▀` half blocks
struct FieldView<'a>(&'a Framebuffer);

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fb = self.0;
        let cols = usize::from(area.width);
        let rows = usize::from(area.height);
        if cols == 0 || rows == 0 {
            return;
        }

        // Pixel grid is cols × 2·rows; fit the canvas aspect ratio inside it.
        let aspect = fb.height() as f32 / fb.width() as f32;
        let mut width = cols;
        let mut height = (width as f32 * aspect).round() as usize;
        if height > rows * 2 {
            height = rows * 2;
            width = ((height as f32 / aspect).round() as usize).clamp(1, cols);
        }
        let height = height.max(1);

        let left = area.x + ((cols - width) / 2) as u16;
        let top = area.y + ((rows * 2 - height) / 4) as u16;

        for row in 0..height.div_ceil(2) {
            for col in 0..width {
                let upper = block_average(fb, col, row * 2, width, height);
                let lower = if row * 2 + 1 < height {
                    block_average(fb, col, row * 2 + 1, width, height)
                } else {
                    Color::Black
                };
                if let Some(cell) = buf.cell_mut((left + col as u16, top + row as u16)) {
                    cell.set_char('▀').set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

/// Mean color of the framebuffer block behind target pixel `(col, row)`
fn block_average(fb: &Framebuffer, col: usize, row: usize, width: usize, height: usize) -> Color {
    let x0 = col * fb.width() / width;
    let x1 = ((col + 1) * fb.width() / width).max(x0 + 1).min(fb.width());
    let y0 = row * fb.height() / height;
    let y1 = ((row + 1) * fb.height() / height).max(y0 + 1).min(fb.height());

    let mut sum = [0u32; 3];
    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            let [r, g, b] = fb.rgb_over_black(x, y);
            sum[0] += u32::from(r);
            sum[1] += u32::from(g);
            sum[2] += u32::from(b);
            count += 1;
        }
    }
    if count == 0 {
        return Color::Black;
    }
    Color::Rgb(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
}
