//! Ratatui-based terminal UI.
//!
//! The TUI provides a field panel for adjusting the seven profile attributes,
//! then renders the probability gauge, the radar polygon of the normalized
//! profile, and the advisory list. Every adjustment re-runs the evaluation
//! pipeline (a single forward pass, so this is cheap).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, EvalOutput};
use crate::artifacts::ArtifactSet;
use crate::cli::ProfileArgs;
use crate::domain::{Category, StudentProfile};
use crate::error::AppError;
use crate::features::vector::{FEATURE_COUNT, FEATURE_LABELS};

mod chart;

use chart::RadarChart;

/// Start the TUI from the parsed CLI flags.
pub fn run(args: ProfileArgs) -> Result<(), AppError> {
    let profile = crate::app::profile_from_args(&args)?;
    let dir = crate::artifacts::resolve_dir(args.artifacts.artifacts.as_deref());
    let artifacts = crate::artifacts::load_shared(&dir)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(profile, artifacts)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    profile: StudentProfile,
    artifacts: &'static ArtifactSet,
    selected_field: usize,
    sample_seed: u64,
    status: String,
    run: Option<EvalOutput>,
}

impl App {
    fn new(profile: StudentProfile, artifacts: &'static ArtifactSet) -> Result<Self, AppError> {
        let mut app = Self {
            profile,
            artifacts,
            selected_field: 0,
            sample_seed: 0,
            status: "Ready.".to_string(),
            run: None,
        };
        app.reevaluate()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FEATURE_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::Char('r') => {
                self.sample_seed = self.sample_seed.wrapping_add(1);
                if let Some(profile) = crate::data::generate_profiles(1, self.sample_seed)?.pop() {
                    self.profile = profile;
                }
                self.reevaluate()?;
                self.status = format!("Random profile (seed {}).", self.sample_seed);
            }
            KeyCode::Char('x') => {
                if let Some(run) = &self.run {
                    let path = std::path::Path::new("estimate.json");
                    match crate::io::export::write_estimate_json(path, run) {
                        Ok(()) => self.status = format!("Wrote {}", path.display()),
                        Err(err) => self.status = format!("Export failed: {err}"),
                    }
                } else {
                    self.status = "Nothing to export yet.".to_string();
                }
            }
            _ => {}
        }

        Ok(false)
    }

    /// Adjust the selected field by one step (per-field step sizes).
    fn adjust_field(&mut self, delta: i32) -> Result<(), AppError> {
        let up = delta >= 0;
        match self.selected_field {
            0 => {
                self.profile.gre = step_u32(self.profile.gre, up, 1, 260, 340);
                self.status = format!("GRE: {}", self.profile.gre);
            }
            1 => {
                self.profile.toefl = step_u32(self.profile.toefl, up, 1, 0, 120);
                self.status = format!("TOEFL: {}", self.profile.toefl);
            }
            2 => {
                let r = self.profile.university_rating;
                self.profile.university_rating =
                    if up { (r + 1).min(5) } else { r.saturating_sub(1).max(1) };
                self.status = format!("University rating: {}", self.profile.university_rating);
            }
            3 => {
                self.profile.sop = step_f64(self.profile.sop, up, 0.5, 1.0, 5.0);
                self.status = format!("SOP: {:.1}", self.profile.sop);
            }
            4 => {
                self.profile.lor = step_f64(self.profile.lor, up, 0.5, 1.0, 5.0);
                self.status = format!("LOR: {:.1}", self.profile.lor);
            }
            5 => {
                self.profile.cgpa = step_f64(self.profile.cgpa, up, 0.05, 6.8, 10.0);
                self.status = format!("CGPA: {:.2}", self.profile.cgpa);
            }
            6 => {
                self.profile.research = !self.profile.research;
                self.status = format!(
                    "Research: {}",
                    if self.profile.research { "yes" } else { "no" }
                );
            }
            _ => {}
        }
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> Result<(), AppError> {
        let run = pipeline::evaluate(&self.profile, self.artifacts)?;
        self.run = Some(run);
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("admit", Style::default().fg(Color::Cyan)),
            Span::raw(" — admission probability estimator"),
        ]));

        if let Some(run) = &self.run {
            let estimate = &run.estimate;
            lines.push(Line::from(vec![
                Span::raw("estimate: "),
                Span::styled(
                    format!(
                        "{:.1}% ({})",
                        estimate.probability_percent,
                        estimate.category.display_name()
                    ),
                    Style::default().fg(category_color(estimate.category)),
                ),
                Span::styled(
                    format!(" | raw output: {:.4}", run.raw_output),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.draw_fields(frame, columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(9),
            ])
            .split(columns[1]);

        self.draw_gauge(frame, right[0]);
        self.draw_radar(frame, right[1]);
        self.draw_advisories(frame, right[2]);
    }

    fn draw_fields(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let values = [
            format!("{}", self.profile.gre),
            format!("{}", self.profile.toefl),
            format!("{}", self.profile.university_rating),
            format!("{:.1}", self.profile.sop),
            format!("{:.1}", self.profile.lor),
            format!("{:.2}", self.profile.cgpa),
            if self.profile.research { "yes" } else { "no" }.to_string(),
        ];

        let items: Vec<ListItem> = FEATURE_LABELS
            .iter()
            .zip(values)
            .map(|(label, value)| ListItem::new(format!("{label:<11} {value}")))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Profile").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_gauge(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(run) = &self.run else {
            return;
        };
        let estimate = &run.estimate;
        // Display-only clamp: the gauge widget requires a ratio in [0, 1];
        // the label keeps the raw percentage.
        let ratio = (estimate.probability_percent / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(Block::default().title("Probability").borders(Borders::ALL))
            .gauge_style(Style::default().fg(category_color(estimate.category)))
            .ratio(ratio)
            .label(format!("{:.1}%", estimate.probability_percent));
        frame.render_widget(gauge, area);
    }

    fn draw_radar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Profile Radar").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for evaluation...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let widget = RadarChart { axes: &run.radar };
        frame.render_widget(widget, inner);
    }

    fn draw_advisories(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = match &self.run {
            Some(run) if !run.estimate.advisories.is_empty() => run
                .estimate
                .advisories
                .iter()
                .enumerate()
                .map(|(i, advisory)| ListItem::new(format!("{}. {}", i + 1, advisory.message())))
                .collect(),
            Some(_) => vec![ListItem::new("No advisories: every profile target is met.")],
            None => Vec::new(),
        };

        let list = List::new(items)
            .block(Block::default().title("Advisories").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r random  x export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn step_u32(value: u32, up: bool, step: u32, min: u32, max: u32) -> u32 {
    if up {
        (value + step).min(max)
    } else {
        value.saturating_sub(step).max(min)
    }
}

fn step_f64(value: f64, up: bool, step: f64, min: f64, max: f64) -> f64 {
    let next = if up { value + step } else { value - step };
    // Snap to the step grid so repeated adjustments don't accumulate float
    // drift (e.g. CGPA staying on 0.05 boundaries).
    ((next / step).round() * step).clamp(min, max)
}

/// Terminal color for a category band, derived from its hex color token so
/// the TUI and exports agree on the palette.
fn category_color(category: Category) -> Color {
    parse_hex_color(category.color_token()).unwrap_or(Color::White)
}

fn parse_hex_color(token: &str) -> Option<Color> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_respects_bounds_and_grid() {
        assert_eq!(step_u32(340, true, 1, 260, 340), 340);
        assert_eq!(step_u32(260, false, 1, 260, 340), 260);

        let mut v = 8.5;
        for _ in 0..100 {
            v = step_f64(v, true, 0.05, 6.8, 10.0);
        }
        assert!((v - 10.0).abs() < 1e-9);

        let v = step_f64(4.0, false, 0.5, 1.0, 5.0);
        assert!((v - 3.5).abs() < 1e-9);
    }

    #[test]
    fn category_colors_parse_from_hex_tokens() {
        assert_eq!(
            category_color(Category::VeryHigh),
            Color::Rgb(0x28, 0xa7, 0x45)
        );
        assert_eq!(category_color(Category::Low), Color::Rgb(0xdc, 0x35, 0x45));
    }
}
