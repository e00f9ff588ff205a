//! Ratatui-based terminal UI.
//!
//! Shows the fragility family of one component type around a query intensity,
//! with the resulting damage-state probabilities next to the chart.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::error::AppError;
use crate::fragility::{
    CurveFamilySamples, DEFAULT_SAMPLE_COUNT, FragilityModel, SampleRange, StateProbabilities,
};

mod plotters_chart;

use plotters_chart::{FragilityChart, state_rgb};

/// Multiplicative step for ←/→.
const INTENSITY_STEP: f64 = 1.1;

const Y_LABEL: &str = "P(DS>=ds)";

/// Start the TUI.
pub fn run(model: FragilityModel, component: Option<String>, intensity: f64) -> Result<(), AppError> {
    let mut app = App::new(model, component, intensity)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

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

/// Outcome of evaluating the current selection.
struct View {
    imt: String,
    result: StateProbabilities,
    samples: CurveFamilySamples,
}

struct App {
    model: FragilityModel,
    prefixes: Vec<String>,
    selected: usize,
    component: String,
    intensity: f64,
    status: String,
    view: Option<View>,
}

impl App {
    fn new(model: FragilityModel, component: Option<String>, intensity: f64) -> Result<Self, AppError> {
        let prefixes: Vec<String> = model.families().map(|(p, _)| p.to_string()).collect();
        if prefixes.is_empty() {
            return Err(AppError::new(2, format!("Model '{}' has no curve families.", model.name())));
        }

        let component = component.unwrap_or_else(|| prefixes[0].clone());
        let key = model.component_key(&component);
        let selected = prefixes.iter().position(|p| *p == key).unwrap_or(0);

        let mut app = Self {
            model,
            prefixes,
            selected,
            component,
            intensity,
            status: String::new(),
            view: None,
        };
        app.refresh();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
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
                    if self.handle_key(key.code) {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected = (self.selected + self.prefixes.len() - 1) % self.prefixes.len();
                self.component = self.prefixes[self.selected].clone();
                self.refresh();
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % self.prefixes.len();
                self.component = self.prefixes[self.selected].clone();
                self.refresh();
            }
            KeyCode::Left => {
                self.intensity /= INTENSITY_STEP;
                self.refresh();
            }
            KeyCode::Right => {
                self.intensity *= INTENSITY_STEP;
                self.refresh();
            }
            _ => {}
        }
        false
    }

    /// Re-evaluate the current component; failures are shown, not raised.
    fn refresh(&mut self) {
        let prefix = &self.prefixes[self.selected];
        let Some(imt) = self
            .model
            .family(prefix)
            .and_then(|f| f.measures().first().map(|s| s.to_string()))
        else {
            self.view = None;
            self.status = format!("No curves for '{prefix}'.");
            return;
        };

        let model = &self.model;
        let (component, intensity) = (self.component.as_str(), self.intensity);
        let evaluated = model.evaluate(component, &imt, intensity).and_then(|result| {
            let range = SampleRange::around(intensity);
            let points = model.describe_curve_family(component, &imt, DEFAULT_SAMPLE_COUNT, range)?;
            let samples = CurveFamilySamples::collect(&imt, range, &result, points);
            Ok((result, samples))
        });

        match evaluated {
            Ok((result, samples)) => {
                self.status = format!("{} = {:.4}", imt, self.intensity);
                self.view = Some(View { imt, result, samples });
            }
            Err(e) => {
                self.view = None;
                self.status = e.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
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
            Span::styled("frag", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - fragility model '{}'", self.model.name())),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "component: {} | type: {} ({}/{}) | intensity: {:.4}",
                self.component,
                self.prefixes[self.selected],
                self.selected + 1,
                self.prefixes.len(),
                self.intensity,
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_states(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Fragility curves").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = &self.view else {
            let msg = Paragraph::new("No curves to show.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let widget = FragilityChart {
            samples: &view.samples,
            x_bounds: [0.0, view.samples.range.end],
            x_label: &view.imt,
            y_label: Y_LABEL,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_states(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        if let Some(view) = &self.view {
            let r = &view.result;
            items.push(ListItem::new(format!("{:<24} {:>8} {:>8}", "damage interval", "P(>=)", "P")));
            for (idx, (&e, &p)) in r.exceedances().iter().zip(r.probabilities()).enumerate() {
                let (red, green, blue) = state_rgb(idx);
                items.push(
                    ListItem::new(format!(
                        "{:<24} {:>8.4} {:>8.4}",
                        r.bucket_label(idx).unwrap_or_default(),
                        e,
                        p
                    ))
                    .style(Style::default().fg(Color::Rgb(red, green, blue))),
                );
            }
            if let Some(label) = r.residual_label() {
                items.push(ListItem::new(format!("{:<24} {:>8} {:>8.4}", label, "", r.residual())));
            }
            if let Some(best) = r.most_likely_index().and_then(|i| r.bucket_label(i)) {
                items.push(
                    ListItem::new(format!("most likely: {best}"))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                );
            }
        }

        let list = List::new(items).block(Block::default().title("Damage states").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ component type  ←/→ intensity  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.1}")
}
