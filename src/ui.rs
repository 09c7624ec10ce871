pub mod plan_list;

use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Terminal,
};

use kegel::{
    plan::ExercisePlan,
    render::{ControlLabel, Renderer, Snapshot},
    session::Phase,
};

use crate::ui::plan_list::PlanList;

const HORIZONTAL_MARGIN: u16 = 2;
const DIAL_WIDTH: u16 = 30;
const DIAL_HEIGHT: u16 = 7;

pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::Gray,
        Phase::Contracting => Color::Green,
        Phase::RepResting => Color::Blue,
        Phase::SetResting { .. } => Color::Magenta,
        Phase::Finished => Color::Cyan,
    }
}

/// Full-screen view of one snapshot.
pub struct SessionView<'a> {
    pub snapshot: &'a Snapshot,
    pub plan: &'a ExercisePlan,
    pub set_rest_secs: u32,
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.snapshot;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let color = phase_color(snap.phase);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(1)
            .constraints([
                Constraint::Length(1),           // title
                Constraint::Length(1),           // padding
                Constraint::Length(DIAL_HEIGHT), // dial
                Constraint::Length(1),           // set / rep
                Constraint::Length(1),           // padding
                Constraint::Min(3),              // plan
                Constraint::Length(1),           // sound
                Constraint::Length(1),           // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Kegel Timer", bold_style.fg(Color::LightMagenta)))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let dial_area = centered(chunks[2], DIAL_WIDTH);
        let dial = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let inner = dial.inner(dial_area);
        dial.render(dial_area, buf);

        let dial_text = vec![
            Line::from(""),
            Line::from(Span::styled(snap.countdown_text(), bold_style.fg(color))),
            Line::from(""),
            Line::from(Span::styled(snap.action_text(), bold_style)),
        ];
        Paragraph::new(dial_text)
            .alignment(Alignment::Center)
            .render(inner, buf);

        Paragraph::new(Span::styled(snap.progress_text(), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        PlanList {
            plan: self.plan,
            highlighted: snap.highlighted_set(),
            total_secs: self.plan.total_secs(self.set_rest_secs),
        }
        .render(chunks[5], buf);

        let sound = Paragraph::new(Line::from(vec![
            Span::raw("Sound: "),
            if snap.sound_on {
                Span::styled("On", bold_style.fg(Color::Green))
            } else {
                Span::styled("Off", bold_style.add_modifier(Modifier::DIM))
            },
        ]))
        .alignment(Alignment::Center);
        sound.render(chunks[6], buf);

        Paragraph::new(legend(snap))
            .style(italic_style)
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}

fn legend(snap: &Snapshot) -> Line<'static> {
    let start = match snap.control {
        ControlLabel::Start => "(space) start",
        ControlLabel::Pause => "(space) pause",
        ControlLabel::Restart => "(space) restart",
    };
    let skip_style = if snap.can_skip {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    };
    Line::from(vec![
        Span::raw(start),
        Span::raw(" / (r)eset / "),
        Span::styled("(s)kip set", skip_style),
        Span::raw(" / (m)ute / (q)uit"),
    ])
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Draws snapshots to a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    plan: ExercisePlan,
    set_rest_secs: u32,
    last: Option<Snapshot>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, plan: ExercisePlan, set_rest_secs: u32) -> Self {
        Self {
            terminal,
            plan,
            set_rest_secs,
            last: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Draws the last snapshot again, e.g. after a resize.
    pub fn redraw(&mut self) {
        if let Some(snapshot) = self.last.take() {
            self.render(&snapshot);
        }
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, snapshot: &Snapshot) {
        let view = SessionView {
            snapshot,
            plan: &self.plan,
            set_rest_secs: self.set_rest_secs,
        };
        if let Err(e) = self.terminal.draw(|f| f.render_widget(view, f.area())) {
            tracing::warn!(error = %e, "failed to draw frame");
        }
        self.last = Some(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kegel::session::SessionState;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn renderer() -> TerminalRenderer<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        TerminalRenderer::new(terminal, ExercisePlan::default(), 30)
    }

    #[test]
    fn test_idle_view() {
        let mut r = renderer();
        let snap = Snapshot::new(&SessionState::IDLE, &ExercisePlan::default(), true);
        r.render(&snap);

        let content = buffer_text(r.terminal());
        assert!(content.contains("Kegel Timer"));
        assert!(content.contains("Ready to begin?"));
        assert!(content.contains("Set 1/4 | Rep 1/12"));
        assert!(content.contains("Sound: On"));
        assert!(content.contains("(space) start"));
        assert!(content.contains("5m 46s"));
    }

    #[test]
    fn test_contracting_view() {
        let mut r = renderer();
        let state = SessionState {
            phase: Phase::Contracting,
            set_index: 3,
            rep_index: 2,
            remaining_secs: 3,
            running: true,
        };
        let snap = Snapshot::new(&state, &ExercisePlan::default(), false);
        r.render(&snap);

        let content = buffer_text(r.terminal());
        assert!(content.contains("Contract! (High Intensity)"));
        assert!(content.contains("03"));
        assert!(content.contains("Set 4/4 | Rep 3/10"));
        assert!(content.contains("Sound: Off"));
        assert!(content.contains("(space) pause"));
    }

    #[test]
    fn test_finished_view() {
        let mut r = renderer();
        let state = SessionState {
            phase: Phase::Finished,
            set_index: 3,
            ..SessionState::IDLE
        };
        r.render(&Snapshot::new(&state, &ExercisePlan::default(), true));
        let content = buffer_text(r.terminal());
        assert!(content.contains("Exercise Complete!"));
        assert!(content.contains("(space) restart"));
    }

    #[test]
    fn test_redraw_repeats_last_frame() {
        let mut r = renderer();
        r.redraw();
        assert!(!buffer_text(r.terminal()).contains("Kegel Timer"));

        r.render(&Snapshot::new(&SessionState::IDLE, &ExercisePlan::default(), true));
        r.terminal_mut().clear().unwrap();
        r.redraw();
        assert!(buffer_text(r.terminal()).contains("Ready to begin?"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        let mut r = TerminalRenderer::new(terminal, ExercisePlan::default(), 30);
        r.render(&Snapshot::new(&SessionState::IDLE, &ExercisePlan::default(), true));
    }

    #[test]
    fn test_phase_colors_are_distinct() {
        let colors = [
            phase_color(Phase::Idle),
            phase_color(Phase::Contracting),
            phase_color(Phase::RepResting),
            phase_color(Phase::SetResting { next_set: 1 }),
            phase_color(Phase::Finished),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
