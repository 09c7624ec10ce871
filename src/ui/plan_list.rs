use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

use kegel::{plan::ExercisePlan, util::format_duration};

/// The whole plan, one row per set, with the active set marked.
pub struct PlanList<'a> {
    pub plan: &'a ExercisePlan,
    pub highlighted: Option<usize>,
    pub total_secs: u64,
}

impl Widget for PlanList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .plan
            .iter()
            .enumerate()
            .map(|(idx, set)| {
                let text = format!(
                    "Set {}: {} reps, {}s contract / {}s rest ({})",
                    set.set_id, set.reps, set.contract_secs, set.rest_secs, set.intensity
                );
                if self.highlighted == Some(idx) {
                    ListItem::new(Line::from(vec![
                        Span::styled("▌ ", Style::default().fg(Color::Magenta)),
                        Span::styled(
                            text,
                            Style::default()
                                .fg(Color::Magenta)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(text, Style::default().fg(Color::Gray)),
                    ]))
                }
            })
            .collect();

        let title = format!(" Exercise Plan · {} ", format_duration(self.total_secs));
        List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buffer: &Buffer, area: Rect) -> Vec<String> {
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_lists_every_set_and_marks_current() {
        let plan = ExercisePlan::default();
        let area = Rect::new(0, 0, 70, 8);
        let mut buffer = Buffer::empty(area);
        PlanList {
            plan: &plan,
            highlighted: Some(1),
            total_secs: plan.total_secs(30),
        }
        .render(area, &mut buffer);

        let rows = rows(&buffer, area);
        assert!(rows[0].contains("Exercise Plan · 5m 46s"));
        assert!(rows[1].contains("Set 1: 12 reps, 5s contract / 1s rest (Moderate)"));
        assert!(rows[2].contains("▌ Set 2"));
        assert!(rows[4].contains("Set 4: 10 reps, 3s contract / 1s rest (High)"));
        assert!(!rows[4].contains('▌'));
    }

    #[test]
    fn test_no_marker_when_nothing_highlighted() {
        let plan = ExercisePlan::default();
        let area = Rect::new(0, 0, 70, 8);
        let mut buffer = Buffer::empty(area);
        PlanList {
            plan: &plan,
            highlighted: None,
            total_secs: 0,
        }
        .render(area, &mut buffer);

        assert!(rows(&buffer, area).iter().all(|row| !row.contains('▌')));
    }
}
