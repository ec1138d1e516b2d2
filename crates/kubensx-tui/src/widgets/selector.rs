use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::selector::SelectorState;
use crate::theme::Theme;

pub struct SelectorWidget<'a> {
    pub state: &'a SelectorState,
    pub theme: &'a Theme,
}

impl SelectorWidget<'_> {
    /// Rows needed to show every option plus the filter and hint lines.
    pub fn height_for(options: usize, max: u16) -> u16 {
        let rows = u16::try_from(options).unwrap_or(u16::MAX).saturating_add(2);
        rows.clamp(3, max.max(3))
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let state = self.state;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let filter_display = if state.filter().is_empty() { "type to filter" } else { state.filter() };
        let filter_style = if state.filter().is_empty() { t.text_dim } else { Style::default().fg(t.fg) };
        let filter_line = Line::from(vec![
            Span::styled(format!("{}: ", state.title()), Style::default().fg(t.accent).bold()),
            Span::styled(format!("> {filter_display}"), filter_style),
        ]);
        frame.render_widget(Paragraph::new(filter_line), chunks[0]);

        let filtered = state.filtered();
        let items: Vec<ListItem> = filtered
            .iter()
            .map(|option| {
                if state.is_multi() {
                    let (mark, style) = if state.is_marked(option) {
                        ("[x]", t.marked)
                    } else {
                        ("[ ]", Style::default().fg(t.fg))
                    };
                    ListItem::new(format!("  {mark} {option}")).style(style)
                } else {
                    ListItem::new(format!("  {option}")).style(Style::default().fg(t.fg))
                }
            })
            .collect();

        let list = List::new(items).highlight_style(t.selection.add_modifier(Modifier::BOLD));
        let mut list_state =
            ListState::default().with_selected(Some(state.selected().min(filtered.len().saturating_sub(1))));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let hints = if state.is_multi() {
            " ↑↓:move  Space:toggle  Enter:confirm  Esc:cancel"
        } else {
            " ↑↓:move  Enter:select  Esc:cancel"
        };
        frame.render_widget(Paragraph::new(hints).style(t.text_dim), chunks[2]);
    }
}
