use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .title("Log (l: hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let visible = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .get_log_entries(visible)
        .into_iter()
        .map(|entry| {
            let style = if entry.contains(" ERROR ") {
                styling::error_text_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Line::from(vec![Span::styled(entry, style)]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), size);
}
