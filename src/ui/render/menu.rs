use super::Frame;
use crate::state::{MenuSection, State};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use crate::utils::text_processing::format_amount;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the read-only menu, grouped by category.
///
pub fn menu(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled("Menu", styling::active_block_title_style()));

    let sections = state.get_menu_sections();
    if sections.is_empty() {
        let paragraph = Paragraph::new("Nothing on the menu yet.")
            .style(styling::muted_text_style(theme))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, size);
        return;
    }

    let lines: Vec<Line> = sections
        .iter()
        .flat_map(|section| section_lines(section, theme))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((state.get_menu_scroll(), 0));
    frame.render_widget(paragraph, size);
}

fn section_lines(section: &MenuSection, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        section.category.to_uppercase(),
        styling::header_style(theme),
    ))];
    let normal = styling::normal_text_style(theme);
    let muted = styling::muted_text_style(theme);
    for entry in &section.entries {
        if entry.is_single_line() {
            let only = &entry.sizes[0];
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<28}", entry.name), normal),
                Span::styled(format_amount(only.price), normal),
                Span::styled(format!("  ({} left)", only.stocks), muted),
            ]));
            continue;
        }
        lines.push(Line::from(Span::styled(format!("  {}", entry.name), normal)));
        for size in &entry.sizes {
            lines.push(Line::from(vec![
                Span::styled(format!("    {:<26}", size.kind), muted),
                Span::styled(format_amount(size.price), normal),
                Span::styled(format!("  ({} left)", size.stocks), muted),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines
}
