use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::{spinner, styling};
use crate::utils::text_processing::format_amount;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

const HEADERS: [&str; 6] = ["Category", "Name", "Size", "Price", "Cost", "Stocks"];

/// Render the items table, one row per size.
///
pub fn items(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let border_style = if *state.current_view() == View::Items {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!("Items ({})", state.get_items().len()),
            styling::active_block_title_style(),
        ));

    if !state.items_loaded() || state.get_rows().is_empty() {
        let message = if state.items_loaded() {
            "No items yet. Press n to add one.".to_string()
        } else {
            format!(
                "{} Loading items...",
                spinner::frame(*state.get_spinner_index())
            )
        };
        let paragraph = Paragraph::new(message)
            .style(styling::muted_text_style(theme))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, size);
        return;
    }

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(styling::header_style(theme))
        .bottom_margin(1);
    let rows: Vec<Row> = state
        .get_rows()
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.category.to_owned()),
                Cell::from(row.name.to_owned()),
                Cell::from(row.size.to_owned()),
                Cell::from(format_amount(row.price)),
                Cell::from(format_amount(row.cost)),
                Cell::from(row.stocks.to_string()),
            ])
        })
        .collect();
    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
        Constraint::Percentage(11),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::selected_row_style(theme))
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, size, state.get_items_table_state());
}
