use crate::state::{FormField, State, VariantColumn, VariantError};
use crate::ui::widgets::styling;
use ratatui::text::{Line, Span};

/// Display width of each variant column, in `VariantColumn::ALL` order.
///
const COLUMN_WIDTHS: [usize; 4] = [16, 12, 12, 8];

const COLUMN_TITLES: [&str; 4] = ["Type", "Price", "Cost", "Stocks"];

/// Return the column titles shown above the variant rows.
///
pub fn header(state: &State) -> Line<'static> {
    let style = styling::header_style(state.get_theme());
    let spans: Vec<Span> = COLUMN_TITLES
        .iter()
        .zip(COLUMN_WIDTHS.iter())
        .map(|(title, width)| Span::styled(format!("  {:<width$}", title, width = *width), style))
        .collect();
    Line::from(spans)
}

/// Return the lines of one variant row: the editable cells followed by its
/// errors, if any.
///
pub fn variant_row(
    state: &State,
    index: usize,
    error: Option<&VariantError>,
) -> Vec<Line<'static>> {
    let theme = state.get_theme();
    let row_focused = matches!(state.get_form_field(), FormField::Variant(i, _) if *i == index);

    let mut spans: Vec<Span> = VariantColumn::ALL
        .iter()
        .zip(COLUMN_WIDTHS.iter())
        .map(|(column, width)| {
            let field = FormField::Variant(index, *column);
            let focused = *state.get_form_field() == field;
            let text = state.field_text(field);
            let shown = match (column, focused) {
                (VariantColumn::Type, true) if text.is_empty() => "◂ select ▸".to_string(),
                (VariantColumn::Type, true) => format!("◂ {} ▸", text),
                (VariantColumn::Type, false) if text.is_empty() => "-".to_string(),
                (_, true) => format!("{}▏", text),
                (_, false) => text,
            };
            let has_error = match (column, error) {
                (VariantColumn::Type, Some(e)) => e.kind.is_some(),
                (VariantColumn::Price, Some(e)) => e.price.is_some(),
                _ => false,
            };
            let style = if focused {
                styling::focused_field_style(theme)
            } else if has_error {
                styling::error_text_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            Span::styled(format!("  {:<width$}", shown, width = *width), style)
        })
        .collect();
    if row_focused {
        spans.push(Span::styled("  Ctrl-D: delete", styling::muted_text_style(theme)));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(error) = error {
        let messages: Vec<&str> = [error.kind.as_deref(), error.price.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        lines.push(Line::from(Span::styled(
            format!("    {}", messages.join(" ")),
            styling::error_text_style(theme),
        )));
    }
    lines
}
