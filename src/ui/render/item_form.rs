use super::variant_row;
use super::Frame;
use crate::state::{FormField, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const LABEL_WIDTH: usize = 10;

/// Render the item form as a popup over the table.
///
pub fn item_form(frame: &mut Frame, size: Rect, state: &State) {
    let form = match state.get_form() {
        Some(form) => form,
        None => return,
    };
    let draft = form.draft();
    let theme = state.get_theme();
    let errors = &draft.errors;

    let mut lines: Vec<Line> = vec![];
    let mut focus_line = 0;

    mark(state, FormField::Category, lines.len(), &mut focus_line);
    lines.extend(field_lines(state, "Category", FormField::Category, errors.category.as_deref()));
    mark(state, FormField::Name, lines.len(), &mut focus_line);
    lines.extend(field_lines(state, "Name", FormField::Name, errors.name.as_deref()));

    if draft.is_single_sized {
        mark(state, FormField::Price, lines.len(), &mut focus_line);
        lines.extend(field_lines(state, "Price", FormField::Price, errors.price.as_deref()));
        mark(state, FormField::Cost, lines.len(), &mut focus_line);
        lines.extend(field_lines(state, "Cost", FormField::Cost, None));
        mark(state, FormField::Stocks, lines.len(), &mut focus_line);
        lines.extend(field_lines(state, "Stocks", FormField::Stocks, None));
    } else {
        lines.push(Line::from(""));
        lines.push(variant_row::header(state));
        for index in 0..draft.variants.len() {
            if matches!(state.get_form_field(), FormField::Variant(i, _) if *i == index) {
                focus_line = lines.len();
            }
            lines.extend(variant_row::variant_row(state, index, errors.variant(index)));
        }
        mark(state, FormField::AddVariant, lines.len(), &mut focus_line);
        lines.push(button(state, FormField::AddVariant, "[ + Add variant ]"));
    }

    lines.push(Line::from(""));
    mark(state, FormField::SingleSized, lines.len(), &mut focus_line);
    let checkbox = format!("[{}] Single size", if draft.is_single_sized { "x" } else { " " });
    lines.push(button(state, FormField::SingleSized, &checkbox));

    if let Some(notice) = state.get_form_notice() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Save failed: {}", notice),
            styling::error_text_style(theme),
        )));
    }

    lines.push(Line::from(""));
    mark(state, FormField::Submit, lines.len(), &mut focus_line);
    mark(state, FormField::Close, lines.len(), &mut focus_line);
    let submit = if state.is_saving() {
        format!("[ {} Saving... ]", spinner::frame(*state.get_spinner_index()))
    } else if draft.is_update() {
        "[ Update item ]".to_string()
    } else {
        "[ Save item ]".to_string()
    };
    let mut actions = button(state, FormField::Submit, &submit).spans;
    actions.push(Span::raw("   "));
    actions.extend(button(state, FormField::Close, "[ Close ]").spans);
    lines.push(Line::from(actions));

    let title = if draft.is_update() {
        "Update Item"
    } else {
        "New Item"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(title, styling::active_block_title_style()));

    let visible = size.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 2).saturating_sub(visible) as u16;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(styling::normal_text_style(theme))
        .scroll((scroll, 0));

    frame.render_widget(Clear, size);
    frame.render_widget(paragraph, size);
}

/// Return a labelled field line followed by its error, if any.
///
fn field_lines(
    state: &State,
    label: &str,
    field: FormField,
    error: Option<&str>,
) -> Vec<Line<'static>> {
    let theme = state.get_theme();
    let focused = *state.get_form_field() == field;
    let text = state.field_text(field);
    let shown = match (field.is_choice(), focused) {
        (true, true) if text.is_empty() => "◂ select ▸".to_string(),
        (true, true) => format!("◂ {} ▸", text),
        (_, true) => format!("{}▏", text),
        (_, false) if text.is_empty() => "-".to_string(),
        (_, false) => text,
    };
    let value_style = if focused {
        styling::focused_field_style(theme)
    } else if error.is_some() {
        styling::error_text_style(theme)
    } else {
        styling::normal_text_style(theme)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            styling::muted_text_style(theme),
        ),
        Span::styled(shown, value_style),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("{:<width$}{}", "", error, width = LABEL_WIDTH),
            styling::error_text_style(theme),
        )));
    }
    lines
}

/// Remember `line` as the focused line when `field` has focus.
///
fn mark(state: &State, field: FormField, line: usize, focus_line: &mut usize) {
    if *state.get_form_field() == field {
        *focus_line = line;
    }
}

fn button(state: &State, field: FormField, label: &str) -> Line<'static> {
    let theme = state.get_theme();
    let style = if *state.get_form_field() == field {
        styling::focused_field_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    Line::from(Span::styled(label.to_string(), style))
}
