use super::Frame;
use crate::state::{FormField, State, View};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the current view.
///
fn controls_text(state: &State) -> String {
    match state.current_view() {
        View::Items => {
            " j/k: navigate, n: new item, e/Enter: edit, m: menu, l: log, q: quit".to_string()
        }
        View::Menu => " j/k: scroll, Esc: back, l: log, q: quit".to_string(),
        View::ItemForm if state.is_saving() => " Saving...".to_string(),
        View::ItemForm => {
            let focused = match state.get_form_field() {
                field if field.is_choice() => "←/→: choose, ",
                FormField::SingleSized => "Space: toggle, ",
                FormField::Variant(_, _) => "Ctrl-D: delete variant, ",
                _ => "",
            };
            format!(
                " Tab/Shift-Tab: move, {}Enter: press, Ctrl-S: save, Esc: close",
                focused
            )
        }
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (label, color) = match state.current_view() {
        View::Items => ("ITEMS:", theme.footer_items.to_color()),
        View::Menu => ("MENU:", theme.footer_menu.to_color()),
        View::ItemForm => ("FORM:", theme.footer_form.to_color()),
    };
    let line = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            controls_text(state),
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), size);
}
