use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const BANNER: &str = " menu-tui ";

/// Render the status line: banner, connection state and latest message.
///
pub fn status(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let connection = if state.is_connected() {
        Span::styled(" ● live ", Style::default().fg(theme.success.to_color()))
    } else {
        Span::styled(
            format!(" {} connecting ", spinner::frame(*state.get_spinner_index())),
            Style::default().fg(theme.warning.to_color()),
        )
    };
    let mut spans = vec![Span::styled(BANNER, styling::banner_style(theme)), connection];
    if let Some(message) = state.get_status() {
        spans.push(Span::styled(
            format!(" {}", message),
            styling::muted_text_style(theme),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}
