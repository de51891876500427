use super::{footer, log, main, status, Frame};
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

/// Height of the log pane when it is visible.
///
const LOG_HEIGHT: u16 = 8;

/// Render every widget for the current frame.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let show_log = state.is_log_visible();
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(1)];
    if show_log {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    status(frame, chunks[0], state);
    main(frame, chunks[1], state);
    if show_log {
        log(frame, chunks[2], state);
    }
    footer(frame, chunks[chunks.len() - 1], state);
}
