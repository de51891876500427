use super::{item_form, items, menu, Frame};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Render main widget according to state.
///
pub fn main(frame: &mut Frame, size: Rect, state: &mut State) {
    match *state.current_view() {
        View::Items => {
            items::items(frame, size, state);
        }
        View::Menu => {
            menu::menu(frame, size, state);
        }
        View::ItemForm => {
            // The table stays visible behind the form
            items::items(frame, size, state);
            item_form::item_form(frame, centered_rect(70, 85, size), state);
        }
    }
}

/// Return a rectangle centered in `r` taking the given percentages.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
