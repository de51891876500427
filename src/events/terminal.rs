use crate::state::{FormField, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        if tx.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one key press to state. Returns false when exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }
    match *state.current_view() {
        View::Items => handle_items_key(state, key),
        View::Menu => handle_menu_key(state, key),
        View::ItemForm => {
            handle_form_key(state, key);
            true
        }
    }
}

fn handle_items_key(state: &mut State, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_row_index();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_row_index();
        }
        KeyCode::Char('n') => {
            state.clear_status().open_new_item_form();
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Err(e) = state.edit_selected_item() {
                state.set_status(e.to_string());
            }
        }
        KeyCode::Char('m') => {
            state.open_menu();
        }
        KeyCode::Char('l') => {
            state.toggle_log();
        }
        _ => (),
    }
    true
}

fn handle_menu_key(state: &mut State, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('j') | KeyCode::Down => {
            state.scroll_menu_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.scroll_menu_up();
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            state.pop_view();
        }
        KeyCode::Char('l') => {
            state.toggle_log();
        }
        _ => (),
    }
    true
}

fn handle_form_key(state: &mut State, key: KeyEvent) {
    let field = *state.get_form_field();
    let result = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => state.close_item_form(),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => state.submit_form().map(|_| ()),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            state.delete_focused_variant();
            Ok(())
        }
        (KeyCode::Tab, _) | (KeyCode::Down, _) => {
            state.next_form_field();
            Ok(())
        }
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
            state.previous_form_field();
            Ok(())
        }
        (KeyCode::Left, _) if field.is_choice() => {
            state.cycle_choice(false);
            Ok(())
        }
        (KeyCode::Right, _) if field.is_choice() => {
            state.cycle_choice(true);
            Ok(())
        }
        (KeyCode::Enter, _) => state.activate_form_field(),
        (KeyCode::Backspace, _) => {
            state.backspace_input();
            Ok(())
        }
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT)
            if field.is_text() =>
        {
            state.add_input_char(c);
            Ok(())
        }
        (KeyCode::Char(' '), _) if field == FormField::SingleSized => {
            state.toggle_single_sized();
            Ok(())
        }
        _ => Ok(()),
    };
    if let Err(e) = result {
        debug!("Ignored form key {:?}: {}", key.code, e);
        state.set_status(e.to_string());
    }
}
