use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::store::StoredItem;
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use crate::utils::text_processing::{
    format_amount, is_amount_input, is_count_input, parse_amount, parse_count,
};
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use std::collections::BTreeMap;

use super::form::{Draft, FormMessage, ItemFormHandler, VariantEdit};
use super::items::{flatten_items, menu_sections, ItemRow, MenuSection};
use super::navigation::{form_fields, next_field, previous_field, FormField, VariantColumn, View};
use super::StateError;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    log_buffer: LogBuffer,
    theme: Theme,
    terminal_size: Rect,
    spinner_index: usize,
    view_stack: Vec<View>,
    items: BTreeMap<String, StoredItem>,
    items_loaded: bool,
    rows: Vec<ItemRow>,
    items_table_state: TableState,
    menu_scroll: u16,
    categories: Vec<String>,
    sizes: Vec<String>,
    form: Option<ItemFormHandler>,
    form_field: FormField,
    input_buffer: String, // Text of the focused form field while typing
    saving: bool,
    form_notice: Option<String>,
    status_message: Option<String>,
    connected: bool,
    show_log: bool,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            log_buffer: LogBuffer::default(),
            theme: Theme::default(),
            terminal_size: Rect::default(),
            spinner_index: 0,
            view_stack: vec![View::Items],
            items: BTreeMap::new(),
            items_loaded: false,
            rows: vec![],
            items_table_state: TableState::default(),
            menu_scroll: 0,
            categories: vec![],
            sizes: vec![],
            form: None,
            form_field: FormField::Category,
            input_buffer: String::new(),
            saving: false,
            form_notice: None,
            status_message: None,
            connected: false,
            show_log: false,
        }
    }
}

impl State {
    /// Return new instance wired to the network thread and the log buffer.
    ///
    pub fn new(net_sender: NetworkEventSender, theme: Theme, log_buffer: LogBuffer) -> Self {
        State {
            net_sender: Some(net_sender),
            theme,
            log_buffer,
            ..State::default()
        }
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Update the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn get_terminal_size(&self) -> &Rect {
        &self.terminal_size
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        self.view_stack.last().unwrap_or(&View::Items)
    }

    /// Push a view onto the view stack unless it is already on top.
    ///
    pub fn push_view(&mut self, view: View) -> &mut Self {
        if *self.current_view() != view {
            self.view_stack.push(view);
        }
        self
    }

    /// Pop a view from the view stack, never removing the base view.
    ///
    pub fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    /// Replace the items with a new snapshot and re-derive the table rows.
    ///
    pub fn set_items(&mut self, items: BTreeMap<String, StoredItem>) -> &mut Self {
        self.rows = flatten_items(&items);
        self.items = items;
        self.items_loaded = true;
        let selected = match (self.rows.len(), self.items_table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.items_table_state.select(selected);
        self
    }

    pub fn get_items(&self) -> &BTreeMap<String, StoredItem> {
        &self.items
    }

    /// Whether at least one snapshot has been received.
    ///
    pub fn items_loaded(&self) -> bool {
        self.items_loaded
    }

    pub fn get_rows(&self) -> &[ItemRow] {
        &self.rows
    }

    /// Return the items grouped for the menu view.
    ///
    pub fn get_menu_sections(&self) -> Vec<MenuSection> {
        menu_sections(&self.items)
    }

    pub fn get_items_table_state(&mut self) -> &mut TableState {
        &mut self.items_table_state
    }

    /// Return the currently selected row.
    ///
    pub fn get_selected_row(&self) -> Option<&ItemRow> {
        self.items_table_state
            .selected()
            .and_then(|i| self.rows.get(i))
    }

    /// Select the next row, wrapping to the top.
    ///
    pub fn next_row_index(&mut self) -> &mut Self {
        if self.rows.is_empty() {
            self.items_table_state.select(None);
            return self;
        }
        let next = match self.items_table_state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.items_table_state.select(Some(next));
        self
    }

    /// Select the previous row, wrapping to the bottom.
    ///
    pub fn previous_row_index(&mut self) -> &mut Self {
        if self.rows.is_empty() {
            self.items_table_state.select(None);
            return self;
        }
        let previous = match self.items_table_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.items_table_state.select(Some(previous));
        self
    }

    pub fn get_menu_scroll(&self) -> u16 {
        self.menu_scroll
    }

    /// Scroll one line down, stopping at the last menu line.
    ///
    pub fn scroll_menu_down(&mut self) -> &mut Self {
        let last_line = self
            .get_menu_sections()
            .iter()
            .map(MenuSection::line_count)
            .sum::<usize>()
            .saturating_sub(1);
        let max_scroll = u16::try_from(last_line).unwrap_or(u16::MAX);
        self.menu_scroll = self.menu_scroll.saturating_add(1).min(max_scroll);
        self
    }

    pub fn scroll_menu_up(&mut self) -> &mut Self {
        self.menu_scroll = self.menu_scroll.saturating_sub(1);
        self
    }

    /// Open the menu view from the top.
    ///
    pub fn open_menu(&mut self) -> &mut Self {
        self.menu_scroll = 0;
        self.push_view(View::Menu)
    }

    pub fn set_categories(&mut self, categories: Vec<String>) -> &mut Self {
        self.categories = categories;
        self
    }

    pub fn get_categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_sizes(&mut self, sizes: Vec<String>) -> &mut Self {
        self.sizes = sizes;
        self
    }

    pub fn get_sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn set_status(&mut self, message: String) -> &mut Self {
        self.status_message = Some(message);
        self
    }

    pub fn clear_status(&mut self) -> &mut Self {
        self.status_message = None;
        self
    }

    pub fn get_status(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_connected(&mut self, connected: bool) -> &mut Self {
        self.connected = connected;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    /// Return the most recent log entries, oldest first.
    ///
    pub fn get_log_entries(&self, count: usize) -> Vec<String> {
        self.log_buffer.recent(count)
    }

    /// Open the form with an empty draft.
    ///
    pub fn open_new_item_form(&mut self) -> &mut Self {
        self.open_item_form(Draft::default())
    }

    /// Open the form pre-filled with `draft`.
    ///
    pub fn open_item_form(&mut self, draft: Draft) -> &mut Self {
        self.form = Some(ItemFormHandler::from_draft(draft));
        self.saving = false;
        self.form_notice = None;
        self.form_field = FormField::Category;
        self.sync_input_buffer();
        self.push_view(View::ItemForm)
    }

    /// Open the form for an item fetched for editing. Refused unless the
    /// items table is showing with no form open.
    ///
    pub fn open_fetched_item(&mut self, draft: Draft) -> Result<&mut Self, StateError> {
        if self.form.is_some() || self.saving || *self.current_view() != View::Items {
            return Err(StateError::FormAlreadyOpen);
        }
        Ok(self.clear_status().open_item_form(draft))
    }

    /// Dismiss the form. Refused while a save is in flight.
    ///
    pub fn close_item_form(&mut self) -> Result<(), StateError> {
        if self.saving {
            return Err(StateError::SaveInProgress);
        }
        self.form = None;
        self.form_notice = None;
        self.input_buffer.clear();
        if *self.current_view() == View::ItemForm {
            self.pop_view();
        }
        Ok(())
    }

    pub fn get_form(&self) -> Option<&ItemFormHandler> {
        self.form.as_ref()
    }

    pub fn get_form_field(&self) -> &FormField {
        &self.form_field
    }

    pub fn get_input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn get_form_notice(&self) -> Option<&str> {
        self.form_notice.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Request the selected item from the store so it can be edited.
    ///
    pub fn edit_selected_item(&mut self) -> Result<(), StateError> {
        let id = self
            .get_selected_row()
            .map(|row| row.firebase_id.to_owned())
            .ok_or(StateError::NoRowSelected)?;
        debug!("Requesting item '{}' for editing...", id);
        self.set_status(format!("Loading item {}...", id));
        self.dispatch(NetworkEvent::FetchItem { id });
        Ok(())
    }

    /// Move focus to the next form field.
    ///
    pub fn next_form_field(&mut self) -> &mut Self {
        if let Some(form) = &self.form {
            self.form_field = next_field(form.draft(), self.form_field);
            self.sync_input_buffer();
        }
        self
    }

    /// Move focus to the previous form field.
    ///
    pub fn previous_form_field(&mut self) -> &mut Self {
        if let Some(form) = &self.form {
            self.form_field = previous_field(form.draft(), self.form_field);
            self.sync_input_buffer();
        }
        self
    }

    /// Focus a specific form field if it exists for the current draft.
    ///
    pub fn set_form_field(&mut self, field: FormField) -> &mut Self {
        if let Some(form) = &self.form {
            if form_fields(form.draft()).contains(&field) {
                self.form_field = field;
                self.sync_input_buffer();
            }
        }
        self
    }

    /// Type a character into the focused text field. Characters that would
    /// make a numeric field invalid are dropped.
    ///
    pub fn add_input_char(&mut self, c: char) -> &mut Self {
        if self.form.is_none() || self.saving || !self.form_field.is_text() {
            return self;
        }
        let mut candidate = self.input_buffer.clone();
        candidate.push(c);
        if !self.accepts_input(&candidate) {
            debug!("Rejected input '{}' for {:?}", candidate, self.form_field);
            return self;
        }
        self.input_buffer = candidate;
        self.commit_input();
        self
    }

    /// Remove the last character of the focused text field.
    ///
    pub fn backspace_input(&mut self) -> &mut Self {
        if self.form.is_none() || self.saving || !self.form_field.is_text() {
            return self;
        }
        if self.input_buffer.pop().is_some() {
            self.commit_input();
        }
        self
    }

    /// Step the focused choice field through its vocabulary.
    ///
    pub fn cycle_choice(&mut self, forward: bool) -> &mut Self {
        if self.saving {
            return self;
        }
        let (options, current) = match (self.form_field, &self.form) {
            (FormField::Category, Some(form)) => {
                (&self.categories, form.draft().category.to_owned())
            }
            (FormField::Variant(i, VariantColumn::Type), Some(form)) => (
                &self.sizes,
                form.draft()
                    .variants
                    .get(i)
                    .map(|v| v.kind.to_owned())
                    .unwrap_or_default(),
            ),
            _ => return self,
        };
        if options.is_empty() {
            let message = match self.form_field {
                FormField::Category => "No categories available",
                _ => "No sizes available",
            };
            warn!("{}", message);
            self.set_status(message.to_string());
            return self;
        }
        let len = options.len();
        let index = match options.iter().position(|o| *o == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        let chosen = options[index].to_owned();
        let message = match self.form_field {
            FormField::Variant(i, _) => FormMessage::SetVariantField(i, VariantEdit::Type(chosen)),
            _ => FormMessage::SetCategory(chosen),
        };
        self.apply_form_message(message);
        self
    }

    /// Flip between a single price and a list of variants.
    ///
    pub fn toggle_single_sized(&mut self) -> &mut Self {
        if self.saving {
            return self;
        }
        if let Some(form) = &self.form {
            let value = !form.draft().is_single_sized;
            self.apply_form_message(FormMessage::SetSingleSized(value));
            self.ensure_valid_focus();
        }
        self
    }

    /// Append a blank variant and focus its type.
    ///
    pub fn add_variant(&mut self) -> &mut Self {
        if self.saving || self.form.is_none() {
            return self;
        }
        self.apply_form_message(FormMessage::AddVariant);
        if let Some(form) = &self.form {
            let last = form.draft().variants.len() - 1;
            self.set_form_field(FormField::Variant(last, VariantColumn::Type));
        }
        self
    }

    /// Delete the variant that has focus. The last variant is kept.
    ///
    pub fn delete_focused_variant(&mut self) -> &mut Self {
        if self.saving {
            return self;
        }
        if let FormField::Variant(index, _) = self.form_field {
            if self.form.as_ref().map(|f| f.draft().variants.len()) == Some(1) {
                self.set_status("An item needs at least one variant".to_string());
                return self;
            }
            self.apply_form_message(FormMessage::DeleteVariant(index));
            self.ensure_valid_focus();
        }
        self
    }

    /// Act on the focused field as if it was pressed.
    ///
    pub fn activate_form_field(&mut self) -> Result<(), StateError> {
        if self.form.is_none() {
            return Err(StateError::FormNotOpen);
        }
        match self.form_field {
            FormField::AddVariant => {
                self.add_variant();
            }
            FormField::SingleSized => {
                self.toggle_single_sized();
            }
            FormField::Submit => {
                self.submit_form()?;
            }
            FormField::Close => self.close_item_form()?,
            field if field.is_choice() => {
                self.cycle_choice(true);
            }
            _ => {
                self.next_form_field();
            }
        }
        Ok(())
    }

    /// Validate the draft and, when it has no errors, hand it to the network
    /// thread for saving. Returns whether a save was started.
    ///
    pub fn submit_form(&mut self) -> Result<bool, StateError> {
        if self.saving {
            return Err(StateError::SaveInProgress);
        }
        let form = self.form.as_mut().ok_or(StateError::FormNotOpen)?;
        let submitted = form.submit(|draft| {
            if draft.errors.is_empty() {
                Ok(draft.clone())
            } else {
                Err(draft.errors.count())
            }
        });
        match submitted {
            Ok(draft) => {
                info!("Saving item '{}'...", draft.name);
                self.saving = true;
                self.form_notice = None;
                self.dispatch(NetworkEvent::SaveItem { draft });
                Ok(true)
            }
            Err(count) => {
                debug!("Draft has {} validation errors", count);
                self.set_status(format!("Fix {} error(s) before saving", count));
                Ok(false)
            }
        }
    }

    /// Close the form after the store accepted the item.
    ///
    pub fn save_succeeded(&mut self, name: &str) -> &mut Self {
        self.saving = false;
        if let Err(e) = self.close_item_form() {
            error!("Failed to close item form: {}", e);
        }
        self.set_status(format!("Saved {}", name))
    }

    /// Keep the form open with the failure shown and submit enabled again.
    ///
    pub fn save_failed(&mut self, message: String) -> &mut Self {
        self.saving = false;
        self.form_notice = Some(message);
        self
    }

    /// Send a network event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Recieved error from network dispatch: {}", err);
            }
        }
    }

    /// Return the text shown for `field`, using the input buffer when the
    /// field has focus.
    ///
    pub fn field_text(&self, field: FormField) -> String {
        if field == self.form_field && field.is_text() {
            return self.input_buffer.to_owned();
        }
        self.stored_field_text(field)
    }

    fn stored_field_text(&self, field: FormField) -> String {
        let draft = match &self.form {
            Some(form) => form.draft(),
            None => return String::new(),
        };
        match field {
            FormField::Category => draft.category.to_owned(),
            FormField::Name => draft.name.to_owned(),
            FormField::Price => format_amount(draft.price),
            FormField::Cost => format_amount(draft.cost),
            FormField::Stocks => draft.stocks.to_string(),
            FormField::Variant(i, column) => match draft.variants.get(i) {
                Some(variant) => match column {
                    VariantColumn::Type => variant.kind.to_owned(),
                    VariantColumn::Price => format_amount(variant.price),
                    VariantColumn::Cost => format_amount(variant.cost),
                    VariantColumn::Stocks => variant.stocks.to_string(),
                },
                None => String::new(),
            },
            _ => String::new(),
        }
    }

    /// Load the focused field's value into the input buffer. A zero numeric
    /// value starts empty so typing replaces it.
    ///
    fn sync_input_buffer(&mut self) {
        let text = self.stored_field_text(self.form_field);
        self.input_buffer = match self.form_field {
            FormField::Name => text,
            field if field.is_text() && text == "0" => String::new(),
            field if field.is_text() => text,
            _ => String::new(),
        };
    }

    fn accepts_input(&self, candidate: &str) -> bool {
        match self.form_field {
            FormField::Name => true,
            FormField::Stocks | FormField::Variant(_, VariantColumn::Stocks) => {
                is_count_input(candidate)
            }
            _ => is_amount_input(candidate),
        }
    }

    /// Write the input buffer into the draft.
    ///
    fn commit_input(&mut self) {
        let text = self.input_buffer.to_owned();
        let amount = || parse_amount(&text).unwrap_or_default();
        let count = || parse_count(&text).unwrap_or_default();
        let message = match self.form_field {
            FormField::Name => FormMessage::SetName(text.to_owned()),
            FormField::Price => FormMessage::SetPrice(amount()),
            FormField::Cost => FormMessage::SetCost(amount()),
            FormField::Stocks => FormMessage::SetStocks(count()),
            FormField::Variant(i, VariantColumn::Price) => {
                FormMessage::SetVariantField(i, VariantEdit::Price(amount()))
            }
            FormField::Variant(i, VariantColumn::Cost) => {
                FormMessage::SetVariantField(i, VariantEdit::Cost(amount()))
            }
            FormField::Variant(i, VariantColumn::Stocks) => {
                FormMessage::SetVariantField(i, VariantEdit::Stocks(count()))
            }
            _ => return,
        };
        self.apply_form_message(message);
    }

    fn apply_form_message(&mut self, message: FormMessage) {
        match self.form.as_mut() {
            Some(form) => {
                if let Err(e) = form.apply(message) {
                    error!("Failed to update item form: {}", e);
                }
            }
            None => warn!("{}", StateError::FormNotOpen),
        }
    }

    /// Move focus to a field that exists after the draft's shape changed.
    ///
    fn ensure_valid_focus(&mut self) {
        let fields = match &self.form {
            Some(form) => form_fields(form.draft()),
            None => return,
        };
        if !fields.contains(&self.form_field) {
            let variant_count = fields
                .iter()
                .filter(|f| matches!(f, FormField::Variant(_, VariantColumn::Type)))
                .count();
            let candidate = match self.form_field {
                FormField::Variant(i, column) if variant_count > 0 => {
                    FormField::Variant(i.min(variant_count - 1), column)
                }
                _ => FormField::Category,
            };
            self.form_field = if fields.contains(&candidate) {
                candidate
            } else {
                fields[0]
            };
        }
        self.sync_input_buffer();
    }
}
