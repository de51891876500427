use crate::error::AppError;
use crate::state::{draft_from_stored, payload_from_draft, Draft, State};
use crate::store::{items_from_snapshot, labels_from_value, Database, StoreError, StoredItem};
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const ITEMS_PATH: &str = "items";
pub const CATEGORIES_PATH: &str = "categories";
pub const SIZES_PATH: &str = "sizes";

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadVocabularies,
    SubscribeItems,
    FetchItem { id: String },
    SaveItem { draft: Draft },
}

/// Delays applied by the network handler.
///
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub save_delay: Duration,
    pub reconnect_delay: Duration,
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    database: &'a Database,
    timings: Timings,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, database: &'a Database, timings: Timings) -> Self {
        Handler {
            state,
            database,
            timings,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<(), AppError> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LoadVocabularies => self.load_vocabularies().await?,
            Event::SubscribeItems => self.subscribe_items(),
            Event::FetchItem { id } => self.fetch_item(id).await?,
            Event::SaveItem { draft } => self.save_item(draft).await?,
        }
        Ok(())
    }

    /// Read the category and size vocabularies once.
    ///
    async fn load_vocabularies(&mut self) -> Result<(), AppError> {
        info!("Fetching categories and sizes...");
        let categories = self.labels(CATEGORIES_PATH).await;
        let sizes = self.labels(SIZES_PATH).await;
        info!(
            "Loaded {} categories and {} sizes.",
            categories.len(),
            sizes.len()
        );
        let mut state = self.state.lock().await;
        state.set_categories(categories).set_sizes(sizes);
        Ok(())
    }

    async fn labels(&self, path: &str) -> Vec<String> {
        match self.database.get_once(path).await {
            Ok(Some(value)) => labels_from_value(&value),
            Ok(None) => {
                warn!("No {} stored", path);
                vec![]
            }
            Err(e) => {
                error!("Failed to load {}: {}", path, e);
                vec![]
            }
        }
    }

    /// Start the items subscription on its own task.
    ///
    fn subscribe_items(&mut self) {
        let state = Arc::clone(self.state);
        let database = self.database.clone();
        let reconnect_delay = self.timings.reconnect_delay;
        tokio::spawn(async move { watch_items(state, database, reconnect_delay).await });
    }

    /// Read one item and open the form pre-filled with it. The reply is
    /// dropped when another form was opened in the meantime.
    ///
    async fn fetch_item(&mut self, id: String) -> Result<(), AppError> {
        let path = format!("{}/{}", ITEMS_PATH, id);
        let value = match self.database.get_once(&path).await {
            Ok(value) => value,
            Err(e) => {
                self.state
                    .lock()
                    .await
                    .set_status(format!("Failed to load item: {}", e));
                return Err(e.into());
            }
        };
        let mut state = self.state.lock().await;
        let value = match value {
            Some(value) => value,
            None => {
                warn!("Item '{}' no longer exists", id);
                state.set_status(format!("Item {} no longer exists", id));
                return Ok(());
            }
        };
        let item: StoredItem = match serde_json::from_value(value) {
            Ok(item) => item,
            Err(e) => {
                state.set_status(format!("Failed to read item {}: {}", id, e));
                return Err(StoreError::from(e).into());
            }
        };
        if let Err(e) = state.open_fetched_item(draft_from_stored(&id, item)) {
            state.set_status(format!("Item {} not opened: {}", id, e));
            return Err(e.into());
        }
        debug!("Opened item '{}' for editing", id);
        Ok(())
    }

    /// Persist a validated draft: push when new, overwrite when editing.
    ///
    async fn save_item(&mut self, draft: Draft) -> Result<(), AppError> {
        let payload = payload_from_draft(&draft);
        tokio::time::sleep(self.timings.save_delay).await;
        let result = match &draft.firebase_id {
            Some(id) => self
                .database
                .set(&format!("{}/{}", ITEMS_PATH, id), &payload)
                .await
                .map(|_| id.to_owned()),
            None => self.database.push(ITEMS_PATH, &payload).await,
        };
        let mut state = self.state.lock().await;
        match result {
            Ok(key) => {
                info!("Saved item '{}' as {}", payload.name, key);
                state.save_succeeded(&payload.name);
            }
            Err(e) => {
                error!("Failed to save item '{}': {}", payload.name, e);
                state.save_failed(e.to_string());
            }
        }
        Ok(())
    }
}

/// Keep the items in state in sync with the database, subscribing again
/// after `reconnect_delay` whenever the stream ends or fails.
///
async fn watch_items(state: Arc<Mutex<State>>, database: Database, reconnect_delay: Duration) {
    loop {
        match database.subscribe(ITEMS_PATH).await {
            Ok(mut subscription) => {
                info!("Subscribed to {}.", ITEMS_PATH);
                loop {
                    match subscription.next_snapshot().await {
                        Ok(Some(snapshot)) => {
                            let items = items_from_snapshot(&snapshot);
                            debug!("Received snapshot with {} items", items.len());
                            state.lock().await.set_connected(true).set_items(items);
                        }
                        Ok(None) => {
                            warn!("Items stream ended");
                            break;
                        }
                        Err(e) => {
                            error!("Items stream failed: {}", e);
                            break;
                        }
                    }
                }
            }
            Err(e) => error!("Failed to subscribe to {}: {}", ITEMS_PATH, e),
        }
        state.lock().await.set_connected(false);
        debug!("Resubscribing in {:?}...", reconnect_delay);
        tokio::time::sleep(reconnect_delay).await;
    }
}
