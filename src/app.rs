use crate::config::Config;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler, Timings};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, LogBuffer};
use crate::state::State;
use crate::store::Database;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = LogBuffer::default();
        logger::init(config.log_level_filter()?, log_buffer.clone())?;

        info!("Starting application...");
        let database_url = config.database_url()?.to_owned();
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(
                tx.clone(),
                config.theme(),
                log_buffer,
            ))),
            config,
        };
        app.start_network(rx, database_url);
        app.start_ui(tx).await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver, database_url: String) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let auth_token = self.config.auth_token.to_owned();
        let timings = Timings {
            save_delay: Duration::from_millis(self.config.save_delay_ms),
            reconnect_delay: Duration::from_millis(self.config.reconnect_delay_ms),
        };
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to create network runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                let database = Database::new(&database_url, auth_token.as_deref());
                let mut network_event_handler =
                    NetworkEventHandler::new(&cloned_state, &database, timings);
                while let Ok(network_event) = net_receiver.recv() {
                    match network_event_handler.handle(network_event).await {
                        Ok(_) => (),
                        Err(e) => error!("Failed to handle network event: {}", e),
                    }
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, net_sender: NetworkEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        net_sender.send(NetworkEvent::LoadVocabularies)?;
        net_sender.send(NetworkEvent::SubscribeItems)?;

        let result = self.render_loop(&mut terminal).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    async fn render_loop(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            if let Ok(size) = terminal.backend().size() {
                state.set_terminal_size(size);
            };
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
