use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::debug;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::{ChatClient, ClientError};
use crate::config::WidgetOptions;
use crate::controller::{ChatController, Phase, SendRequest};
use crate::model::{ChatReply, ChatbotConfig};
use crate::ui::{ChatDock, Composer, ComposerResult, Theme};

/// Results delivered back from background network tasks.
enum NetEvent {
    Config(Result<ChatbotConfig, ClientError>),
    Reply(Result<ChatReply, ClientError>),
}

/// Event loop driving the widget: keyboard input, one background
/// network task at a time, and per-tick rendering.
pub struct App {
    options: WidgetOptions,
    controller: ChatController,
    composer: Composer,
    client: ChatClient,
    net_tx: mpsc::UnboundedSender<NetEvent>,
    net_rx: mpsc::UnboundedReceiver<NetEvent>,
    in_flight: Option<JoinHandle<()>>,
    should_quit: bool,
}

impl App {
    pub fn new(options: WidgetOptions) -> Self {
        let api_key = options.api_key.clone().unwrap_or_default();
        let controller = ChatController::new(&api_key);
        let client = ChatClient::new(api_key, options.base_url.clone());
        let (net_tx, net_rx) = mpsc::unbounded_channel();

        Self {
            options,
            controller,
            composer: Composer::new(),
            client,
            net_tx,
            net_rx,
            in_flight: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        self.spawn_config_fetch();

        while !self.should_quit {
            self.pump();

            if let Phase::Failed(reason) = self.controller.phase() {
                // Nothing will ever render; stop instead of showing a
                // broken widget.
                let reason = reason.clone();
                self.abort_in_flight();
                anyhow::bail!(reason);
            }

            self.composer
                .set_focus(self.controller.is_open() && !self.controller.is_loading());

            terminal.draw(|frame| {
                let theme = Theme::resolve(&self.options, self.controller.config());
                frame.render_widget(
                    ChatDock::new(&self.controller, &self.composer, &theme),
                    frame.size(),
                );
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }

        // No state updates after teardown: the in-flight task dies with
        // the loop.
        self.abort_in_flight();
        Ok(())
    }

    /// Drain completed network results into the controller.
    fn pump(&mut self) {
        while let Ok(net_event) = self.net_rx.try_recv() {
            self.in_flight = None;
            match net_event {
                NetEvent::Config(result) => self.controller.apply_config(result),
                NetEvent::Reply(result) => self.controller.apply_send(result),
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if !self.controller.is_open() {
            match key.code {
                KeyCode::Enter | KeyCode::Char('o') | KeyCode::Char(' ') => self.controller.open(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            }
            return;
        }

        if key.code == KeyCode::Esc {
            self.controller.close();
            return;
        }

        // Input is disabled while a send is outstanding.
        if self.controller.is_loading() {
            return;
        }

        if let ComposerResult::Submitted(text) = self.composer.handle_key(key) {
            if let Some(request) = self.controller.submit(&text) {
                self.dispatch(request);
            }
        }
    }

    fn spawn_config_fetch(&mut self) {
        if !matches!(self.controller.phase(), Phase::Loading) {
            return;
        }

        debug!("fetching chatbot configuration");
        let client = self.client.clone();
        let tx = self.net_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let _ = tx.send(NetEvent::Config(client.fetch_config().await));
        }));
    }

    fn dispatch(&mut self, request: SendRequest) {
        debug!("sending message ({} chars)", request.text.len());
        let client = self.client.clone();
        let tx = self.net_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let reply = client
                .send_message(&request.text, request.conversation_id.as_deref())
                .await;
            let _ = tx.send(NetEvent::Reply(reply));
        }));
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

pub fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to restore cursor")?;
    Ok(())
}
