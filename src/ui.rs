use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use crate::config::AppConfig;
use crate::logging;
use crate::screens::browse::{BrowseScreen, BrowseSignal};
use crate::screens::connect::{ConnectOutcome, ConnectScreen};
use crate::statusbar::{Screen, StatusBarRenderer};

pub struct App {
    config: AppConfig,
    connect: ConnectScreen,
    browse: Option<BrowseScreen>,
    statusbar: StatusBarRenderer,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let connect = ConnectScreen::new(&config.base_url);
        Self {
            config,
            connect,
            browse: None,
            statusbar: StatusBarRenderer::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        logging::switch_to_tui_logging();

        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        enable_raw_mode()?;
        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
        execute!(terminal.backend_mut(), crossterm::event::EnableMouseCapture)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), crossterm::event::DisableMouseCapture)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

        result
    }

    async fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|f| self.ui(f))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        self.handle_key(key.code, key.modifiers).await?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse).await?;
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn ui(&mut self, f: &mut Frame) {
        let area = f.area();
        match &mut self.browse {
            // The browse screen draws its own status line.
            Some(browse) => browse.render(f, area),
            None => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(area);
                self.connect.render(f, chunks[0]);
                self.statusbar.render_status_bar(f, chunks[1]);
            }
        }
    }

    async fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        // Ctrl+C always quits, whatever screen is active.
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match &mut self.browse {
            Some(browse) => {
                if let Some(BrowseSignal::Disconnect) =
                    browse.handle_input(key, modifiers).await?
                {
                    self.leave_browse();
                }
            }
            None => {
                let outcome = self.connect.handle_input(key, modifiers, &self.config).await?;
                if let Some(outcome) = outcome {
                    self.apply_connect_outcome(outcome);
                }
            }
        }
        Ok(())
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match &mut self.browse {
            Some(browse) => {
                if let Some(BrowseSignal::Disconnect) = browse.handle_mouse_input(mouse).await? {
                    self.leave_browse();
                }
            }
            None => {
                let outcome = self.connect.handle_mouse_input(mouse, &self.config).await?;
                if let Some(outcome) = outcome {
                    self.apply_connect_outcome(outcome);
                }
            }
        }
        Ok(())
    }

    fn apply_connect_outcome(&mut self, outcome: ConnectOutcome) {
        match outcome {
            ConnectOutcome::Connected { api, tree } => {
                self.statusbar.set_server_url(Some(api.base_url().to_string()));
                self.statusbar.set_current_screen(Screen::Browse);
                self.statusbar.set_status_message("Connected");
                self.browse = Some(BrowseScreen::new(api, tree));
            }
            ConnectOutcome::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn leave_browse(&mut self) {
        log::info!("Disconnected from backend");
        self.browse = None;
        self.connect.reset();
        self.statusbar.set_server_url(None);
        self.statusbar.set_current_screen(Screen::Connect);
        self.statusbar.set_status_message("Disconnected");
    }
}
