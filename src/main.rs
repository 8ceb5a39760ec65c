mod config;
mod evaluator;
mod game;
mod logging;
mod puzzle;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use config::GameConfig;
use game::session::ROOM_CODE_MAX_TYPED;
use game::{DebriefReason, GameMachine, Screen};
use puzzle::Catalog;
use ui::{draw_ui, first_line, Inputs, WelcomeField};

const IDLE_POLL: Duration = Duration::from_millis(250);

struct App {
    game: GameMachine,
    inputs: Inputs,
    last_screen: Screen,
    quit: bool,
}

impl App {
    fn new(game: GameMachine) -> Self {
        App {
            last_screen: game.screen(),
            game,
            inputs: Inputs::new(),
            quit: false,
        }
    }

    /// Resets front-end inputs when the machine has moved to a new screen.
    fn sync_screen(&mut self) {
        let screen = self.game.screen();
        if screen == self.last_screen {
            return;
        }
        match screen {
            Screen::Puzzle => {
                let placeholder = self
                    .game
                    .active_puzzle()
                    .map(|p| p.kind.placeholder())
                    .unwrap_or_default();
                self.inputs.reset_answer(placeholder);
            }
            Screen::Meta => self.inputs.reset_final_key(),
            Screen::Welcome => self.inputs.focus_welcome(WelcomeField::Name),
            Screen::Map => {
                let nodes = self.game.continents();
                if self.inputs.map_cursor >= nodes.len() {
                    self.inputs.map_cursor = 0;
                }
            }
            Screen::Lobby | Screen::Debrief => {}
        }
        self.last_screen = screen;
    }

    fn move_cursor(&mut self, forward: bool) {
        let len = self.game.continents().len();
        if len == 0 {
            return;
        }
        self.inputs.map_cursor = if forward {
            (self.inputs.map_cursor + 1) % len
        } else {
            (self.inputs.map_cursor + len - 1) % len
        };
    }

    fn select_at(&mut self, index: usize) {
        let Some(id) = self.game.continents().get(index).map(|n| n.id.clone()) else {
            return;
        };
        self.inputs.map_cursor = index;
        self.game.select_continent(&id);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match self.game.screen() {
            Screen::Welcome => match key.code {
                KeyCode::Esc => self.quit = true,
                KeyCode::Tab | KeyCode::BackTab => {
                    let next = match self.inputs.welcome_focus {
                        WelcomeField::Name => WelcomeField::RoomCode,
                        WelcomeField::RoomCode => WelcomeField::Name,
                    };
                    self.inputs.focus_welcome(next);
                }
                KeyCode::Enter => {
                    self.game.enter_lobby();
                }
                _ => match self.inputs.welcome_focus {
                    WelcomeField::Name => {
                        self.inputs.name.input(key);
                        self.game.set_player_name(&first_line(&self.inputs.name));
                    }
                    WelcomeField::RoomCode => {
                        let full = first_line(&self.inputs.room_code).chars().count()
                            >= ROOM_CODE_MAX_TYPED;
                        if !(full && matches!(key.code, KeyCode::Char(_))) {
                            self.inputs.room_code.input(key);
                        }
                        self.game.set_room_code(&first_line(&self.inputs.room_code));
                    }
                },
            },
            Screen::Lobby => match key.code {
                KeyCode::Enter => {
                    self.game.begin_session();
                }
                KeyCode::Esc => self.quit = true,
                _ => {}
            },
            Screen::Map => match key.code {
                KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
                KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
                KeyCode::Enter => self.select_at(self.inputs.map_cursor),
                KeyCode::Char(c @ '1'..='9') => {
                    if let Some(digit) = c.to_digit(10) {
                        self.select_at(digit as usize - 1);
                    }
                }
                KeyCode::Char('q') => self.quit = true,
                _ => {}
            },
            Screen::Puzzle => match key.code {
                KeyCode::Enter => {
                    let answer = first_line(&self.inputs.answer);
                    self.game.submit_answer(&answer);
                }
                KeyCode::F(1) => {
                    self.game.use_hint();
                }
                KeyCode::Esc => {
                    self.game.go_back_to_map();
                }
                _ => {
                    if self.game.attempt().is_some_and(|a| !a.is_settling()) {
                        self.inputs.answer.input(key);
                        self.game.set_answer_input(&first_line(&self.inputs.answer));
                    }
                }
            },
            Screen::Meta => match key.code {
                KeyCode::Enter => {
                    let key = first_line(&self.inputs.final_key);
                    self.game.submit_final_key(&key);
                }
                _ => {
                    self.inputs.final_key.input(key);
                }
            },
            Screen::Debrief => match key.code {
                KeyCode::Enter => {
                    self.game.restart();
                }
                KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                _ => {}
            },
        }

        self.sync_screen();
    }
}

fn load_catalog(config: &GameConfig) -> Result<Catalog> {
    if let Some(path) = &config.catalog {
        match Catalog::from_path(path) {
            Ok(catalog) => {
                info!(path = %path.display(), "catalog loaded");
                return Ok(catalog);
            }
            Err(e) => warn!(path = %path.display(), "bad catalog, using built-in: {e:#}"),
        }
    }
    Catalog::builtin().context("built-in catalog is invalid")
}

fn main() -> Result<()> {
    let config = GameConfig::load();
    logging::init_tracing(&config.log_file);
    for warning in &config.warnings {
        warn!("{warning}");
    }

    let catalog = load_catalog(&config)?;
    let game = GameMachine::new(catalog, config.rules.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result?;

    match app.game.session().debrief_reason {
        Some(DebriefReason::KeySubmitted) if app.game.screen() == Screen::Debrief => {
            println!("\nMission accomplie ! Le Cartographe Fantôme est déjoué.\n");
        }
        Some(DebriefReason::TimeExpired) if app.game.screen() == Screen::Debrief => {
            println!("\nTemps écoulé. Le Cartographe Fantôme court toujours.\n");
        }
        _ => {}
    }

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.quit {
        app.game.update(Instant::now());
        app.sync_screen();
        terminal.draw(|f| draw_ui(f, &app.game, &app.inputs))?;

        let timeout = app
            .game
            .next_wakeup(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    info!("quit");
    Ok(())
}
