mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use graven::{
    config::{Config, ConfigStore, FileConfigStore},
    history::{HistoryLog, PracticeRecord},
    library::Library,
    passage::Passage,
    reference::{Reference, ReferenceError},
    runtime::{AppEvent, CrosstermEvents, Runner},
};
use rand::rngs::ThreadRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::Path,
    time::Duration,
};

const TICK_RATE_MS: u64 = 250;

/// Loaded from the working directory when present and no -f flag is given.
const DEFAULT_PASSAGE_FILE: &str = "passages.txt";

/// scripture memorization tui with progressive word hiding
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A scripture memorization TUI: each round hides a few more words of the passage until you can recite it with none showing. Comes with a bundled passage library, hints, difficulty presets, and a practice history log."
)]
pub struct Cli {
    /// difficulty preset controlling how many words each round hides
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// explicit number of words to hide per round (overrides difficulty)
    #[clap(short = 'w', long)]
    words_per_round: Option<usize>,

    /// load additional passages from a file
    #[clap(short = 'f', long)]
    file: Option<String>,

    /// jump straight into practicing the passage with this reference
    #[clap(short = 'r', long)]
    reference: Option<String>,

    /// print the library references and exit
    #[clap(long)]
    list: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn words_per_round(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Menu,
    Practice,
    Done,
}

#[derive(Debug)]
pub struct App {
    pub library: Library,
    pub state: AppState,
    pub selected: usize,
    pub current: Option<usize>,
    pub words_per_round: usize,
    pub difficulty: Option<Difficulty>,
    pub rounds: usize,
    pub hints_used: usize,
    pub history: Option<HistoryLog>,
    pub should_quit: bool,
    rng: ThreadRng,
}

impl App {
    pub fn new(library: Library, words_per_round: usize, difficulty: Option<Difficulty>) -> Self {
        Self {
            library,
            state: AppState::Menu,
            selected: 0,
            current: None,
            words_per_round,
            difficulty,
            rounds: 0,
            hints_used: 0,
            history: HistoryLog::new(),
            should_quit: false,
            rng: rand::thread_rng(),
        }
    }

    pub fn current_passage(&self) -> Option<&Passage> {
        self.current.and_then(|i| self.library.get(i).ok())
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.library.len() {
            self.selected += 1;
        }
    }

    fn start_selected(&mut self) {
        if !self.library.is_empty() {
            self.start_practice(self.selected);
        }
    }

    fn start_random(&mut self) {
        if let Some(index) = self.library.random_index(&mut self.rng) {
            self.start_practice(index);
        }
    }

    fn start_practice(&mut self, index: usize) {
        if let Ok(passage) = self.library.get_mut(index) {
            passage.reset();
            self.current = Some(index);
            self.rounds = 0;
            self.hints_used = 0;
            self.state = AppState::Practice;
        }
    }

    fn hide_round(&mut self) {
        let Some(index) = self.current else { return };
        let count = self.words_per_round;
        let Ok(passage) = self.library.get_mut(index) else {
            return;
        };

        if passage.hide_random(&mut self.rng, count) > 0 {
            self.rounds += 1;
        }

        if passage.is_complete() {
            let record = PracticeRecord {
                date: chrono::Local::now(),
                reference: passage.reference().to_string(),
                words: passage.word_count(),
                rounds: self.rounds,
                hints: self.hints_used,
            };
            self.state = AppState::Done;
            if let Some(log) = &self.history {
                let _ = log.append(&record);
            }
        }
    }

    fn hint(&mut self) {
        let Some(index) = self.current else { return };
        if let Ok(passage) = self.library.get_mut(index) {
            if passage.reveal_hint(&mut self.rng) {
                self.hints_used += 1;
            }
        }
    }

    fn restart(&mut self) {
        if let Some(index) = self.current {
            self.start_practice(index);
        }
    }

    fn back_to_menu(&mut self) {
        self.state = AppState::Menu;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let config = store.load();
    let words_per_round = cli
        .words_per_round
        .or_else(|| cli.difficulty.map(|d| d.words_per_round()))
        .unwrap_or(config.words_per_round);

    let mut library = Library::from_verse_set(&config.verse_set);
    let passage_file = cli.file.clone().or_else(|| {
        Path::new(DEFAULT_PASSAGE_FILE)
            .exists()
            .then(|| DEFAULT_PASSAGE_FILE.to_string())
    });
    if let Some(path) = passage_file {
        if let Err(err) = library.load_from_file(&path) {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::Io,
                format!("could not load passages from {path}: {err}"),
            )
            .exit();
        }
    }

    if cli.list {
        for (i, reference) in library.references().iter().enumerate() {
            println!("{:>3}. {reference}", i + 1);
        }
        return Ok(());
    }

    let start_index = cli.reference.as_deref().map(|raw| {
        let reference: Reference = raw.parse().unwrap_or_else(|err: ReferenceError| {
            Cli::command()
                .error(ErrorKind::InvalidValue, err.to_string())
                .exit()
        });
        library.position(&reference).unwrap_or_else(|| {
            Cli::command()
                .error(
                    ErrorKind::InvalidValue,
                    format!("no passage in the library matches {reference}"),
                )
                .exit()
        })
    });

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(library, words_per_round, cli.difficulty);
    if let Some(index) = start_index {
        app.start_practice(index);
    }

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    let _ = store.save(&Config {
        words_per_round: app.words_per_round,
        verse_set: config.verse_set,
    });

    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEvents::new(), Duration::from_millis(TICK_RATE_MS));

    while !app.should_quit {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Key(key) => handle_key(app, key),
            // Redrawn at the top of the loop either way
            AppEvent::Resize | AppEvent::Tick => {}
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.state {
        AppState::Menu => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Enter => app.start_selected(),
            KeyCode::Char('r') => app.start_random(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        },
        AppState::Practice => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => app.hide_round(),
            KeyCode::Char('h') => app.hint(),
            KeyCode::Char('r') => app.restart(),
            KeyCode::Esc => app.back_to_menu(),
            _ => {}
        },
        AppState::Done => match key.code {
            KeyCode::Char('r') => app.restart(),
            KeyCode::Enter | KeyCode::Esc => app.back_to_menu(),
            _ => {}
        },
    }
}
