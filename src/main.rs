mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use skillfolio::{
    app::{JokesApp, QuizApp, StudentsApp},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    jokes::load_jokes,
    quiz::Difficulty,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    students::StudentStore,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

const TICK_RATE_MS: u64 = 100;
const LOG_ENV: &str = "SKILLFOLIO_LOG";

/// timed maths quiz, joke teller and student records manager
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Three small terminal exercises: a ten question timed arithmetic quiz, a random joke teller, and a student marks manager backed by a flat text file."
)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// ten timed addition/subtraction questions, two attempts each
    Quiz {
        /// skip the menus and start straight away at this difficulty
        #[clap(short, long, value_enum)]
        difficulty: Option<Difficulty>,

        /// seconds allowed per attempt
        #[clap(short = 's', long)]
        seconds: Option<u32>,
    },
    /// show a random joke, then its punchline
    Jokes {
        /// jokes file, one `setup?punchline` per line (defaults to the built-in jokes)
        #[clap(short, long)]
        file: Option<PathBuf>,
    },
    /// view and edit student marks
    Students {
        /// student marks file (created on first save)
        #[clap(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug)]
pub enum App {
    Quiz(QuizApp),
    Jokes(JokesApp),
    Students(StudentsApp),
}

impl App {
    /// Loads whatever the chosen exercise needs before the terminal is taken over
    fn from_cli(cli: &Cli, config: &Config) -> Result<Self, Box<dyn Error>> {
        let app = match &cli.command {
            Command::Quiz {
                difficulty,
                seconds,
            } => {
                let countdown_secs = seconds.unwrap_or(config.countdown_secs()).max(1);
                let mut quiz = QuizApp::new(difficulty.unwrap_or(config.difficulty), countdown_secs);
                if let Some(difficulty) = difficulty {
                    quiz.start_quiz(*difficulty, Instant::now());
                }
                App::Quiz(quiz)
            }
            Command::Jokes { file } => {
                let path = file.as_ref().or(config.jokes_file.as_ref());
                App::Jokes(JokesApp::new(load_jokes(path.map(PathBuf::as_path))?))
            }
            Command::Students { file } => {
                let path = file.clone().unwrap_or_else(|| config.students_file());
                App::Students(StudentsApp::new(StudentStore::open(path)?))
            }
        };
        Ok(app)
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        match self {
            App::Quiz(quiz) => quiz.on_key(key, now),
            App::Jokes(jokes) => jokes.on_key(key),
            App::Students(students) => students.on_key(key),
        }
    }

    fn on_tick(&mut self, now: Instant) -> bool {
        match self {
            App::Quiz(quiz) => quiz.on_tick(now),
            App::Jokes(_) | App::Students(_) => false,
        }
    }

    fn should_quit(&self) -> bool {
        match self {
            App::Quiz(quiz) => quiz.should_quit(),
            App::Jokes(jokes) => jokes.should_quit(),
            App::Students(students) => students.should_quit(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging()?;

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    let mut app = App::from_cli(&cli, &config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let App::Quiz(quiz) = &app {
        if quiz.difficulty() != config.difficulty {
            config.difficulty = quiz.difficulty();
            if let Err(err) = config_store.save(&config) {
                tracing::warn!(%err, "could not save config");
            }
        }
    }

    outcome
}

/// Logs go to a file so the alternate screen stays clean; off unless SKILLFOLIO_LOG is set.
fn init_logging() -> io::Result<()> {
    let Ok(filter) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let Some(path) = AppDirs::log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.on_tick(Instant::now()) {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                // ctrl+c to quit
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                let now = Instant::now();
                app.on_key(key, now);
                if app.should_quit() {
                    break;
                }
                // Keys can arrive faster than the tick interval
                app.on_tick(now);
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillfolio::app::QuizScreen;

    #[test]
    fn test_cli_quiz_defaults() {
        let cli = Cli::parse_from(["skillfolio", "quiz"]);
        match cli.command {
            Command::Quiz {
                difficulty,
                seconds,
            } => {
                assert_eq!(difficulty, None);
                assert_eq!(seconds, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_quiz_difficulty() {
        let cli = Cli::parse_from(["skillfolio", "quiz", "-d", "advanced", "-s", "30"]);
        assert!(matches!(
            cli.command,
            Command::Quiz {
                difficulty: Some(Difficulty::Advanced),
                seconds: Some(30)
            }
        ));

        let cli = Cli::parse_from(["skillfolio", "quiz", "--difficulty", "moderate"]);
        assert!(matches!(
            cli.command,
            Command::Quiz {
                difficulty: Some(Difficulty::Moderate),
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["skillfolio", "quiz", "-d", "insane"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["skillfolio"]).is_err());
    }

    #[test]
    fn test_cli_file_flags() {
        let cli = Cli::parse_from(["skillfolio", "students", "--file", "marks.txt"]);
        assert!(matches!(
            cli.command,
            Command::Students { file: Some(ref p) } if p == &PathBuf::from("marks.txt")
        ));

        let cli = Cli::parse_from(["skillfolio", "jokes", "-f", "jokes.txt"]);
        assert!(matches!(cli.command, Command::Jokes { file: Some(_) }));
    }

    #[test]
    fn test_app_from_cli_quiz_with_difficulty_starts_immediately() {
        let cli = Cli::parse_from(["skillfolio", "quiz", "-d", "easy"]);
        let app = App::from_cli(&cli, &Config::default()).unwrap();

        match app {
            App::Quiz(quiz) => {
                assert_eq!(quiz.screen, QuizScreen::Question);
                assert_eq!(quiz.session().unwrap().current_round(), 1);
            }
            other => panic!("expected quiz app, got {other:?}"),
        }
    }

    #[test]
    fn test_app_from_cli_quiz_uses_config_difficulty() {
        let cli = Cli::parse_from(["skillfolio", "quiz"]);
        let config = Config {
            difficulty: Difficulty::Moderate,
            ..Config::default()
        };
        let app = App::from_cli(&cli, &config).unwrap();

        match app {
            App::Quiz(quiz) => {
                assert_eq!(quiz.screen, QuizScreen::Start { selected: 0 });
                assert_eq!(quiz.difficulty(), Difficulty::Moderate);
                assert!(quiz.session().is_none());
            }
            other => panic!("expected quiz app, got {other:?}"),
        }
    }

    #[test]
    fn test_app_from_cli_students_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.txt");
        let cli = Cli::parse_from(["skillfolio", "students", "--file", path.to_str().unwrap()]);

        match App::from_cli(&cli, &Config::default()).unwrap() {
            App::Students(students) => assert!(students.store().is_empty()),
            other => panic!("expected students app, got {other:?}"),
        }
    }

    #[test]
    fn test_app_from_cli_jokes_missing_file_errors() {
        let cli = Cli::parse_from(["skillfolio", "jokes", "--file", "/definitely/not/here.txt"]);
        assert!(App::from_cli(&cli, &Config::default()).is_err());
    }

    #[test]
    fn test_app_routes_keys_to_active_exercise() {
        let cli = Cli::parse_from(["skillfolio", "jokes"]);
        let mut app = App::from_cli(&cli, &Config::default()).unwrap();

        app.on_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), Instant::now());
        assert!(app.should_quit());
    }
}
