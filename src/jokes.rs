use include_dir::{include_dir, Dir};
use rand::{rngs::ThreadRng, Rng};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

static ASSETS_DIR: Dir = include_dir!("src/assets");

const BUILTIN_JOKES: &str = "jokes.txt";
pub const PLACEHOLDER_PROMPT: &str = "Press j for a joke!";

#[derive(Debug, Error)]
pub enum JokeError {
    #[error("could not read jokes from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("built-in jokes file is missing")]
    MissingBuiltin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    /// Question part, including the trailing `?`
    pub setup: String,
    pub punchline: String,
}

/// Every line with a `?` is split at the first one. Other lines are skipped.
pub fn parse_jokes(text: &str) -> Vec<Joke> {
    text.lines()
        .filter_map(|line| line.split_once('?'))
        .map(|(setup, punchline)| Joke {
            setup: format!("{setup}?"),
            punchline: punchline.trim().to_string(),
        })
        .collect()
}

pub fn load_jokes(path: Option<&Path>) -> Result<Vec<Joke>, JokeError> {
    let jokes = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| JokeError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_jokes(&text)
        }
        None => {
            let text = ASSETS_DIR
                .get_file(BUILTIN_JOKES)
                .and_then(|file| file.contents_utf8())
                .ok_or(JokeError::MissingBuiltin)?;
            parse_jokes(text)
        }
    };

    info!(count = jokes.len(), source = ?path, "jokes loaded");
    Ok(jokes)
}

/// Picks jokes at random and keeps the punchline hidden until asked
#[derive(Debug)]
pub struct JokeTeller<R: Rng = ThreadRng> {
    jokes: Vec<Joke>,
    current: Option<usize>,
    punchline_visible: bool,
    rng: R,
}

impl JokeTeller<ThreadRng> {
    pub fn new(jokes: Vec<Joke>) -> Self {
        Self::with_rng(jokes, rand::thread_rng())
    }
}

impl<R: Rng> JokeTeller<R> {
    pub fn with_rng(jokes: Vec<Joke>, rng: R) -> Self {
        Self {
            jokes,
            current: None,
            punchline_visible: false,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    pub fn current(&self) -> Option<&Joke> {
        self.current.and_then(|idx| self.jokes.get(idx))
    }

    pub fn new_joke(&mut self) -> Option<&Joke> {
        let len = self.jokes.len();
        self.current = (len > 0).then(|| self.rng.gen_range(0..len));
        self.punchline_visible = false;
        debug!(joke = ?self.current, "new joke");
        self.current()
    }

    /// Reveals the punchline. Returns false when there is nothing to show.
    pub fn show_punchline(&mut self) -> bool {
        let has_punchline = self
            .current()
            .is_some_and(|joke| !joke.punchline.is_empty());
        if has_punchline {
            self.punchline_visible = true;
        }
        has_punchline
    }

    pub fn setup_text(&self) -> &str {
        self.current()
            .map(|joke| joke.setup.as_str())
            .unwrap_or(PLACEHOLDER_PROMPT)
    }

    pub fn punchline_text(&self) -> Option<&str> {
        if !self.punchline_visible {
            return None;
        }
        self.current().map(|joke| joke.punchline.as_str())
    }
}
