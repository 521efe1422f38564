use crossterm::event::{KeyCode, KeyEvent};
use rand::{rngs::ThreadRng, Rng};

use crate::jokes::{Joke, JokeTeller};

#[derive(Debug)]
pub struct JokesApp<R: Rng = ThreadRng> {
    pub teller: JokeTeller<R>,
    status: Option<&'static str>,
    should_quit: bool,
}

impl JokesApp<ThreadRng> {
    pub fn new(jokes: Vec<Joke>) -> Self {
        Self::with_teller(JokeTeller::new(jokes))
    }
}

impl<R: Rng> JokesApp<R> {
    pub fn with_teller(teller: JokeTeller<R>) -> Self {
        Self {
            teller,
            status: None,
            should_quit: false,
        }
    }

    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Char('j') | KeyCode::Char('n') | KeyCode::Enter => {
                if self.teller.new_joke().is_none() {
                    self.status = Some("No jokes loaded.");
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.teller.show_punchline();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }
}
