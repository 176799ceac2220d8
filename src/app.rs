use crate::config::Theme;
use crate::models::{AppState, KeyInput};
use crate::suggest::client::SuggestionService;
use crate::suggest::worker::{FetchResult, FetchWorker};
use crate::suggest::Session;
use crate::utils::{strings, tokenizer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Tokens sent with every suggestion request.
const QUERY_WORDS: usize = 2;

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub theme: Theme,
    pub session: Session,

    pub contexts: Vec<String>,
    pub context_idx: usize,

    /// Generation of the fetch whose result the panel is waiting for.
    pub pending: Option<u64>,

    pub terminal_width: u16,
    pub terminal_height: u16,

    worker: FetchWorker,
}

impl App {
    pub fn new(
        service: Arc<dyn SuggestionService>,
        contexts: Vec<String>,
        context_key: &str,
        theme: Theme,
    ) -> Result<Self> {
        let worker = FetchWorker::spawn(service).context("failed to start fetch worker")?;

        let mut contexts = contexts;
        let context_key = context_key.to_lowercase();
        let context_idx = match contexts.iter().position(|c| *c == context_key) {
            Some(idx) => idx,
            None => {
                contexts.push(context_key);
                contexts.len() - 1
            }
        };

        Ok(Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            theme,
            session: Session::new(),
            contexts,
            context_idx,
            pending: None,
            terminal_width: 80,
            terminal_height: 24,
            worker,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
    }

    pub fn context_key(&self) -> &str {
        &self.contexts[self.context_idx]
    }

    /// Moves the context selector to the next entry and refreshes suggestions.
    pub fn next_context(&mut self) {
        self.context_idx = (self.context_idx + 1) % self.contexts.len();
        info!(context = %self.context_key(), "context changed");
        self.on_text_changed();
    }

    pub fn on_key(&mut self, key: KeyInput) {
        match key {
            KeyInput::Tab => self.activate(0),
            KeyInput::CtrlDigit(d @ 2..=4) => self.activate(usize::from(d) - 1),
            KeyInput::Shift => self.session.toggle_shift(),
            KeyInput::CapsLock => self.session.toggle_caps(),
            KeyInput::NextContext => self.next_context(),
            KeyInput::Char(c) => {
                self.input.push(c);
                self.on_text_changed();
            }
            KeyInput::Enter => {
                self.input.push('\n');
                self.on_text_changed();
            }
            KeyInput::Backspace => {
                if self.input.pop().is_some() {
                    self.on_text_changed();
                }
            }
            KeyInput::CtrlDigit(_) | KeyInput::Other => {}
        }
    }

    /// Inserts candidate `index` into the field, if there is one.
    pub fn activate(&mut self, index: usize) {
        let Some(word) = self.session.panel.activate(index) else {
            return;
        };
        debug!(index, %word, "candidate activated");
        strings::append_word(&mut self.input, &word);
        self.on_text_changed();
    }

    /// Runs one tokenize -> fetch cycle for the current field content.
    pub fn on_text_changed(&mut self) {
        let Some(words) = tokenizer::trailing_words(&self.input, QUERY_WORDS) else {
            self.state = AppState::Idle;
            self.pending = None;
            self.worker.invalidate();
            self.session.show_nothing();
            return;
        };

        self.state = AppState::Suggesting;
        // no stale candidates while the request is in flight
        self.session.panel.clear();

        let last_words = [words[0].clone(), words[1].clone()];
        let generation = self
            .worker
            .submit(self.context_key().to_string(), last_words);
        self.pending = Some(generation);
    }

    /// Applies every fetch result that has arrived since the last tick.
    pub fn poll_suggestions(&mut self) {
        while let Some(result) = self.worker.try_recv() {
            self.on_fetch_result(result);
        }
    }

    pub fn on_fetch_result(&mut self, result: FetchResult) {
        if self.state != AppState::Suggesting || self.pending != Some(result.generation) {
            debug!(
                generation = result.generation,
                latest = self.worker.latest(),
                "discarding stale suggestions"
            );
            return;
        }
        self.pending = None;

        match result.words {
            Some(words) => {
                debug!(count = words.len(), "suggestions received");
                self.session.show_words(words);
            }
            None => self.session.show_nothing(),
        }
    }
}
