pub mod casing;
pub mod client;
pub mod panel;
pub mod worker;

use casing::CasingTracker;
use panel::SuggestionPanel;

/// Mutable suggestion state owned by the controller: the casing flags and
/// the rendered candidates they apply to.
#[derive(Debug, Default)]
pub struct Session {
    pub casing: CasingTracker,
    pub panel: SuggestionPanel,
}

impl Session {
    pub fn new() -> Self {
        Self {
            casing: CasingTracker::new(),
            panel: SuggestionPanel::new(),
        }
    }

    pub fn toggle_shift(&mut self) {
        self.casing.toggle_shift();
        self.panel.restyle(&self.casing);
    }

    pub fn toggle_caps(&mut self) {
        self.casing.toggle_caps();
        self.panel.restyle(&self.casing);
    }

    /// Shows a completed fetch and consumes the one-shot shift.
    pub fn show_words(&mut self, words: Vec<String>) {
        self.panel.render(words, &self.casing);
        self.panel.set_no_suggestions(self.panel.is_empty());
        self.casing.consume_shift();
    }

    pub fn show_nothing(&mut self) {
        self.panel.clear();
        self.panel.set_no_suggestions(true);
    }
}
