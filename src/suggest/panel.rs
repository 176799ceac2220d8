use super::casing::CasingTracker;

/// Shortcut labels for the primary candidates, by position.
pub const PRIMARY_LABELS: [&str; 4] = ["TAB", "CTRL+2", "CTRL+3", "CTRL+4"];
pub const PRIMARY_SLOTS: usize = PRIMARY_LABELS.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCandidate {
    pub index: usize,
    pub insert_value: String,
    pub display_text: String,
}

impl RenderedCandidate {
    fn new(index: usize, word: String) -> Self {
        let mut candidate = Self {
            index,
            insert_value: word,
            display_text: String::new(),
        };
        candidate.refresh_display();
        candidate
    }

    pub fn shortcut(&self) -> Option<&'static str> {
        PRIMARY_LABELS.get(self.index).copied()
    }

    pub fn is_primary(&self) -> bool {
        self.index < PRIMARY_SLOTS
    }

    fn set_value(&mut self, value: String) {
        self.insert_value = value;
        self.refresh_display();
    }

    fn refresh_display(&mut self) {
        self.display_text = match self.shortcut() {
            Some(label) => format!("{} {}", self.insert_value, label),
            None => self.insert_value.clone(),
        };
    }
}

/// Candidate list split into the shortcut-bound primary row and the
/// pointer-only overflow row, plus the "no suggestions" indicator.
#[derive(Debug, Clone)]
pub struct SuggestionPanel {
    candidates: Vec<RenderedCandidate>,
    overflow_visible: bool,
    no_suggestions: bool,
}

impl Default for SuggestionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            overflow_visible: false,
            no_suggestions: true,
        }
    }

    /// Drops every candidate and hides the overflow row.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.overflow_visible = false;
    }

    /// Rebuilds the panel from a ranked word list.
    pub fn render(&mut self, words: Vec<String>, casing: &CasingTracker) {
        self.clear();
        self.overflow_visible = words.len() > PRIMARY_SLOTS;
        self.candidates = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| RenderedCandidate::new(i, word))
            .collect();

        // suggestions can arrive while caps mode is already engaged
        if casing.caps_active() {
            for candidate in &mut self.candidates {
                let value = casing.apply_caps(&candidate.insert_value);
                candidate.set_value(value);
            }
        }
    }

    /// Re-applies the current casing transform to every displayed candidate.
    pub fn restyle(&mut self, casing: &CasingTracker) {
        for candidate in &mut self.candidates {
            let value = casing.apply(&candidate.insert_value);
            candidate.set_value(value);
        }
    }

    pub fn set_no_suggestions(&mut self, visible: bool) {
        self.no_suggestions = visible;
    }

    pub fn no_suggestions(&self) -> bool {
        self.no_suggestions
    }

    pub fn overflow_visible(&self) -> bool {
        self.overflow_visible
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidate(&self, index: usize) -> Option<&RenderedCandidate> {
        self.candidates.get(index)
    }

    pub fn primary(&self) -> &[RenderedCandidate] {
        &self.candidates[..self.candidates.len().min(PRIMARY_SLOTS)]
    }

    pub fn secondary(&self) -> &[RenderedCandidate] {
        &self.candidates[self.candidates.len().min(PRIMARY_SLOTS)..]
    }

    /// The text to insert when candidate `index` is activated, by click or
    /// shortcut alike.
    pub fn activate(&self, index: usize) -> Option<String> {
        self.candidate(index).map(|c| c.insert_value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn six_words_split_four_primary_two_overflow() {
        let mut panel = SuggestionPanel::new();
        panel.render(
            words(&["the", "a", "my", "thy", "his", "her"]),
            &CasingTracker::new(),
        );

        assert_eq!(panel.primary().len(), 4);
        assert_eq!(panel.secondary().len(), 2);
        assert!(panel.overflow_visible());

        let labels: Vec<_> = panel.primary().iter().map(|c| c.shortcut()).collect();
        assert_eq!(
            labels,
            vec![Some("TAB"), Some("CTRL+2"), Some("CTRL+3"), Some("CTRL+4")]
        );
        assert_eq!(panel.primary()[1].display_text, "a CTRL+2");
        assert!(panel.secondary().iter().all(|c| c.shortcut().is_none()));
        assert_eq!(panel.secondary()[0].display_text, "his");
    }

    #[test]
    fn short_lists_hide_and_empty_overflow() {
        let mut panel = SuggestionPanel::new();
        panel.render(words(&["a", "b", "c", "d", "e"]), &CasingTracker::new());
        assert!(panel.overflow_visible());

        panel.render(words(&["a", "b", "c", "d"]), &CasingTracker::new());
        assert!(!panel.overflow_visible());
        assert!(panel.secondary().is_empty());
        assert_eq!(panel.len(), 4);
    }

    #[test]
    fn render_replaces_previous_batch() {
        let mut panel = SuggestionPanel::new();
        panel.render(words(&["old", "older"]), &CasingTracker::new());
        panel.render(words(&["new"]), &CasingTracker::new());
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.activate(0).as_deref(), Some("new"));
        assert_eq!(panel.activate(1), None);
    }

    #[test]
    fn fresh_batch_picks_up_engaged_caps() {
        let mut casing = CasingTracker::new();
        casing.toggle_caps();
        let mut panel = SuggestionPanel::new();
        panel.render(words(&["love", "hate"]), &casing);
        assert_eq!(panel.activate(0).as_deref(), Some("LOVE"));
        assert_eq!(panel.candidate(1).map(|c| c.display_text.as_str()), Some("HATE CTRL+2"));
    }

    #[test]
    fn fresh_batch_ignores_shift() {
        let mut casing = CasingTracker::new();
        casing.toggle_shift();
        let mut panel = SuggestionPanel::new();
        panel.render(words(&["apple"]), &casing);
        assert_eq!(panel.activate(0).as_deref(), Some("apple"));
    }

    #[test]
    fn restyle_updates_insert_and_display_values() {
        let mut casing = CasingTracker::new();
        let mut panel = SuggestionPanel::new();
        panel.render(words(&["apple", "pear", "fig", "kiwi", "lime"]), &casing);

        casing.toggle_shift();
        panel.restyle(&casing);
        assert_eq!(panel.activate(0).as_deref(), Some("Apple"));
        assert_eq!(panel.candidate(0).map(|c| c.display_text.as_str()), Some("Apple TAB"));
        assert_eq!(panel.candidate(4).map(|c| c.display_text.as_str()), Some("Lime"));

        casing.toggle_caps();
        panel.restyle(&casing);
        assert!(panel.primary().iter().all(|c| c.insert_value == c.insert_value.to_uppercase()));
        assert_eq!(panel.activate(4).as_deref(), Some("LIME"));

        casing.toggle_caps();
        panel.restyle(&casing);
        assert_eq!(panel.activate(0).as_deref(), Some("apple"));
        assert_eq!(panel.activate(4).as_deref(), Some("lime"));
    }
}
