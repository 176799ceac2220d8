use crate::utils::strings;

/// Which toggle fired most recently, and so which transform `apply` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasingMode {
    #[default]
    None,
    Shift,
    Caps,
}

/// Emulated Shift / CapsLock state, independent of the terminal's own
/// modifier state.
#[derive(Debug, Clone, Default)]
pub struct CasingTracker {
    shift_active: bool,
    caps_active: bool,
    mode: CasingMode,
}

impl CasingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift_active(&self) -> bool {
        self.shift_active
    }

    pub fn caps_active(&self) -> bool {
        self.caps_active
    }

    pub fn mode(&self) -> CasingMode {
        self.mode
    }

    /// Callers must re-render the displayed candidates afterwards. Shift only
    /// restyles the batch already on screen; fresh batches get caps alone.
    pub fn toggle_shift(&mut self) {
        self.shift_active = !self.shift_active;
        self.mode = CasingMode::Shift;
    }

    /// Callers must re-render the displayed candidates afterwards.
    pub fn toggle_caps(&mut self) {
        self.caps_active = !self.caps_active;
        self.mode = CasingMode::Caps;
    }

    pub fn apply(&self, word: &str) -> String {
        match self.mode {
            CasingMode::None => word.to_string(),
            CasingMode::Shift => strings::with_first_case(word, self.shift_active),
            CasingMode::Caps => strings::with_full_case(word, self.caps_active),
        }
    }

    /// Caps transform regardless of the current mode, used on fresh batches.
    pub fn apply_caps(&self, word: &str) -> String {
        strings::with_full_case(word, self.caps_active)
    }

    /// One-shot reset after a completed suggestion cycle. Caps persists.
    pub fn consume_shift(&mut self) {
        self.shift_active = false;
        if self.mode == CasingMode::Shift {
            self.mode = if self.caps_active {
                CasingMode::Caps
            } else {
                CasingMode::None
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_and_leaves_words_alone() {
        let casing = CasingTracker::new();
        assert!(!casing.shift_active());
        assert!(!casing.caps_active());
        assert_eq!(casing.apply("apple"), "apple");
    }

    #[test]
    fn shift_toggle_flips_first_letter() {
        let mut casing = CasingTracker::new();
        casing.toggle_shift();
        assert_eq!(casing.apply("apple"), "Apple");
        casing.toggle_shift();
        assert_eq!(casing.apply("Apple"), "apple");
    }

    #[test]
    fn caps_toggle_changes_whole_word() {
        let mut casing = CasingTracker::new();
        casing.toggle_caps();
        assert_eq!(casing.apply("apple"), "APPLE");
        casing.toggle_caps();
        assert_eq!(casing.apply("APPLE"), "apple");
    }

    #[test]
    fn last_toggle_decides_the_transform() {
        let mut casing = CasingTracker::new();
        casing.toggle_caps();
        casing.toggle_shift();
        // shift mode only touches the first letter even though caps is on
        assert_eq!(casing.apply("apple"), "Apple");
        casing.toggle_caps();
        assert_eq!(casing.apply("Apple"), "apple");
    }

    #[test]
    fn consuming_shift_keeps_caps() {
        let mut casing = CasingTracker::new();
        casing.toggle_caps();
        casing.toggle_shift();
        casing.consume_shift();
        assert!(!casing.shift_active());
        assert!(casing.caps_active());
        assert_eq!(casing.mode(), CasingMode::Caps);

        let mut casing = CasingTracker::new();
        casing.toggle_shift();
        casing.consume_shift();
        assert_eq!(casing.mode(), CasingMode::None);
        assert_eq!(casing.apply("apple"), "apple");
    }

    #[test]
    fn transforms_tolerate_odd_words() {
        let mut casing = CasingTracker::new();
        casing.toggle_shift();
        assert_eq!(casing.apply(""), "");
        assert_eq!(casing.apply("42nd"), "42nd");
        casing.toggle_caps();
        assert_eq!(casing.apply(""), "");
    }
}
