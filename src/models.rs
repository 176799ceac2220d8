use serde::{Deserialize, Serialize};

/// Controller state: `Idle` until at least two tokens are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Suggesting,
}

/// Terminal-neutral key events the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    Tab,
    /// Ctrl+2 / Ctrl+3 / Ctrl+4 carry the digit.
    CtrlDigit(u8),
    Shift,
    CapsLock,
    NextContext,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    pub key: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestionResponse {
    pub success: bool,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub words: bool,
    pub num: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub error: Option<String>,
}
