/// Sets the case of the first character, leaving the rest untouched.
///
/// Words that are empty or start with a non-alphabetic character come back
/// unchanged.
pub fn with_first_case(word: &str, upper: bool) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {
            let mut out = String::with_capacity(word.len());
            if upper {
                out.extend(first.to_uppercase());
            } else {
                out.extend(first.to_lowercase());
            }
            out.push_str(chars.as_str());
            out
        }
        _ => word.to_string(),
    }
}

pub fn with_full_case(word: &str, upper: bool) -> String {
    if upper {
        word.to_uppercase()
    } else {
        word.to_lowercase()
    }
}

pub fn ends_with_whitespace(text: &str) -> bool {
    text.chars().last().is_some_and(char::is_whitespace)
}

/// Appends `word` to `text`, separated by one space unless `text` already
/// ends in whitespace.
pub fn append_word(text: &mut String, word: &str) {
    if !ends_with_whitespace(text) {
        text.push(' ');
    }
    text.push_str(word);
}
