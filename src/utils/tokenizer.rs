/// Splits free text into word tokens.
///
/// A token is one or more word characters or hyphens, optionally followed by
/// an apostrophe and one or more word characters (`well-known`, `don't`).
/// Matches are scanned left to right and never overlap. Everything else is a
/// separator.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if !is_stem_char(c) {
            chars.next();
            continue;
        }

        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if !is_stem_char(c) {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }

        // apostrophe suffix only counts when a word character follows it
        if let Some(&(quote_idx, '\'')) = chars.peek() {
            let suffix_start = quote_idx + 1;
            let suffix_len = text[suffix_start..]
                .char_indices()
                .take_while(|&(_, c)| is_word_char(c))
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);

            if suffix_len > 0 {
                end = suffix_start + suffix_len;
                while chars.peek().is_some_and(|&(i, _)| i < end) {
                    chars.next();
                }
            }
        }

        tokens.push(&text[start..end]);
    }

    tokens
}

/// The last `n` tokens of `text`, lower-cased, or `None` when fewer exist.
pub fn trailing_words(text: &str, n: usize) -> Option<Vec<String>> {
    let tokens = tokenize(text);
    if tokens.len() < n {
        return None;
    }
    Some(
        tokens[tokens.len() - n..]
            .iter()
            .map(|w| w.to_lowercase())
            .collect(),
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_stem_char(c: char) -> bool {
    is_word_char(c) || c == '-'
}
