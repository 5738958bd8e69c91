//! Script preparation for speech synthesis
//!
//! Saved scripts carry a metadata header and footer that must not be read
//! aloud, and the speech service caps the length of a single request. This
//! module strips the metadata and splits the remaining text into parts.

use crate::prompts::{SCRIPT_FOOTER_PREFIX, SCRIPT_HEADER};

/// Remove the metadata header, footer, and blank lines from a saved script
///
/// Lines are trimmed. The footer is everything from the last `---` line
/// that is directly followed by a `Script generated` line. Any other `---`
/// separator lines are dropped as well.
///
/// # Examples
///
/// ```
/// use blogcast::pipeline::chunking::clean_script_for_tts;
/// use blogcast::prompts::format_script;
///
/// let saved = format_script("Welcome!\n\nToday we talk Rust.", "gpt-4o");
/// assert_eq!(clean_script_for_tts(&saved), "Welcome!\nToday we talk Rust.");
/// ```
pub fn clean_script_for_tts(script: &str) -> String {
    let lines: Vec<&str> = script.lines().map(str::trim).collect();

    let footer_start = lines
        .windows(2)
        .rposition(|w| w[0] == "---" && w[1].starts_with(SCRIPT_FOOTER_PREFIX));
    let body = match footer_start {
        Some(i) => &lines[..i],
        None => &lines[..],
    };

    body.iter()
        .filter(|line| !line.is_empty() && **line != SCRIPT_HEADER && !line.starts_with("---"))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split `text` into parts of at most `max_chars` characters
///
/// Lines are kept whole where possible. Longer lines are broken at sentence
/// ends, then at whitespace, and as a last resort mid-word. Pieces are
/// packed greedily, so the number of parts is small and their order follows
/// the text. Empty input yields no parts.
///
/// # Examples
///
/// ```
/// use blogcast::pipeline::chunking::split_into_parts;
///
/// let parts = split_into_parts("One. Two. Three.", 10);
/// assert_eq!(parts, vec!["One. Two.", "Three."]);
/// ```
pub fn split_into_parts(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);

    let mut pieces: Vec<(String, &'static str)> = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if char_len(line) <= max_chars {
            pieces.push((line.to_string(), "\n"));
            continue;
        }
        for (i, piece) in split_long_line(line, max_chars).into_iter().enumerate() {
            pieces.push((piece, if i == 0 { "\n" } else { " " }));
        }
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    for (piece, sep) in pieces {
        if current.is_empty() {
            current = piece;
        } else if char_len(&current) + sep.len() + char_len(&piece) <= max_chars {
            current.push_str(sep);
            current.push_str(&piece);
        } else {
            parts.push(std::mem::take(&mut current));
            current = piece;
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Break one over-long line into pieces no longer than `max_chars`
fn split_long_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    for sentence in split_sentences(line) {
        if char_len(&sentence) <= max_chars {
            out.push(sentence);
            continue;
        }
        for word in sentence.split_whitespace() {
            if char_len(word) <= max_chars {
                out.push(word.to_string());
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            out.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
        }
    }
    out
}

/// Split after `.`, `!` or `?` when followed by whitespace
fn split_sentences(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().map(|n| n.is_whitespace()).unwrap_or(false);
        if at_boundary {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}
