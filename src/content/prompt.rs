use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::question::PromptStatement;

// Matches `a) `, `(b) `, `c. ` at the start of the text or after whitespace.
static STATEMENT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)\(?([a-dA-D])[.)]\s+").expect("STATEMENT_MARKER is a valid regex pattern")
});

struct Marker {
    start: usize,
    end: usize,
    label: char,
}

/// Splits a prompt into its stem and lettered sub-statements.
///
/// Only a run of markers starting at `a` and continuing with consecutive
/// letters counts; a lone marker or an out-of-order letter stays part of the
/// surrounding text. Prompts without such a run come back whole as the stem.
pub fn split_statements(prompt: &str) -> (String, Vec<PromptStatement>) {
    let mut chain: Vec<Marker> = Vec::new();

    for caps in STATEMENT_MARKER.captures_iter(prompt) {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(letter) = label.as_str().chars().next() else {
            continue;
        };

        let expected = (b'a' + chain.len() as u8) as char;
        if letter.to_ascii_lowercase() == expected {
            chain.push(Marker {
                start: whole.start(),
                end: whole.end(),
                label: letter,
            });
        }
    }

    if chain.len() < 2 {
        return (prompt.trim().to_string(), Vec::new());
    }

    let stem = prompt[..chain[0].start].trim().to_string();
    let statements = chain
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let text_end = chain.get(i + 1).map_or(prompt.len(), |next| next.start);
            PromptStatement {
                label: marker.label.to_string(),
                text: prompt[marker.end..text_end].trim().to_string(),
            }
        })
        .collect();

    (stem, statements)
}
