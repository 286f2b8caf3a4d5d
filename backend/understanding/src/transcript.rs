//! Transcript cleanup before parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Non-speech markers emitted by whisper, e.g. `[BLANK_AUDIO]` or `(music)`.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());

const TRAILING_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':', '…'];

/// Strip non-speech markers, surrounding whitespace and trailing sentence
/// punctuation. Returns `None` when nothing speakable is left.
pub fn clean_transcript(raw: &str) -> Option<String> {
    let without_markers = MARKER_RE.replace_all(raw, " ");
    let text = without_markers
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.trim_end_matches(TRAILING_PUNCTUATION).trim_end();
    (!text.is_empty()).then(|| text.to_string())
}
