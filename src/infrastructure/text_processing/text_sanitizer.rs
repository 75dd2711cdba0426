use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{00AD}\u{200B}-\u{200D}\u{2060}\u{FEFF}]").unwrap());

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

/// Normalizes a block of extracted document text: NFKC folding, removal of
/// zero-width and soft-hyphen characters, collapsed runs of spaces and tabs,
/// and no blank or padded lines.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let visible = INVISIBLE.replace_all(&normalized, "");
    let collapsed = HORIZONTAL_WHITESPACE.replace_all(&visible, " ");

    collapsed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
