/// Splits a raw query into lowercase, whitespace-delimited tokens.
///
/// Runs of whitespace count as a single separator and empty tokens are
/// dropped, so `"  Rust   Book "` yields `["rust", "book"]`. Punctuation is
/// kept: `"c++"` stays a token of its own.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
