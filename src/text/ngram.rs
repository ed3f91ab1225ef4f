/// Longest span of tokens that becomes an n-gram.
pub const MAX_NGRAM_LEN: usize = 3;

/// Emits every contiguous window of 1, 2 and 3 tokens, joined by a single space.
///
/// Output is ordered by window length first, then by position, so for
/// `["a", "b", "c"]` the result is `a, b, c, a b, b c, a b c`. Windows never
/// run past the end of the sequence and repeated spans are kept, one entry
/// per occurrence.
pub fn generate_ngrams<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut ngrams = Vec::with_capacity(ngram_count(tokens.len()));

    for n in 1..=MAX_NGRAM_LEN {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            let parts: Vec<&str> = window.iter().map(AsRef::as_ref).collect();
            ngrams.push(parts.join(" "));
        }
    }

    ngrams
}

/// Number of n-grams produced for `len` tokens: L + (L-1) + (L-2), floored at zero.
pub fn ngram_count(len: usize) -> usize {
    (1..=MAX_NGRAM_LEN).map(|n| len.saturating_sub(n - 1)).sum()
}
