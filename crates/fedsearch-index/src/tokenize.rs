/// Lowercases, splits on whitespace, trims surrounding punctuation and
/// drops tokens too short to carry signal.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|word| word.len() > 2)
        .collect()
}
