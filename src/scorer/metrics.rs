/// Character-level agreement between a known plaintext and a recovered
/// one, over the positions both strings share, divided by the length of
/// `expected`. Letters compare case-insensitively.
pub fn accuracy(expected: &str, actual: &str) -> f64 {
    let total = expected.chars().count();
    if total == 0 {
        return if actual.is_empty() { 1.0 } else { 0.0 };
    }
    let matching = expected
        .chars()
        .zip(actual.chars())
        .filter(|(a, b)| a.eq_ignore_ascii_case(b))
        .count();
    matching as f64 / total as f64
}
