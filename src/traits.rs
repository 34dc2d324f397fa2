/// Scores a query against one candidate string.
///
/// Implement this to plug a different ranking into a
/// [`Crawler`](crate::Crawler). Scores are compared against the `threshold`
/// passed to [`Crawler::find`](crate::Crawler::find) and sorted by value, so a
/// higher score must mean a better match.
///
/// # Example
///
/// ```rust
/// use grover::Matcher;
///
/// struct PrefixMatcher;
///
/// impl Matcher for PrefixMatcher {
///     fn score(&self, query: &str, candidate: &str) -> f64 {
///         if candidate.starts_with(query) { 1.0 } else { 0.0 }
///     }
/// }
/// ```
pub trait Matcher {
    /// Confidence that `query` matches `candidate`. Never negative.
    fn score(&self, query: &str, candidate: &str) -> f64;
}
