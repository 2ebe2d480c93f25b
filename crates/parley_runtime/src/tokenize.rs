//! Splitting input lines into command tokens.

/// Prefix accepted, and ignored, before a root command alias.
pub const COMMAND_PREFIX: char = '/';

/// Splits a line at whitespace.
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Splits a partially typed line. A line ending in whitespace gets a trailing
/// empty token, which stands for the token about to be typed.
#[must_use]
pub fn tokenize_partial(line: &str) -> Vec<String> {
    let mut tokens = tokenize(line);
    if line.ends_with(char::is_whitespace) && !tokens.is_empty() {
        tokens.push(String::new());
    }
    tokens
}

/// Splits tokens into the root alias, without its prefix, and the arguments.
#[must_use]
pub fn split_command(tokens: &[String]) -> Option<(&str, &[String])> {
    let (first, rest) = tokens.split_first()?;
    let alias = first.strip_prefix(COMMAND_PREFIX).unwrap_or(first);
    Some((alias, rest))
}
