const PREFIX_CHARS: usize = 6;
const SUFFIX_CHARS: usize = 4;

/// Shortens an address for display: the first six and last four characters
/// joined by an ellipsis. The input is not validated; an absent or empty
/// address renders as an empty string.
pub fn format_short(address: Option<&str>) -> String {
    let address = match address {
        Some(a) if !a.is_empty() => a,
        _ => return String::new(),
    };

    let chars: Vec<char> = address.chars().collect();
    let prefix: String = chars.iter().take(PREFIX_CHARS).collect();
    let suffix: String = chars[chars.len().saturating_sub(SUFFIX_CHARS)..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
