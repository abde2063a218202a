/// Collapse an employer name to the canonical form used for directory keys:
/// `&` becomes `AND`, punctuation becomes whitespace, runs of whitespace
/// collapse to one space, and the result is upper-cased.
pub(crate) fn normalize_employer_name(value: &str) -> String {
    let expanded = value.trim().replace('&', "AND");
    let cleaned = expanded
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>();
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}
