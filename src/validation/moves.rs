use super::rules;

/// Violations for a move name, each naming the rejected value.
pub fn name_violations(name: &str) -> Vec<String> {
    if name.trim().is_empty() {
        return vec![rules::BLANK.to_string()];
    }
    rules::length(name, 1, 254)
        .map(|msg| format!("'{name}' {msg}"))
        .into_iter()
        .collect()
}
