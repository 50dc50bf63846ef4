//! Field validation for write requests.
//!
//! Rules in [`rules`] are pure functions over request values. The per-entity
//! forms compose them and collect every violation into [`ValidationErrors`]
//! instead of stopping at the first one.

pub mod item;
pub mod moves;
pub mod pokemon;
pub mod rules;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::params;

pub use item::{ItemDraft, ItemForm, ValidItem};
pub use pokemon::{PokemonDraft, PokemonForm, ValidPokemon};

/// Violations keyed by internal attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record every message yielded by `messages`; `Option<String>` rule
    /// results can be passed directly.
    pub fn add_all<I>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = String>,
    {
        for message in messages {
            self.add(field, message);
        }
    }

    /// Record the error side of a parse, passing the value through.
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        result.map_err(|msg| self.add(field, msg)).ok()
    }

    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(value)` when nothing was recorded and the value was fully built.
    ///
    /// # Errors
    ///
    /// Returns `self` when any violation was recorded.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        value.ok_or(self)
    }

    /// The same errors keyed by external (camelCase) field names.
    pub fn external(&self) -> BTreeMap<String, Vec<String>> {
        self.0
            .iter()
            .map(|(field, messages)| (params::external_name(field), messages.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_multiple_messages_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "can't be blank");
        errors.add("name", "is too short (minimum is 3 characters)");
        errors.add_all("number", None);

        assert_eq!(errors.get("name").len(), 2);
        assert!(errors.get("number").is_empty());
    }

    #[test]
    fn test_external_keys() {
        let mut errors = ValidationErrors::new();
        errors.add("poke_type", "'x' is not a valid Pokemon type");
        errors.add("image_url", "can't be blank");

        let external = errors.external();

        assert!(external.contains_key("type"));
        assert!(external.contains_key("imageUrl"));
        assert!(!external.contains_key("poke_type"));
    }

    #[test]
    fn test_finish() {
        assert_eq!(ValidationErrors::new().finish(Some(5)), Ok(5));

        let errors = ValidationErrors::single("name", "can't be blank");
        assert!(errors.finish(Some(5)).is_err());
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::single("name", "one");
        a.merge(ValidationErrors::single("name", "two"));
        assert_eq!(a.get("name"), ["one".to_string(), "two".to_string()]);
    }
}
