use serde_json::{Map, Value};

use super::{ValidationErrors, rules};
use crate::entities::item;

/// Raw item attributes from a permitted request.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub pokemon_id: Option<Value>,
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub happiness: Option<Value>,
    pub image_url: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub pokemon_id: Option<i32>,
    pub name: Option<String>,
    pub price: Option<i32>,
    pub happiness: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidItem {
    pub pokemon_id: i32,
    pub name: String,
    pub price: i32,
    pub happiness: i32,
    pub image_url: String,
}

impl ItemForm {
    pub fn from_params(params: &Map<String, Value>) -> Self {
        let field = |key: &str| params.get(key).cloned();
        Self {
            pokemon_id: field("pokemon_id"),
            name: field("name"),
            price: field("price"),
            happiness: field("happiness"),
            image_url: field("image_url"),
        }
    }

    fn merged_onto(&self, current: &item::Model) -> Self {
        Self {
            pokemon_id: self
                .pokemon_id
                .clone()
                .or_else(|| Some(current.pokemon_id.into())),
            name: self.name.clone().or_else(|| Some(current.name.clone().into())),
            price: self.price.clone().or_else(|| Some(current.price.into())),
            happiness: self
                .happiness
                .clone()
                .or_else(|| Some(current.happiness.into())),
            image_url: self
                .image_url
                .clone()
                .or_else(|| Some(current.image_url.clone().into())),
        }
    }

    /// Validate a new item or changes to a stored one. The owning pokemon's
    /// existence is checked by the caller.
    pub fn validate(&self, current: Option<&item::Model>) -> (ItemDraft, ValidationErrors) {
        let form = current.map_or_else(|| self.clone(), |c| self.merged_onto(c));
        let mut errors = ValidationErrors::new();

        let pokemon_id = form
            .pokemon_id
            .as_ref()
            .and_then(|v| rules::integer(Some(v)).ok());
        if pokemon_id.is_none() {
            errors.add("pokemon", "must exist");
        }

        let name = errors.check("name", rules::string(form.name.as_ref()));
        if let Some(name) = &name {
            errors.add_all("name", rules::length(name, 1, 254));
        }

        let price = errors.check("price", rules::integer(form.price.as_ref()));
        if let Some(n) = price {
            errors.add_all("price", rules::greater_than_or_equal_to(n, 0));
        }

        let happiness = errors.check("happiness", rules::integer(form.happiness.as_ref()));
        let image_url = errors.check("image_url", rules::string(form.image_url.as_ref()));

        let draft = ItemDraft {
            pokemon_id,
            name: name.filter(|_| errors.get("name").is_empty()),
            price: price.filter(|_| errors.get("price").is_empty()),
            happiness,
            image_url,
        };

        (draft, errors)
    }
}

impl ItemDraft {
    pub fn into_valid(self) -> Option<ValidItem> {
        Some(ValidItem {
            pokemon_id: self.pokemon_id?,
            name: self.name?,
            price: self.price?,
            happiness: self.happiness?,
            image_url: self.image_url?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_item() {
        let form = ItemForm {
            pokemon_id: Some(json!(3)),
            name: Some(json!("Oran Berry")),
            price: Some(json!("10")),
            happiness: Some(json!(-5)),
            image_url: Some(json!("pokemon_berry.svg")),
        };

        let (draft, errors) = form.validate(None);

        assert!(errors.is_empty(), "{errors:?}");
        let valid = draft.into_valid();
        assert_eq!(valid.map(|i| (i.price, i.happiness)), Some((10, -5)));
    }

    #[test]
    fn test_invalid_item() {
        let form = ItemForm {
            pokemon_id: None,
            name: Some(json!("x".repeat(255))),
            price: Some(json!(-1)),
            happiness: Some(json!("very")),
            image_url: None,
        };

        let (draft, errors) = form.validate(None);

        assert_eq!(errors.get("pokemon"), ["must exist"]);
        assert_eq!(errors.get("name"), ["is too long (maximum is 254 characters)"]);
        assert_eq!(
            errors.get("price"),
            ["'-1' must be greater than or equal to 0"]
        );
        assert_eq!(errors.get("happiness"), ["'very' is not a number"]);
        assert_eq!(errors.get("image_url"), ["can't be blank"]);
        assert!(draft.into_valid().is_none());
    }

    #[test]
    fn test_partial_update() {
        let now = chrono::Utc::now().fixed_offset();
        let current = item::Model {
            id: 1,
            pokemon_id: 2,
            name: "Potion".to_string(),
            price: 20,
            happiness: 5,
            image_url: "pokemon_potion.svg".to_string(),
            created_at: now,
            updated_at: now,
        };
        let form = ItemForm {
            price: Some(json!(25)),
            ..ItemForm::default()
        };

        let (draft, errors) = form.validate(Some(&current));

        assert!(errors.is_empty(), "{errors:?}");
        let valid = draft.into_valid();
        assert_eq!(valid.as_ref().map(|i| i.price), Some(25));
        assert_eq!(valid.map(|i| i.name), Some("Potion".to_string()));
    }
}
