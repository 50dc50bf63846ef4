use serde_json::{Map, Value};

use super::{ValidationErrors, rules};
use crate::entities::{PokeType, pokemon};

/// Raw pokemon attributes from a permitted request, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct PokemonForm {
    pub number: Option<Value>,
    pub name: Option<Value>,
    pub attack: Option<Value>,
    pub defense: Option<Value>,
    pub poke_type: Option<Value>,
    pub image_url: Option<Value>,
    pub captured: Option<Value>,
    pub moves: Option<Value>,
}

/// Typed attributes; `None` marks a field that failed validation.
#[derive(Debug, Clone, Default)]
pub struct PokemonDraft {
    pub number: Option<i32>,
    pub name: Option<String>,
    pub attack: Option<i32>,
    pub defense: Option<i32>,
    pub poke_type: Option<PokeType>,
    pub image_url: Option<String>,
    pub captured: Option<bool>,
    /// `None` on update leaves the move set alone.
    pub moves: Option<Vec<String>>,
}

/// Attributes ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPokemon {
    pub number: i32,
    pub name: String,
    pub attack: i32,
    pub defense: i32,
    pub poke_type: PokeType,
    pub image_url: String,
    pub captured: bool,
}

impl PokemonForm {
    /// Build a form from permitted, snake_cased params.
    pub fn from_params(params: &Map<String, Value>) -> Self {
        let field = |key: &str| params.get(key).cloned();
        Self {
            number: field("number"),
            name: field("name"),
            attack: field("attack"),
            defense: field("defense"),
            poke_type: field("poke_type"),
            image_url: field("image_url"),
            captured: field("captured"),
            moves: field("moves"),
        }
    }

    /// Overlay the submitted fields onto a stored pokemon.
    fn merged_onto(&self, current: &pokemon::Model) -> Self {
        Self {
            number: self.number.clone().or_else(|| Some(current.number.into())),
            name: self.name.clone().or_else(|| Some(current.name.clone().into())),
            attack: self.attack.clone().or_else(|| Some(current.attack.into())),
            defense: self.defense.clone().or_else(|| Some(current.defense.into())),
            poke_type: self
                .poke_type
                .clone()
                .or_else(|| Some(current.poke_type.clone().into())),
            image_url: self
                .image_url
                .clone()
                .or_else(|| Some(current.image_url.clone().into())),
            captured: self.captured.clone().or_else(|| Some(current.captured.into())),
            moves: self.moves.clone(),
        }
    }

    /// Validate a new pokemon (`current` is `None`) or changes to a stored one.
    ///
    /// Uniqueness needs storage and is checked by the caller against the
    /// returned draft.
    pub fn validate(&self, current: Option<&pokemon::Model>) -> (PokemonDraft, ValidationErrors) {
        let form = current.map_or_else(|| self.clone(), |c| self.merged_onto(c));
        let mut errors = ValidationErrors::new();

        let number = errors.check("number", rules::integer(form.number.as_ref()));
        if let Some(n) = number {
            errors.add_all("number", rules::greater_than(n, 0));
        }

        let name = errors.check("name", rules::string(form.name.as_ref()));
        if let Some(name) = &name {
            errors.add_all("name", rules::length(name, 3, 255));
        }

        let attack = errors.check("attack", rules::integer(form.attack.as_ref()));
        if let Some(n) = attack {
            errors.add_all("attack", rules::within(n, 0..=100));
        }

        let defense = errors.check("defense", rules::integer(form.defense.as_ref()));
        if let Some(n) = defense {
            errors.add_all("defense", rules::within(n, 0..=100));
        }

        let poke_type = errors
            .check("poke_type", rules::string(form.poke_type.as_ref()))
            .and_then(|t| {
                errors.add_all(
                    "poke_type",
                    rules::inclusion(&t, &PokeType::names(), "Pokemon type"),
                );
                PokeType::from_str(&t)
            });

        let image_url = errors.check("image_url", rules::string(form.image_url.as_ref()));

        // An absent flag on a new pokemon takes the column default
        let captured = match (&form.captured, current) {
            (None, None) => Some(false),
            (value, _) => errors.check("captured", rules::boolean(value.as_ref())),
        };

        let moves = if current.is_none() || form.moves.is_some() {
            errors.check("moves", rules::string_list(form.moves.as_ref()))
        } else {
            None
        };

        let draft = PokemonDraft {
            number: number.filter(|_| errors.get("number").is_empty()),
            name: name.filter(|_| errors.get("name").is_empty()),
            attack: attack.filter(|_| errors.get("attack").is_empty()),
            defense: defense.filter(|_| errors.get("defense").is_empty()),
            poke_type,
            image_url,
            captured,
            moves,
        };

        (draft, errors)
    }
}

impl PokemonDraft {
    /// The writable attributes and the requested move names, if every scalar
    /// field is valid.
    pub fn into_valid(self) -> Option<(ValidPokemon, Option<Vec<String>>)> {
        Some((
            ValidPokemon {
                number: self.number?,
                name: self.name?,
                attack: self.attack?,
                defense: self.defense?,
                poke_type: self.poke_type?,
                image_url: self.image_url?,
                captured: self.captured?,
            },
            self.moves,
        ))
    }
}
