//! Request/response parameter translation.
//!
//! The frontend speaks camelCase JSON while the tables use snake_case columns.
//! Incoming bodies are wrapped under their resource key, snake_cased and then
//! filtered against an allow-list before any validation runs. Outgoing keys are
//! translated back with [`external_name`].

use serde_json::{Map, Value};

use crate::error::AppError;

/// Describes which attributes a write request for a resource may carry.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    /// Key the attributes are nested under, e.g. `pokemon`.
    pub name: &'static str,
    /// Permitted attributes, by their internal snake_case name.
    pub attributes: &'static [&'static str],
    /// External keys whose internal name is not their snake_case form.
    pub aliases: &'static [(&'static str, &'static str)],
}

impl Resource {
    /// Internal attribute name for a request key, if the key is permitted.
    fn internal_key(&self, key: &str) -> Option<String> {
        if let Some((_, internal)) = self.aliases.iter().find(|(external, _)| *external == key) {
            return Some((*internal).to_string());
        }
        let snake = camel_to_snake(key);
        self.attributes.contains(&snake.as_str()).then_some(snake)
    }
}

pub const POKEMON: Resource = Resource {
    name: "pokemon",
    attributes: &[
        "number",
        "name",
        "attack",
        "defense",
        "poke_type",
        "image_url",
        "captured",
        "moves",
    ],
    aliases: &[("type", "poke_type")],
};

pub const ITEM: Resource = Resource {
    name: "item",
    attributes: &["pokemon_id", "name", "price", "happiness", "image_url"],
    aliases: &[],
};

const RESOURCES: [&Resource; 2] = [&POKEMON, &ITEM];

/// Convert a camelCase key to snake_case. Keys already in snake_case are
/// returned unchanged.
pub fn camel_to_snake(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p));
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                // Acronym followed by a word: `HTTPCode` -> `http_code`
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Convert a snake_case key to camelCase.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' && !out.is_empty() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// External (response) name of an internal attribute. Aliased attributes
/// go back out under their request key.
pub fn external_name(internal: &str) -> String {
    RESOURCES
        .iter()
        .flat_map(|resource| resource.aliases)
        .find(|(_, to)| *to == internal)
        .map_or_else(|| snake_to_camel(internal), |(external, _)| (*external).to_string())
}

/// Recursively rewrite every object key from camelCase to snake_case.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (camel_to_snake(&k), snake_case_keys(v)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

/// Copy the top-level keys that belong to `resource` under a nested key named
/// after it, so flat and nested request bodies look the same downstream.
///
/// Aliased keys are renamed on the way (`type` becomes `poke_type`). Bodies
/// that already carry the nested key are left untouched.
pub fn wrap_parameters(body: Value, resource: &Resource) -> Value {
    let Value::Object(mut map) = body else {
        return body;
    };
    if map.contains_key(resource.name) {
        return Value::Object(map);
    }

    let nested: Map<String, Value> = map
        .iter()
        .filter_map(|(key, value)| {
            let renamed = resource
                .aliases
                .iter()
                .find(|(external, _)| external == key)
                .map(|(_, internal)| (*internal).to_string());
            renamed
                .or_else(|| resource.internal_key(key).map(|_| key.clone()))
                .map(|k| (k, value.clone()))
        })
        .collect();

    if !nested.is_empty() {
        map.insert(resource.name.to_string(), Value::Object(nested));
    }

    Value::Object(map)
}

/// Wrap a raw request body for `resource` and snake_case all of its keys.
pub fn translate_request(body: Value, resource: &Resource) -> Value {
    snake_case_keys(wrap_parameters(body, resource))
}

/// Extract the permitted attributes of `resource` from a translated body.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when the body carries no attributes for
/// the resource.
pub fn permit(params: &Value, resource: &Resource) -> Result<Map<String, Value>, AppError> {
    let nested = params
        .get(resource.name)
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "param is missing or the value is empty: {}",
                resource.name
            ))
        })?;

    Ok(nested
        .iter()
        .filter_map(|(key, value)| {
            resource
                .internal_key(key)
                .map(|internal| (internal, value.clone()))
        })
        .collect())
}
