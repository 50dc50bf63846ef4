//! Pokedex API - REST backend for a Pokemon catalog
//!
//! This crate provides the JSON API consumed by the Pokedex frontend:
//! - Pokemon with their types, moves and captured state
//! - Items owned by a pokemon
//! - camelCase request/response translation over snake_case storage

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod extract;
pub mod params;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
