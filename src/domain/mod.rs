//! Domain layer for the zpokedex plugin.
//!
//! Holds the API's record shapes and the crate error type, independent of
//! Zellij-specific APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`pokemon`]: Summary and full record models plus presentation helpers

pub mod error;
pub mod pokemon;

pub use error::{PokedexError, Result};
pub use pokemon::{
    Ability, NamedResource, Pokemon, PokemonMove, Sprites, Stat, Summary, SummaryPage, TypeSlot,
};
