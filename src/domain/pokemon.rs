//! Pokémon record models and presentation helpers.
//!
//! The list endpoint returns lightweight [`Summary`] references; each one is
//! resolved into a full [`Pokemon`] record through the per-identifier endpoint.
//! Only the fields the plugin renders are modelled. Unknown JSON fields are
//! ignored and missing collections decode as empty, since the API schema is not
//! ours to control.

use serde::{Deserialize, Serialize};

/// Maximum number of moves listed in the detail view.
pub const MAX_MOVES_SHOWN: usize = 20;

/// One page of the list endpoint: `{ "results": [{ "name", "url" }, ...] }`.
///
/// A missing `results` key is treated the same as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryPage {
    #[serde(default)]
    pub results: Vec<Summary>,
}

/// Lightweight list-item reference returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub name: String,
    pub url: String,
}

impl Summary {
    /// Returns the identifier used to fetch the full record.
    ///
    /// The identifier is the last non-empty path segment of `url`
    /// (`.../pokemon/25/` yields `25`). Falls back to the name when the URL
    /// carries no usable segment.
    ///
    /// # Example
    ///
    /// ```
    /// use zpokedex::domain::Summary;
    ///
    /// let summary = Summary {
    ///     name: "pikachu".into(),
    ///     url: "https://pokeapi.co/api/v2/pokemon/25/".into(),
    /// };
    /// assert_eq!(summary.identifier(), "25");
    /// ```
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.url
            .split('/')
            .filter(|segment| !segment.is_empty())
            .next_back()
            .filter(|segment| !segment.contains(':'))
            .unwrap_or(&self.name)
    }
}

/// A `{ name, url }` pair the API uses for types, abilities, stats and moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

/// Sprite locators. Images are never rendered, only shown as URLs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonMove {
    #[serde(rename = "move")]
    pub entry: NamedResource,
}

/// Full record for one catalog entry.
///
/// `height` is in decimetres and `weight` in hectograms, as the API reports
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
}

impl Pokemon {
    /// Creates a bare record with only an id and a name.
    ///
    /// # Example
    ///
    /// ```
    /// use zpokedex::domain::Pokemon;
    ///
    /// let pikachu = Pokemon::new(25, "pikachu");
    /// assert_eq!(pikachu.display_number(), "#025");
    /// assert!(pikachu.types.is_empty());
    /// ```
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            height: 0,
            weight: 0,
            sprites: Sprites::default(),
            types: Vec::new(),
            abilities: Vec::new(),
            stats: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// Returns the catalog number, zero-padded to three digits (`#007`).
    #[must_use]
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    /// Returns the display name with each word capitalised.
    #[must_use]
    pub fn display_name(&self) -> String {
        humanize(&self.name)
    }

    /// Height in metres, formatted with one decimal (`"0.4 m"`).
    #[must_use]
    pub fn height_label(&self) -> String {
        format!("{:.1} m", f64::from(self.height) / 10.0)
    }

    /// Weight in kilograms, formatted with one decimal (`"6.0 kg"`).
    #[must_use]
    pub fn weight_label(&self) -> String {
        format!("{:.1} kg", f64::from(self.weight) / 10.0)
    }

    /// Type names in slot order.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    /// Best available artwork locator: official artwork, then the default sprite.
    #[must_use]
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .official_artwork
            .front_default
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.sprites.front_default.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// The moves shown in the detail view, capped at [`MAX_MOVES_SHOWN`].
    pub fn shown_moves(&self) -> impl Iterator<Item = &PokemonMove> {
        self.moves.iter().take(MAX_MOVES_SHOWN)
    }
}

/// Turns an API slug into a label: hyphens become spaces, words are capitalised.
///
/// # Example
///
/// ```
/// use zpokedex::domain::pokemon::humanize;
///
/// assert_eq!(humanize("special-attack"), "Special Attack");
/// assert_eq!(humanize("mr-mime"), "Mr Mime");
/// ```
#[must_use]
pub fn humanize(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "sprites": {
            "front_default": "https://img/1.png",
            "other": { "official-artwork": { "front_default": "https://art/1.png" } }
        },
        "types": [
            { "slot": 2, "type": { "name": "poison", "url": "https://t/4/" } },
            { "slot": 1, "type": { "name": "grass", "url": "https://t/12/" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 },
            { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true, "slot": 3 }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } }
        ],
        "moves": [
            { "move": { "name": "razor-wind", "url": "" }, "version_group_details": [] }
        ]
    }"#;

    #[test]
    fn decodes_full_record_and_ignores_unknown_fields() {
        let pokemon: Pokemon = serde_json::from_str(BULBASAUR).unwrap();

        assert_eq!(pokemon.id, 1);
        assert_eq!(pokemon.display_number(), "#001");
        assert_eq!(pokemon.display_name(), "Bulbasaur");
        assert_eq!(pokemon.height_label(), "0.7 m");
        assert_eq!(pokemon.weight_label(), "6.9 kg");
        assert_eq!(pokemon.type_names(), vec!["grass", "poison"]);
        assert_eq!(pokemon.artwork_url(), Some("https://art/1.png"));
        assert!(pokemon.abilities[1].is_hidden);
        assert_eq!(pokemon.stats[1].base_stat, 65);
        assert_eq!(pokemon.moves[0].entry.name, "razor-wind");
    }

    #[test]
    fn decodes_minimal_record() {
        let pokemon: Pokemon = serde_json::from_str(r#"{"id": 25, "name": "pikachu"}"#).unwrap();

        assert_eq!(pokemon, Pokemon::new(25, "pikachu"));
        assert_eq!(pokemon.artwork_url(), None);
    }

    #[test]
    fn artwork_falls_back_to_default_sprite() {
        let mut pokemon = Pokemon::new(4, "charmander");
        pokemon.sprites.front_default = Some("https://img/4.png".into());
        pokemon.sprites.other.official_artwork.front_default = Some(String::new());

        assert_eq!(pokemon.artwork_url(), Some("https://img/4.png"));
    }

    #[test]
    fn display_number_keeps_wide_ids() {
        assert_eq!(Pokemon::new(1000, "gholdengo").display_number(), "#1000");
    }

    #[test]
    fn shown_moves_are_capped() {
        let mut pokemon = Pokemon::new(151, "mew");
        pokemon.moves = (0..40)
            .map(|i| PokemonMove {
                entry: NamedResource { name: format!("move-{i}"), url: String::new() },
            })
            .collect();

        assert_eq!(pokemon.shown_moves().count(), MAX_MOVES_SHOWN);
    }

    #[test]
    fn summary_page_without_results_is_empty() {
        let page: SummaryPage = serde_json::from_str(r#"{"count": 0, "next": null}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn summary_identifier_handles_trailing_slash_and_fallback() {
        let with_slash = Summary { name: "ivysaur".into(), url: "https://x/api/v2/pokemon/2/".into() };
        let without_slash = Summary { name: "ivysaur".into(), url: "https://x/api/v2/pokemon/2".into() };
        let empty = Summary { name: "ivysaur".into(), url: String::new() };
        let bare_host = Summary { name: "ivysaur".into(), url: "https:".into() };

        assert_eq!(with_slash.identifier(), "2");
        assert_eq!(without_slash.identifier(), "2");
        assert_eq!(empty.identifier(), "ivysaur");
        assert_eq!(bare_host.identifier(), "ivysaur");
    }

    #[test]
    fn humanize_collapses_repeated_hyphens() {
        assert_eq!(humanize("double--edge"), "Double Edge");
        assert_eq!(humanize(""), "");
    }
}
