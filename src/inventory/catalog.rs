//! Static game catalog
//!
//! Sold-out records carry the human-facing game name, price and type,
//! resolved by the first five digits of the gamepack number. The catalog is
//! static data: a built-in table, optionally extended or overridden by the
//! `[games]` table of the config file. Lookups never fail; unknown prefixes
//! resolve to the required fallback entry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of leading gamepack digits that key the catalog
pub const CATALOG_PREFIX_LEN: usize = 5;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub name: String,
    pub price: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl GameInfo {
    fn new(name: &str, price: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Fallback entry for prefixes the catalog does not know
static UNKNOWN_GAME: Lazy<GameInfo> = Lazy::new(|| GameInfo::new("Unknown Game", "N/A", "N/A"));

static BUILTIN_GAMES: Lazy<HashMap<String, GameInfo>> = Lazy::new(|| {
    let entries = [
        ("10234", GameInfo::new("Lucky 7s", "$1", "Scratch")),
        ("10501", GameInfo::new("Cash Blast", "$2", "Scratch")),
        ("20117", GameInfo::new("Gold Rush Doubler", "$5", "Scratch")),
        ("20342", GameInfo::new("Diamond Dazzler", "$10", "Scratch")),
        ("30075", GameInfo::new("Triple Match", "$3", "Scratch")),
        ("30900", GameInfo::new("Mega Crossword", "$5", "Crossword")),
        ("40188", GameInfo::new("Bingo Times 10", "$5", "Bingo")),
        ("50266", GameInfo::new("50X The Money", "$20", "Scratch")),
    ];
    entries
        .into_iter()
        .map(|(prefix, info)| (prefix.to_string(), info))
        .collect()
});

/// Prefix-keyed game lookup with a guaranteed fallback
#[derive(Debug, Clone)]
pub struct GameCatalog {
    entries: HashMap<String, GameInfo>,
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self {
            entries: BUILTIN_GAMES.clone(),
        }
    }
}

impl GameCatalog {
    /// Catalog with only the built-in table
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Overlay entries from the config file; config wins on prefix clashes
    pub fn with_overrides(mut self, overrides: HashMap<String, GameInfo>) -> Self {
        self.entries.extend(overrides);
        self
    }

    /// Look up by 5-digit prefix. Unknown prefixes get the fallback entry.
    pub fn lookup(&self, prefix: &str) -> &GameInfo {
        self.entries.get(prefix).unwrap_or(&UNKNOWN_GAME)
    }

    /// Look up the entry for a full gamepack number
    pub fn for_gamepack(&self, gamepack: &str) -> &GameInfo {
        let prefix = &gamepack[..gamepack.len().min(CATALOG_PREFIX_LEN)];
        self.lookup(prefix)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
