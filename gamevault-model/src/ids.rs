use std::str::FromStr;

use crate::error::{ModelError, Result};
use uuid::Uuid;

/// Strongly typed ID for catalog entries.
///
/// Identifiers are UUIDv7 so that sorting by id follows insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameId(pub Uuid);

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl GameId {
    pub fn new() -> Self {
        GameId(Uuid::now_v7())
    }

    /// Parse the textual form used in request paths. Anything that is not
    /// exactly a hyphenated or simple UUID is rejected, surrounding
    /// whitespace included.
    pub fn parse_str(raw: &str) -> Result<Self> {
        Uuid::try_parse(raw)
            .map(GameId)
            .map_err(|_| ModelError::InvalidId(raw.to_string()))
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for GameId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
