//! Input normalization for catalog writes and searches.

use gamevault_model::{GameFields, GameInput, SearchParams};

use crate::error::{CatalogError, Result};

/// Trim every field of an add/edit body and enforce the required ones.
///
/// Blank `image_url` values collapse to `None`.
pub fn normalize_input(input: GameInput) -> Result<GameFields> {
    let name = non_blank(input.name);
    let platform = non_blank(input.platform);

    let (Some(name), Some(platform)) = (name, platform) else {
        return Err(CatalogError::missing_fields());
    };

    Ok(GameFields {
        name,
        platform,
        image_url: non_blank(input.image_url),
    })
}

/// Search terms after trimming; blank parameters are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    pub name: Option<String>,
    pub platform: Option<String>,
}

impl GameFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.name.is_none() && self.platform.is_none()
    }

    /// Case-insensitive literal substring match against a record's fields.
    pub fn matches(&self, name: &str, platform: &str) -> bool {
        contains_ci(name, self.name.as_deref()) && contains_ci(platform, self.platform.as_deref())
    }
}

impl From<SearchParams> for GameFilter {
    fn from(params: SearchParams) -> Self {
        Self {
            name: non_blank(params.query),
            platform: non_blank(params.platform),
        }
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
///
/// The escape character is `\`, which the query must declare with
/// `ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `%term%` with the term escaped.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
