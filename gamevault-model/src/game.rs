use crate::ids::GameId;

/// A persisted catalog entry.
///
/// `name` and `platform` are always trimmed and non-empty once a record has
/// been written; `image_url` is `None` rather than an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub id: GameId,
    pub name: String,
    pub platform: String,
    pub image_url: Option<String>,
}

/// Body accepted by the add and edit endpoints.
///
/// Fields are optional at the wire level so that a missing `name` produces
/// the same validation error as a blank one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct GameInput {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub platform: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_url: Option<String>,
}

impl GameInput {
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            platform: Some(platform.into()),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Validated field set written to the store on add and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFields {
    pub name: String,
    pub platform: String,
    pub image_url: Option<String>,
}

/// Optional filters for the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    #[cfg_attr(feature = "serde", serde(default))]
    pub query: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub platform: Option<String>,
}

/// Body of the delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct DeleteRequest {
    #[cfg_attr(feature = "serde", serde(default))]
    pub deletion_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageQuery {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

/// Cover art lookup result; `image` is `null` when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageResponse {
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_serializes_with_underscore_id() {
        let game = Game {
            id: GameId::new(),
            name: "Zelda".into(),
            platform: "Switch".into(),
            image_url: None,
        };
        let value = serde_json::to_value(&game).unwrap();
        assert_eq!(value["_id"], json!(game.id.to_string()));
        assert_eq!(value["name"], "Zelda");
        assert_eq!(value["image_url"], serde_json::Value::Null);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn input_rejects_unknown_fields() {
        let err = serde_json::from_value::<GameInput>(json!({
            "name": "Zelda",
            "platform": "Switch",
            "genre": "Adventure"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn input_tolerates_missing_fields() {
        let input: GameInput = serde_json::from_value(json!({ "name": "Zelda" })).unwrap();
        assert_eq!(input.name.as_deref(), Some("Zelda"));
        assert!(input.platform.is_none());
    }
}
