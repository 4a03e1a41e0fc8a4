use serde::{Deserialize, Serialize};

/// Descriptive information copied from the configuration onto every board
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMetadata {
    /// Board title
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "tilte")]
    pub title: Option<String>,
    /// Game the board is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Content authors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

impl BoardMetadata {
    /// Whether no field carries information
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.game.is_none()
            && self.description.is_none()
            && self.version.is_none()
            && self.authors.is_empty()
    }
}
