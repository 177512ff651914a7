use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

impl User {
    /// Avatar letter; `"U"` when the name is empty.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
    }
}

/// Body of `POST /api/auth/session`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionExchange {
    pub session_id: String,
}
