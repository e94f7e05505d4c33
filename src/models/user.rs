use serde::{Deserialize, Serialize};

/// Signed-in identity as delivered by the identity provider
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Name shown in the user panel ("User" when the provider has none)
    pub fn display_name_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("User")
    }

    /// Single-letter avatar fallback
    pub fn avatar_initial(&self) -> char {
        self.display_name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}
