use serde::{Deserialize, Serialize};

/// Identity of the signed-in viewer, as supplied by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub avatar_url: Option<String>,
}

/// Author details copied onto a post at creation time. This is an immutable
/// snapshot: later display-name or avatar changes do not rewrite past posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub avatar_url: Option<String>,
}

impl From<&CurrentUser> for Author {
    fn from(user: &CurrentUser) -> Self {
        Author {
            name: user.name.clone(),
            surname: user.surname.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Session seam to the external auth provider. `None` means no signed-in
/// user; the composing application gates submission on that.
pub trait AuthProvider {
    fn current_user(&self) -> Option<CurrentUser>;
}
