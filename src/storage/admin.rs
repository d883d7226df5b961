use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HashedPassword(pub(crate) String);

impl std::fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&"***", f)
    }
}

impl std::fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&"***", f)
    }
}

/// Generic account attributes shared by every kind of user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub password: HashedPassword,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub groups: Vec<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Identity {
    pub(crate) fn new(username: &str, email: &str, password: HashedPassword) -> Self {
        Self {
            username: username.to_owned(),
            password,
            email: email.to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            groups: Vec::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: Utc::now(),
            last_login: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(default = "default_is_admin")]
    pub is_admin: bool,
}

fn default_is_admin() -> bool {
    true
}

impl AdminUser {
    pub(crate) fn new(identity: Identity) -> Self {
        Self {
            identity,
            is_admin: default_is_admin(),
        }
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }
}

impl std::fmt::Display for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identity.username)
    }
}
