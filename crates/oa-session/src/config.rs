//! Session configuration.

use serde::{Deserialize, Serialize};

/// Storage key the user record is written under by default.
pub const DEFAULT_USER_KEY: &str = "OA_USER_KEY";

/// Storage key the access token is written under by default.
pub const DEFAULT_TOKEN_KEY: &str = "OA_TOKEN_KEY";

/// Department name that marks board members by default ("board of
/// directors").
pub const DEFAULT_BOARD_DEPARTMENT: &str = "董事会";

/// Configuration for a [`SessionStore`](crate::SessionStore).
///
/// The defaults match the keys the browser client has always used, so a
/// store shared with it reads the same session. `#[serde(default)]` lets a
/// config file override only the fields it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key for the serialized user record.
    pub user_key: String,

    /// Key for the raw access token.
    pub token_key: String,

    /// A user whose department has exactly this name gets
    /// [`Permissions::BOARDER`](crate::Permissions::BOARDER).
    pub board_department: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_key: DEFAULT_USER_KEY.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            board_department: DEFAULT_BOARD_DEPARTMENT.to_owned(),
        }
    }
}
