//! The user record held by a session.
//!
//! The login endpoint returns a JSON object describing the signed-in user.
//! Only two parts of it carry meaning for this crate: `uid` and
//! `department` (its `name` and `leader`), which feed permission
//! derivation. Everything else is kept verbatim in `attributes` so that a
//! record written by the browser client survives a round trip through us.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// A user identifier as it appears on the wire.
///
/// Backends disagree on whether ids are numbers (`5`) or strings
/// (`"hJ2kD9"`), so both are accepted. `#[serde(untagged)]` makes serde
/// try each variant in order and serialize the inner value bare.
///
/// Comparison is strict: `UserId::Number(5)` and `UserId::Text("5")` are
/// different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// The department a user belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Display name. Compared literally against the board department name.
    #[serde(default)]
    pub name: String,

    /// The department's leader, if one is assigned.
    #[serde(default)]
    pub leader: Option<UserId>,

    /// Any other fields the backend sent (`id`, `intro`, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_leader(mut self, leader: impl Into<UserId>) -> Self {
        self.leader = Some(leader.into());
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A signed-in user, or the empty record when nobody is.
///
/// The empty record is `User::default()` and serializes as `{}`. A record
/// counts as empty only when it has no attributes at all; see
/// [`User::is_empty`].
///
/// Every user that is expected to pass permission checks carries a
/// `department`. A user without one is still a valid session, it just
/// never earns department-based flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,

    /// Remaining fields (`realname`, `email`, ...), kept as-is.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl User {
    /// Creates a user with the given id and nothing else.
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if the record has no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.uid.is_none()
            && self.department.is_none()
            && self.attributes.is_empty()
    }

    /// Returns `true` if this user is recorded as their own department's
    /// leader. Users without a department, or departments without a
    /// leader, never match.
    pub fn leads_own_department(&self) -> bool {
        match (&self.uid, self.department.as_ref().and_then(|d| d.leader.as_ref())) {
            (Some(uid), Some(leader)) => uid == leader,
            _ => false,
        }
    }

    /// Returns `true` if this user's department is named `department_name`.
    pub fn in_department(&self, department_name: &str) -> bool {
        self.department
            .as_ref()
            .is_some_and(|d| d.name == department_name)
    }
}
