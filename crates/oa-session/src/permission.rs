//! Role-based permission mask.
//!
//! A session's permissions are three independent flag bits:
//!
//! ```text
//!   bit 0  BOARDER  user's department is the board
//!   bit 1  LEADER   user leads their own department
//!   bit 2  (reserved, only set in ALL)
//! ```
//!
//! `STAFF` is the empty mask every signed-in user starts from. `ALL` is
//! never derived; callers pass it as a requirement meaning "every flag".
//!
//! The numeric values are part of the public contract and shared with the
//! browser client, so they must not change.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use oa_model::User;
use serde::{Deserialize, Serialize};

use crate::SessionError;

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// A 3-bit permission mask.
///
/// Used two ways: as the mask a session *has* (see
/// [`SessionStore::own_permissions`](crate::SessionStore::own_permissions))
/// and as a requirement a caller *needs*. A requirement is satisfied when
/// every bit set in it is also set in the session's mask.
///
/// Serializes as the bare number, so `Permissions::LEADER` is `2` in JSON.
/// Numbers with bits outside `ALL` are rejected on the way in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub struct Permissions(u8);

impl Permissions {
    /// Every flag. Only ever used as a requirement.
    pub const ALL: Self = Self(0b111);
    /// Baseline for any signed-in user: no flags.
    pub const STAFF: Self = Self(0b000);
    /// Member of the board department.
    pub const BOARDER: Self = Self(0b001);
    /// Leader of their own department.
    pub const LEADER: Self = Self(0b010);

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a mask from raw bits, or `None` if any bit outside `ALL` is set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Builds a mask from raw bits, dropping any bit outside `ALL`.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Returns `true` if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every bit of `required` is also set in `self`.
    ///
    /// The empty mask is contained in everything, so
    /// `STAFF.contains(STAFF)` holds even for a signed-out session.
    pub const fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Derives the mask for a signed-in `user`.
    ///
    /// Starts from [`STAFF`](Self::STAFF) and adds:
    /// - [`BOARDER`](Self::BOARDER) if the department name equals
    ///   `board_department` exactly;
    /// - [`LEADER`](Self::LEADER) if the department's leader is the user.
    ///
    /// A user without a department gets neither flag. Whether the user is
    /// signed in at all is the caller's question; a signed-out session
    /// always has `STAFF`.
    pub fn derive(user: &User, board_department: &str) -> Self {
        let mut permissions = Self::STAFF;
        if user.in_department(board_department) {
            permissions |= Self::BOARDER;
        }
        if user.leads_own_department() {
            permissions |= Self::LEADER;
        }
        permissions
    }

    /// Checks `required` against this mask and combines the results.
    ///
    /// Each requirement is satisfied on its own (see
    /// [`contains`](Self::contains)); `mode` decides how those answers are
    /// joined. With no requirements, [`Combine::Any`] is `false` and
    /// [`Combine::All`] is `true`.
    pub fn check(self, required: &[Permissions], mode: Combine) -> bool {
        let mut satisfied = required.iter().map(|&p| self.contains(p));
        match mode {
            Combine::Any => satisfied.any(|ok| ok),
            Combine::All => satisfied.all(|ok| ok),
        }
    }
}

impl From<Permissions> for u8 {
    fn from(permissions: Permissions) -> u8 {
        permissions.0
    }
}

impl TryFrom<u8> for Permissions {
    type Error = SessionError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
            .ok_or_else(|| SessionError::InvalidPermission(format!("{bits:#b}")))
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Permissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Permissions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Parses a flag name (`"boarder"`, `"LEADER"`, ...), a decimal mask
/// (`"3"`), or a binary one (`"0b011"`).
impl FromStr for Permissions {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.to_ascii_lowercase().as_str() {
            "all" => Some(Self::ALL),
            "staff" => Some(Self::STAFF),
            "boarder" | "board" => Some(Self::BOARDER),
            "leader" => Some(Self::LEADER),
            other => match other.strip_prefix("0b") {
                Some(bin) => u8::from_str_radix(bin, 2).ok(),
                None => other.parse::<u8>().ok(),
            }
            .and_then(Self::from_bits),
        };
        parsed.ok_or_else(|| SessionError::InvalidPermission(s.to_owned()))
    }
}

/// Prints the mask as three binary digits, e.g. `0b011`.
impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05b}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Combine
// ---------------------------------------------------------------------------

/// How several requirement results are joined.
///
/// Parses from the operator spellings callers use: `"|"`, `"OR"`, `"any"`
/// for [`Any`](Self::Any); `"&"`, `"AND"`, `"all"` for [`All`](Self::All).
/// The default is `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// At least one requirement must be satisfied (OR).
    #[default]
    Any,
    /// Every requirement must be satisfied (AND).
    All,
}

impl FromStr for Combine {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "|" | "||" | "OR" | "or" | "Or" | "any" | "Any" => Ok(Self::Any),
            "&" | "&&" | "AND" | "and" | "And" | "all" | "All" => Ok(Self::All),
            other => Err(SessionError::InvalidCombine(other.to_owned())),
        }
    }
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "|"),
            Self::All => write!(f, "&"),
        }
    }
}
