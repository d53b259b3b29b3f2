//! # Tri-state Fields
//!
//! Every attribute of a local model is a [`Field<T>`]: it is either **Null** (absent),
//! **Unknown** (the host has not computed it yet) or **Known** (a concrete value).
//!
//! Remote payloads only ever know two of those states (present or absent), plus the
//! occasional explicit-nullable value that distinguishes "key missing" from "key is null"
//! ([`Nullable<T>`]). The mapping between the two worlds lives here and nowhere else,
//! so translators stay a flat list of `Field::from_option(..)` calls.
//!
//! # Architecture Note
//! `Unknown` is a planning-time state. It may appear in a *declared* model, but it must
//! never survive a successful Read, Create or Update. That is why `Unknown` refuses to
//! serialize: a model that still carries one cannot be persisted by accident.
//!
//! ```rust
//! use reconcile_framework::field::{Field, Nullable};
//!
//! let role: Field<String> = Field::from_option(Some("global:member".to_string()));
//! assert_eq!(role.to_option(), Some("global:member".to_string()));
//!
//! let stopped: Field<String> = Field::from_nullable(Nullable::Null);
//! assert!(stopped.is_null());
//! ```

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};
use std::fmt;

/// A local attribute value with three states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// Absent.
    Null,
    /// Not yet computed; only legal in a declared plan.
    Unknown,
    /// Present.
    Known(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Null
    }
}

impl<T> Field<T> {
    /// Maps a remote optional value into the local model (absent becomes `Null`).
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Known(value),
            None => Field::Null,
        }
    }

    /// Maps an explicit-nullable remote value. Unset and explicit null both become `Null`.
    pub fn from_nullable(value: Nullable<T>) -> Self {
        match value {
            Nullable::Value(value) => Field::Known(value),
            Nullable::Null | Nullable::Unset => Field::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Field::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Field::Known(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Null => Field::Null,
            Field::Unknown => Field::Unknown,
            Field::Known(value) => Field::Known(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Null => Field::Null,
            Field::Unknown => Field::Unknown,
            Field::Known(value) => Field::Known(f(value)),
        }
    }

    /// Consumes the field for an outbound payload. `Unknown` is never sent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Known(value) => Some(value),
            Field::Null | Field::Unknown => None,
        }
    }

    /// Maps to an explicit-nullable outbound value. `Unknown` leaves the key unset.
    pub fn into_nullable(self) -> Nullable<T> {
        match self {
            Field::Known(value) => Nullable::Value(value),
            Field::Null => Nullable::Null,
            Field::Unknown => Nullable::Unset,
        }
    }
}

impl<T: Clone> Field<T> {
    /// Borrowing form of [`Field::into_option`].
    pub fn to_option(&self) -> Option<T> {
        self.as_known().cloned()
    }

    pub fn to_nullable(&self) -> Nullable<T> {
        self.clone().into_nullable()
    }
}

impl Field<String> {
    /// The value if it is `Known` and not the empty string.
    pub fn non_empty(&self) -> Option<&str> {
        match self {
            Field::Known(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Known(value.to_string())
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Null => f.write_str("null"),
            Field::Unknown => f.write_str("(known after apply)"),
            Field::Known(value) => write!(f, "{value}"),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(value) => value.serialize(serializer),
            Field::Null => serializer.serialize_none(),
            Field::Unknown => Err(S::Error::custom(
                "unknown value cannot be persisted; it must be resolved by a read first",
            )),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from_option)
    }
}

/// Remote explicit-nullable value: the key may be missing, present as `null`, or set.
///
/// Use with `#[serde(default, skip_serializing_if = "Nullable::is_unset")]` so a missing
/// key round-trips as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Unset
    }
}

impl<T> Nullable<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Nullable::Unset)
    }

    /// The value, if set and not null.
    pub fn get(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(value) => value.serialize(serializer),
            Nullable::Null | Nullable::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Nullable::Value(value),
            None => Nullable::Null,
        })
    }
}
