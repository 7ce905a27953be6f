//! Typed ID wrappers for the catalog's integer primary keys.
//!
//! The backend assigns auto-increment integers to every row; wrapping them
//! keeps a `GenreId` from being passed where a `CountryId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a newtype ID wrapper over `i64`.
///
/// The macro produces a struct with:
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`, `Serialize`, `Deserialize`
/// - `Display` and `FromStr` delegating to the inner integer
/// - `From<i64>` and `Into<i64>` conversions
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Wrap a raw backend id.
                #[must_use]
                pub const fn new(raw: i64) -> Self {
                    Self(raw)
                }

                /// Return the raw integer value.
                #[must_use]
                pub const fn get(&self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    s.trim().parse::<i64>().map(Self)
                }
            }

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

typed_id! {
    /// Identifier of a movie row.
    MovieId,
    /// Identifier of a genre.
    GenreId,
    /// Identifier of a country.
    CountryId,
    /// Identifier of a director.
    DirectorId,
    /// Identifier of an actor.
    ActorId,
    /// Identifier of a saved view, assigned by the view store.
    ViewId,
}
