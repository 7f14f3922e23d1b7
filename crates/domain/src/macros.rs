//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Several backoffice enums travel as lowercase strings (article status,
//! sort order, notification level). This macro keeps their `Display` and
//! `FromStr` in sync with the serde representation.
//!
//! # Example
//!
//! ```rust
//! use backoffice_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Hidden,
//! }
//!
//! impl_wire_enum_conversions!(Visibility {
//!     Public => "public",
//!     Hidden => "hidden",
//! });
//!
//! assert_eq!(Visibility::Hidden.to_string(), "hidden");
//! assert_eq!("PUBLIC".parse::<Visibility>(), Ok(Visibility::Public));
//! ```

/// Implements `Display` (lowercase wire string) and case-insensitive
/// `FromStr` for a fieldless enum.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
