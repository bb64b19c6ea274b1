//! Macro for implementing Display and FromStr for stored enum values
//!
//! Status and subject values are persisted as lowercase strings. This macro
//! keeps the string mapping for both directions in one place and handles
//! case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use academy_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ClassState {
//!     Open,
//!     Closed,
//! }
//!
//! impl_domain_status_conversions!(ClassState {
//!     Open => "open",
//!     Closed => "closed",
//! });
//!
//! assert_eq!("OPEN".parse::<ClassState>().unwrap(), ClassState::Open);
//! ```

/// Implements Display and FromStr traits for stored enums
///
/// This macro generates:
/// - Display trait: writes the stored string form
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
