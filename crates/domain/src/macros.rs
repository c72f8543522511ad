//! Macro for implementing Display and FromStr for wire-level enums
//!
//! # Example
//!
//! ```rust
//! use responsys_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum EmailFormat {
//!     Html,
//!     Text,
//! }
//!
//! impl_wire_enum_conversions!(EmailFormat {
//!     Html => "HTML_FORMAT",
//!     Text => "TEXT_FORMAT",
//! });
//!
//! assert_eq!(EmailFormat::Html.to_string(), "HTML_FORMAT");
//! assert_eq!("text_format".parse::<EmailFormat>().unwrap(), EmailFormat::Text);
//! ```

/// Implements Display and FromStr traits for enums with a fixed wire spelling
///
/// - Display writes the wire string exactly as given
/// - FromStr matches it ASCII case-insensitively
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of this value.
            pub fn as_str(&self) -> &'static str {
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

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
