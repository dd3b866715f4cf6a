//! Display/FromStr generation for plain keyword enums
//!
//! Configuration values such as the event shaping mode travel through env
//! vars, CLI flags and config files as lowercase keywords. This macro keeps
//! the keyword table in one place.
//!
//! ```rust
//! use bookingcal_domain::impl_text_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum OutputStyle {
//!     Compact,
//!     Verbose,
//! }
//!
//! impl_text_enum_conversions!(OutputStyle {
//!     Compact => "compact",
//!     Verbose => "verbose",
//! });
//!
//! assert_eq!("VERBOSE".parse::<OutputStyle>(), Ok(OutputStyle::Verbose));
//! ```

/// Implements `Display` (lowercase keyword) and case-insensitive `FromStr`.
///
/// Parsing trims surrounding whitespace. Unknown input yields an error string
/// listing the accepted keywords.
#[macro_export]
macro_rules! impl_text_enum_conversions {
    ($enum_name:ident { $($variant:ident => $keyword:literal),+ $(,)? }) => {
        impl ::core::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let keyword = match self {
                    $(Self::$variant => $keyword,)+
                };
                f.write_str(keyword)
            }
        }

        impl ::core::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($keyword => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "invalid {} {:?}; expected one of: {}",
                        stringify!($enum_name),
                        s,
                        [$($keyword),+].join(", ")
                    )),
                }
            }
        }
    };
}
