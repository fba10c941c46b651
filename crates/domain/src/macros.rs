//! Macro for implementing Display and FromStr for configuration enums
//!
//! Configuration enums are read both from files (through serde) and from
//! environment variables (through `FromStr`). This macro keeps the string
//! forms in one place so both paths agree.
//!
//! # Example
//!
//! ```rust
//! use bomwright_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Fast,
//!     Careful,
//! }
//!
//! impl_domain_enum_conversions!(Mode {
//!     Fast => "fast",
//!     Careful => "careful",
//! });
//! ```

/// Implements Display and FromStr traits for simple domain enums
///
/// - Display writes the given lowercase string
/// - FromStr parses case-insensitively, trimming surrounding whitespace
#[macro_export]
macro_rules! impl_domain_enum_conversions {
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

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Policy {
        Skip,
        AssumeZero,
    }

    impl_domain_enum_conversions!(Policy {
        Skip => "skip",
        AssumeZero => "assume_zero",
    });

    #[test]
    fn display_uses_declared_strings() {
        assert_eq!(Policy::Skip.to_string(), "skip");
        assert_eq!(Policy::AssumeZero.to_string(), "assume_zero");
    }

    #[test]
    fn parses_case_insensitively_with_whitespace() {
        assert_eq!(Policy::from_str(" ASSUME_ZERO ").unwrap(), Policy::AssumeZero);
        assert_eq!(Policy::from_str("Skip").unwrap(), Policy::Skip);
    }

    #[test]
    fn rejects_unknown_values() {
        let err = Policy::from_str("retry").unwrap_err();
        assert!(err.contains("Invalid Policy: retry"));
    }
}
