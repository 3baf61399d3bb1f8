use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {tag}, expected one of: {}", .expected.join(", "))]
pub struct ParseTagError {
    pub tag: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

/// Lowercase and drop separators so "in progress", "in_progress" and "InProgress" compare equal
fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tags behave like enums at the edges but are stored as free text.
///
/// Reading is lenient: anything that is not an exact variant name ends up in `Other`.
/// Parsing (used on the write path) is strict and only accepts the known variants.
macro_rules! open_tag {
    (
        $(#[$meta:meta])*
        $name:ident $label:literal { $first:ident $(, $rest:ident)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $first,
            $($rest,)*
            Other(String),
        }

        impl $name {
            pub const CHOICES: &'static [&'static str] = &[stringify!($first) $(, stringify!($rest))*];

            /// Known variants, in the order a form offers them
            pub fn choices() -> Vec<Self> {
                vec![Self::$first $(, Self::$rest)*]
            }

            pub fn as_str(&self) -> &str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$rest => stringify!($rest),)*
                    Self::Other(value) => value,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            pub fn from_stored(value: &str) -> Self {
                match value {
                    stringify!($first) => Self::$first,
                    $(stringify!($rest) => Self::$rest,)*
                    other => {
                        warn!("Unknown {} '{}' kept as-is", $label, other);
                        Self::Other(other.to_string())
                    }
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl FromStr for $name {
            type Err = ParseTagError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(value);
                Self::choices()
                    .into_iter()
                    .find(|tag| normalize(tag.as_str()) == wanted)
                    .ok_or_else(|| ParseTagError {
                        tag: $label,
                        value: value.to_string(),
                        expected: Self::CHOICES,
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_tag! {
    /// What kind of publication an item is
    Kind "type" { Manga, Webtoon, Manhwa }
}

open_tag! {
    /// Reading status. Any status may follow any other.
    Status "status" { InProgress, ToRead, Completed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!("manhwa".parse::<Kind>(), Ok(Kind::Manhwa));
        assert_eq!("in progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("TO_READ".parse::<Status>(), Ok(Status::ToRead));
        assert_eq!(" completed ".parse::<Status>(), Ok(Status::Completed));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        let err = "Novel".parse::<Kind>().unwrap_err();
        assert_eq!(err.tag, "type");
        assert_eq!(err.value, "Novel");
        assert_eq!(
            err.to_string(),
            "'Novel' is not a valid type, expected one of: Manga, Webtoon, Manhwa"
        );
    }

    #[test]
    fn stored_values_pass_through() {
        assert_eq!(Kind::from_stored("Webtoon"), Kind::Webtoon);
        assert_eq!(Status::from_stored("En cours"), Status::Other("En cours".into()));
        assert_eq!(Status::from_stored("En cours").as_str(), "En cours");
        assert!(!Status::from_stored("completed").is_known());
    }

    #[test]
    fn defaults_follow_form_order() {
        assert_eq!(Kind::default(), Kind::Manga);
        assert_eq!(Status::default(), Status::InProgress);
        assert_eq!(Status::CHOICES, &["InProgress", "ToRead", "Completed"]);
    }
}
