use thiserror::Error;

/// Errors returned by the generators.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("operating system entropy source failed: {0}")]
    Entropy(#[from] rand_core::Error),

    #[error("gave up after {attempts} attempts without a valid result")]
    Exhausted { attempts: usize },
}

/// Why a set of options was rejected. Always reported before any random
/// value is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one character class must be enabled")]
    NoCharacterClass,

    #[error("{what} must be between {min} and {max}, got {value}")]
    LengthOutOfRange {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("starting with an uppercase letter requires uppercase letters to be enabled")]
    StartWithUppercaseWithoutUppercase,

    #[error("ending with a number requires numbers to be enabled")]
    EndWithNumberWithoutNumbers,

    #[error("no characters remain after removing ambiguous characters")]
    NoCharactersAvailable,

    #[error("cannot avoid repeated characters: {length} requested, {available} available")]
    RepeatAvoidanceInfeasible { length: usize, available: usize },
}

impl Error {
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            Error::InvalidConfiguration(reason) => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_range(what: &'static str, value: usize, min: usize, max: usize) -> Result<()> {
    if value < min || value > max {
        return Err(ConfigError::LengthOutOfRange {
            what,
            value,
            min,
            max,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds_inclusive() {
        assert!(check_range("length", 4, 4, 128).is_ok());
        assert!(check_range("length", 128, 4, 128).is_ok());
        assert!(check_range("length", 3, 4, 128).is_err());
        assert!(check_range("length", 129, 4, 128).is_err());
    }

    #[test]
    fn test_config_error_accessor() {
        let err = check_range("word count", 11, 3, 10).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert_eq!(
            err.config_error(),
            Some(&ConfigError::LengthOutOfRange {
                what: "word count",
                value: 11,
                min: 3,
                max: 10,
            })
        );

        let exhausted = Error::Exhausted { attempts: 3 };
        assert!(!exhausted.is_invalid_configuration());
        assert_eq!(exhausted.config_error(), None);
    }

    #[test]
    fn test_messages() {
        let err: Error = ConfigError::RepeatAvoidanceInfeasible {
            length: 20,
            available: 10,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: cannot avoid repeated characters: 20 requested, 10 available"
        );
    }
}
