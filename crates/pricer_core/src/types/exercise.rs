//! Exercise style definitions.

use std::fmt;
use std::str::FromStr;

use super::error::SpecError;

/// When the holder may exercise the option.
///
/// European options exercise only at maturity; American options may
/// exercise at any lattice node before maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseStyle {
    /// Exercise at maturity only.
    European,
    /// Exercise at any time up to and including maturity.
    American,
}

impl ExerciseStyle {
    /// Returns whether early exercise must be considered during
    /// backward induction.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether this is the European style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is the American style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl FromStr for ExerciseStyle {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "european" => Ok(ExerciseStyle::European),
            "american" => Ok(ExerciseStyle::American),
            _ => Err(SpecError::UnknownExerciseStyle(s.to_string())),
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "european"),
            ExerciseStyle::American => write!(f, "american"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_exercise_flag() {
        assert!(!ExerciseStyle::European.allows_early_exercise());
        assert!(ExerciseStyle::American.allows_early_exercise());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "european".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::European
        );
        assert_eq!(
            "AMERICAN".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::American
        );
        assert!("bermudan".parse::<ExerciseStyle>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExerciseStyle::European.to_string(), "european");
        assert_eq!(ExerciseStyle::American.to_string(), "american");
    }
}
