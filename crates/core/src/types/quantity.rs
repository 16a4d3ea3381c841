//! Line item quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when reading a [`Quantity`] from an input value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input has no leading integer.
    #[error("quantity is not a number: {0:?}")]
    NotANumber(String),
    /// The leading integer does not fit in a quantity.
    #[error("quantity is out of range: {0:?}")]
    OutOfRange(String),
}

/// Which stepper control was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Increase,
    Decrease,
}

/// A line item quantity, as read from an input value.
///
/// ## Constraints
///
/// - Decrease never takes a value below [`Quantity::MIN`]
/// - Increase has no upper bound beyond the integer range
///
/// A value already below the floor (typed or rendered by the server) is kept
/// as read; only the stepper buttons are held to the floor.
///
/// ## Examples
///
/// ```
/// use shopfront_core::{Quantity, StepDirection};
///
/// let qty = Quantity::parse("3").unwrap();
/// assert_eq!(qty.step(StepDirection::Decrease).map(Quantity::get), Some(2));
/// assert_eq!(Quantity::MIN.step(StepDirection::Decrease), None);
///
/// // Leading-integer parsing: trailing garbage is ignored
/// assert_eq!(Quantity::parse(" 12 pcs").unwrap().get(), 12);
/// assert_eq!(Quantity::parse("0").unwrap().step(StepDirection::Increase).map(Quantity::get), Some(1));
/// assert!(Quantity::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Lowest quantity the decrease button steps down to.
    pub const MIN: Self = Self(1);

    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a quantity from the text of an input element.
    ///
    /// Reads the leading integer (after optional whitespace and sign) and
    /// ignores anything after it.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has no leading integer or the integer
    /// does not fit in 64 bits.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let trimmed = s.trim_start();
        let unsigned = trimmed
            .strip_prefix(['-', '+'])
            .unwrap_or(trimmed);

        let digits_len = unsigned
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len == 0 {
            return Err(QuantityError::NotANumber(s.to_owned()));
        }

        let sign_len = trimmed.len() - unsigned.len();
        let (number, _) = trimmed.split_at(sign_len + digits_len);
        number
            .parse::<i64>()
            .map(Self)
            .map_err(|_| QuantityError::OutOfRange(s.to_owned()))
    }

    /// Returns the quantity as an integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Apply one stepper press.
    ///
    /// Increase always adds one. Decrease subtracts one only above the floor
    /// and returns `None` otherwise, leaving the input as it was.
    #[must_use]
    pub const fn step(self, direction: StepDirection) -> Option<Self> {
        match direction {
            StepDirection::Increase => Some(Self(self.0.saturating_add(1))),
            StepDirection::Decrease => {
                if self.0 > Self::MIN.0 {
                    Some(Self(self.0 - 1))
                } else {
                    None
                }
            }
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
