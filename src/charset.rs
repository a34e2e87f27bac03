//! The characters a password may be drawn from.

use std::fmt;

use crate::GenerationError;

static STANDARD_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
static ADDITIONAL_CHARS: &str = "1234567890";
// Kept short for compatibility with sites that reject less common symbols.
static EXTENDED_CHARS: &str = "!£$%&*+-=@~#?";

/// A named group of characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Subset {
    /// ASCII letters, lower then upper case.
    Standard,
    /// Decimal digits.
    Additional,
    /// Symbols.
    Extended,
}

impl Subset {
    /// All subsets, in the order they are concatenated.
    pub const ALL: [Subset; 3] = [Subset::Standard, Subset::Additional, Subset::Extended];

    pub fn chars(self) -> &'static str {
        match self {
            Subset::Standard => STANDARD_CHARS,
            Subset::Additional => ADDITIONAL_CHARS,
            Subset::Extended => EXTENDED_CHARS,
        }
    }

    fn mode_bit(self) -> u8 {
        match self {
            Subset::Standard => 0b001,
            Subset::Additional => 0b010,
            Subset::Extended => 0b100,
        }
    }
}

/// Which subsets to combine, as a bit set: 1 = standard, 2 = additional, 4 = extended.
///
/// | mode | subsets                          |
/// |------|----------------------------------|
/// | 1    | standard                         |
/// | 2    | additional                       |
/// | 3    | standard, additional             |
/// | 4    | extended                         |
/// | 5    | standard, extended               |
/// | 6    | additional, extended             |
/// | 7    | standard, additional, extended   |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mode(u8);

impl Mode {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;
    pub const DEFAULT: Mode = Mode(3);

    pub fn new(mode: i64) -> Result<Mode, GenerationError> {
        match u8::try_from(mode) {
            Ok(m) if (Self::MIN..=Self::MAX).contains(&m) => Ok(Mode(m)),
            _ => Err(GenerationError::InvalidMode(mode)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The selected subsets, in canonical order.
    pub fn subsets(self) -> impl Iterator<Item = Subset> {
        Subset::ALL
            .into_iter()
            .filter(move |s| self.0 & s.mode_bit() != 0)
    }
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::DEFAULT
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered characters a password is drawn from. Repeats are kept, so a character listed
/// twice is twice as likely.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharacterSet(Vec<char>);

impl CharacterSet {
    pub fn for_mode(mode: Mode) -> CharacterSet {
        let subsets = mode.subsets().collect::<Vec<_>>();
        Self::from_subsets(&subsets)
    }

    pub fn from_subsets(subsets: &[Subset]) -> CharacterSet {
        let mut chars = Vec::new();
        for subset in subsets {
            chars.extend(subset.chars().chars());
        }
        CharacterSet(chars)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }
}

impl From<Vec<char>> for CharacterSet {
    fn from(chars: Vec<char>) -> CharacterSet {
        CharacterSet(chars)
    }
}
