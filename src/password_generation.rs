//! Utilities for generating passwords.

use std::fmt;

use crate::byte_source::ByteSource;
use crate::charset::{CharacterSet, Mode};
use crate::sampler;
use crate::{GenerationError, Secret};

/// What to generate: `count` passwords of `length` characters from the set for `mode`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenerationRequest {
    length: usize,
    mode: Mode,
    count: usize,
}

impl GenerationRequest {
    pub const DEFAULT_LENGTH: i64 = 12;
    pub const DEFAULT_COUNT: i64 = 1;
    /// Longest password, in characters.
    pub const MAX_LENGTH: usize = 4096;
    /// Most passwords in one batch.
    pub const MAX_COUNT: usize = 10_000;

    /// Validate raw parameters. Length and count must be between 1 and [`Self::MAX_LENGTH`]
    /// and [`Self::MAX_COUNT`] respectively; the mode must be one of the known modes.
    pub fn new(length: i64, mode: i64, count: i64) -> Result<Self, GenerationError> {
        Ok(GenerationRequest {
            length: bounded("length", length, Self::MAX_LENGTH)?,
            mode: Mode::new(mode)?,
            count: bounded("count", count, Self::MAX_COUNT)?,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn character_set(&self) -> CharacterSet {
        CharacterSet::for_mode(self.mode)
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            length: Self::DEFAULT_LENGTH as usize,
            mode: Mode::DEFAULT,
            count: Self::DEFAULT_COUNT as usize,
        }
    }
}

/// The status line printed ahead of a batch.
impl fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Length = {}, Mode = {}, Count = {}",
            self.length, self.mode, self.count
        )
    }
}

fn bounded(name: &'static str, value: i64, max: usize) -> Result<usize, GenerationError> {
    match usize::try_from(value) {
        Ok(v) if (1..=max).contains(&v) => Ok(v),
        _ => Err(GenerationError::InvalidParameter {
            name,
            value: value.to_string(),
            expected: format!("an integer from 1 to {max}"),
        }),
    }
}

/// Parse the textual value of a numeric parameter.
pub fn parse_parameter(name: &'static str, raw: &str) -> Result<i64, GenerationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| GenerationError::InvalidParameter {
            name,
            value: raw.to_owned(),
            expected: "an integer".to_owned(),
        })
}

/// Build a password of `len` characters drawn independently from `alphabet`.
///
/// Each position is picked by rejection sampling over `source`, so every entry of `alphabet`
/// is exactly equally likely; see [`sampler`].
pub fn generate_password<S>(
    source: &mut S,
    alphabet: &CharacterSet,
    len: usize,
) -> Result<Secret, GenerationError>
where
    S: ByteSource + ?Sized,
{
    if alphabet.is_empty() {
        return Err(GenerationError::EmptyCharacterSet);
    }
    let mut password = String::new();
    for _ in 0..len {
        password.push(sampler::sample_char(source, alphabet)?);
    }
    Ok(Secret(password))
}

/// Generate every password a request asks for.
///
/// Either the whole batch is returned or an error is; partially built passwords are dropped.
pub fn generate_passwords<S>(
    source: &mut S,
    request: &GenerationRequest,
) -> Result<Vec<Secret>, GenerationError>
where
    S: ByteSource + ?Sized,
{
    let alphabet = request.character_set();
    log::debug!(
        "generating {} password(s) of length {} from {} characters",
        request.count,
        request.length,
        alphabet.len()
    );
    (0..request.count)
        .map(|_| generate_password(source, &alphabet, request.length))
        .collect()
}
