//! Random password generation with an unbiased sampler over a cryptographic byte source.

pub mod byte_source;
pub mod charset;
pub mod password_generation;
pub mod sampler;

pub use byte_source::{ByteSource, CryptoByteSource};
pub use charset::{CharacterSet, Mode, Subset};
pub use password_generation::GenerationRequest;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("the system entropy source is unavailable: {0}")]
    SourceUnavailable(#[source] rand::Error),
    #[error("the entropy source produced {rejected} consecutive unusable values; refusing to continue")]
    SourceExhausted { rejected: u32 },
    #[error("invalid mode {0}; the mode must be between {min} and {max}", min = Mode::MIN, max = Mode::MAX)]
    InvalidMode(i64),
    #[error("invalid value {value:?} for {name}; expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: String,
    },
    #[error("cannot sample from an empty character set")]
    EmptyCharacterSet,
    #[error(
        "character set has {0} entries; at most {max} are supported",
        max = sampler::MAX_SET_SIZE
    )]
    CharacterSetTooLarge(usize),
}

/// A generated password.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes) in the secret.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
