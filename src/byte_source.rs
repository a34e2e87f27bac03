//! Sources of uniformly distributed random bytes.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::GenerationError;

/// Anything that can hand out uniformly distributed bytes in `0..=255`.
///
/// Implementations used for real passwords must be cryptographically secure; see
/// [`CryptoByteSource`].
pub trait ByteSource {
    fn next_byte(&mut self) -> Result<u8, GenerationError>;

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), GenerationError> {
        for b in dest.iter_mut() {
            *b = self.next_byte()?;
        }
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<u8, GenerationError> {
        (**self).next_byte()
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), GenerationError> {
        (**self).fill(dest)
    }
}

const BUFFER_LEN: usize = 64;

/// A buffered byte source over a cryptographic RNG.
///
/// The `CryptoRng` bound keeps general-purpose generators out: there is no way to build one
/// of these over a weak RNG, and a failing RNG is reported as
/// [`GenerationError::SourceUnavailable`] rather than replaced.
///
/// Bytes that were drawn from the RNG but never handed out are wiped when the source is
/// dropped.
pub struct CryptoByteSource<R> {
    rng: R,
    buf: [u8; BUFFER_LEN],
    // Next unread position in `buf`; `BUFFER_LEN` means empty.
    pos: usize,
    drawn: u64,
}

impl CryptoByteSource<OsRng> {
    /// Acquire the operating system's entropy source.
    ///
    /// The first buffer is filled immediately, so an unavailable source is reported here
    /// rather than part way through a run.
    pub fn acquire() -> Result<Self, GenerationError> {
        let mut source = Self::from_rng(OsRng);
        source.refill()?;
        log::debug!("acquired OS entropy source");
        Ok(source)
    }
}

impl<R> CryptoByteSource<R>
where
    R: RngCore + CryptoRng,
{
    pub fn from_rng(rng: R) -> Self {
        CryptoByteSource {
            rng,
            buf: [0u8; BUFFER_LEN],
            pos: BUFFER_LEN,
            drawn: 0,
        }
    }

    /// How many bytes have been handed out so far.
    pub fn bytes_drawn(&self) -> u64 {
        self.drawn
    }

    fn refill(&mut self) -> Result<(), GenerationError> {
        self.rng
            .try_fill_bytes(&mut self.buf)
            .map_err(GenerationError::SourceUnavailable)?;
        self.pos = 0;
        Ok(())
    }
}

impl<R> ByteSource for CryptoByteSource<R>
where
    R: RngCore + CryptoRng,
{
    fn next_byte(&mut self) -> Result<u8, GenerationError> {
        if self.pos == BUFFER_LEN {
            self.refill()?;
        }
        let b = self.buf[self.pos];
        self.buf[self.pos] = 0;
        self.pos += 1;
        self.drawn += 1;
        Ok(b)
    }
}

impl<R> Drop for CryptoByteSource<R> {
    fn drop(&mut self) {
        self.buf = [0u8; BUFFER_LEN];
        log::debug!("released entropy source after {} bytes", self.drawn);
    }
}
