//! Unbiased selection of an index from a byte stream, by rejection sampling.
//!
//! A byte is uniform over 256 values. Reducing it modulo `n` is only uniform when `n` divides
//! 256; otherwise the values at the top of the byte range form a partial block that favours the
//! low indices. Those values are thrown away and a fresh byte is drawn instead, so every index
//! in `0..n` is hit by exactly `floor(256 / n)` byte values.
//!
//! Sets larger than 256 entries use the same scheme over big-endian 16-bit draws.

use crate::byte_source::ByteSource;
use crate::charset::CharacterSet;
use crate::GenerationError;

/// The largest set a single byte can index.
pub const BYTE_SPACE: usize = 1 << 8;

/// The largest set supported at all (16-bit draws).
pub const MAX_SET_SIZE: usize = 1 << 16;

/// Consecutive rejections tolerated before the source is declared broken.
///
/// Each draw is rejected with probability below 1/2, so a working source reaches this with
/// probability below 2^-1024.
pub const MAX_REJECTED_DRAWS: u32 = 1024;

/// The exclusive upper bound on accepted draws when sampling `0..n` from `space` values.
///
/// This is the largest multiple of `n` that fits in `space`.
pub fn acceptance_limit(n: usize, space: usize) -> usize {
    let full_sets_of_values = space / n;
    n * full_sets_of_values
}

/// Draw an index uniformly distributed over `0..n`.
pub fn sample_index<S>(source: &mut S, n: usize) -> Result<usize, GenerationError>
where
    S: ByteSource + ?Sized,
{
    if n == 0 {
        return Err(GenerationError::EmptyCharacterSet);
    }
    if n > MAX_SET_SIZE {
        return Err(GenerationError::CharacterSetTooLarge(n));
    }

    if n <= BYTE_SPACE {
        let limit = acceptance_limit(n, BYTE_SPACE);
        draw_below(limit, n, || Ok(usize::from(source.next_byte()?)))
    } else {
        let limit = acceptance_limit(n, MAX_SET_SIZE);
        draw_below(limit, n, || {
            let mut pair = [0u8; 2];
            source.fill(&mut pair)?;
            Ok(usize::from(u16::from_be_bytes(pair)))
        })
    }
}

fn draw_below<F>(limit: usize, n: usize, mut draw: F) -> Result<usize, GenerationError>
where
    F: FnMut() -> Result<usize, GenerationError>,
{
    let mut rejected = 0;
    loop {
        let roll = draw()?;
        if roll < limit {
            return Ok(roll % n);
        }
        rejected += 1;
        log::trace!("rejected draw {roll} (limit {limit})");
        if rejected >= MAX_REJECTED_DRAWS {
            return Err(GenerationError::SourceExhausted { rejected });
        }
    }
}

/// Pick a character from `chars`, every entry being equally likely.
pub fn sample_char<S>(source: &mut S, chars: &CharacterSet) -> Result<char, GenerationError>
where
    S: ByteSource + ?Sized,
{
    let index = sample_index(source, chars.len())?;
    // `sample_index` only returns values below `chars.len()`.
    Ok(chars.as_slice()[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed byte sequence forever, counting draws.
    struct ScriptedBytes {
        bytes: Vec<u8>,
        next: usize,
        draws: usize,
    }

    impl ScriptedBytes {
        fn new(bytes: impl Into<Vec<u8>>) -> Self {
            ScriptedBytes {
                bytes: bytes.into(),
                next: 0,
                draws: 0,
            }
        }

        fn every_byte_value() -> Self {
            Self::new((0..=255u8).collect::<Vec<_>>())
        }
    }

    impl ByteSource for ScriptedBytes {
        fn next_byte(&mut self) -> Result<u8, GenerationError> {
            let b = self.bytes[self.next];
            self.next = (self.next + 1) % self.bytes.len();
            self.draws += 1;
            Ok(b)
        }
    }

    #[test]
    fn limits() {
        assert_eq!(acceptance_limit(1, BYTE_SPACE), 256);
        assert_eq!(acceptance_limit(50, BYTE_SPACE), 250);
        assert_eq!(acceptance_limit(52, BYTE_SPACE), 208);
        assert_eq!(acceptance_limit(62, BYTE_SPACE), 248);
        assert_eq!(acceptance_limit(256, BYTE_SPACE), 256);
        assert_eq!(acceptance_limit(300, MAX_SET_SIZE), 65400);
    }

    #[test]
    fn every_index_in_range() {
        for n in 1..=BYTE_SPACE {
            let mut source = ScriptedBytes::every_byte_value();
            for _ in 0..512 {
                let index = sample_index(&mut source, n).unwrap();
                assert!(index < n, "index {index} out of range for n = {n}");
            }
        }
    }

    #[test]
    fn exactly_uniform_over_one_cycle_of_bytes() {
        // One pass over 0..=255 accepts each of `0..limit` once, so each index is hit
        // exactly `limit / n` times.
        for n in 1..=BYTE_SPACE {
            let limit = acceptance_limit(n, BYTE_SPACE);
            let mut source = ScriptedBytes::every_byte_value();
            let mut counts = vec![0usize; n];
            for _ in 0..limit {
                counts[sample_index(&mut source, n).unwrap()] += 1;
            }
            let expected = limit / n;
            assert!(
                counts.iter().all(|&c| c == expected),
                "n = {n}: counts {counts:?}, expected {expected} each"
            );
        }
    }

    #[test]
    fn leftover_bytes_are_never_accepted() {
        let mut source = ScriptedBytes::new([250, 251, 252, 253, 254, 255]);
        let err = sample_index(&mut source, 50).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SourceExhausted {
                rejected: MAX_REJECTED_DRAWS
            }
        ));
        assert_eq!(source.draws, MAX_REJECTED_DRAWS as usize);
    }

    #[test]
    fn keeps_drawing_past_leftover_bytes() {
        let mut source = ScriptedBytes::new([250, 255, 253, 249]);
        assert_eq!(sample_index(&mut source, 50).unwrap(), 249 % 50);
        assert_eq!(source.draws, 4);
    }

    #[test]
    fn single_entry_always_zero() {
        let mut source = ScriptedBytes::every_byte_value();
        for _ in 0..BYTE_SPACE {
            assert_eq!(sample_index(&mut source, 1).unwrap(), 0);
        }
        assert_eq!(source.draws, BYTE_SPACE);
    }

    #[test]
    fn full_byte_range_never_rejects() {
        let mut source = ScriptedBytes::every_byte_value();
        for expected in 0..BYTE_SPACE {
            assert_eq!(sample_index(&mut source, 256).unwrap(), expected);
        }
        assert_eq!(source.draws, BYTE_SPACE);
    }

    #[test]
    fn empty_set_draws_nothing() {
        let mut source = ScriptedBytes::every_byte_value();
        let err = sample_index(&mut source, 0).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyCharacterSet));
        assert_eq!(source.draws, 0);
    }

    #[test]
    fn wide_sets_use_two_bytes() {
        // 0xffff is above the limit of 65400 for n = 300; 0x0105 = 261 is not.
        let mut source = ScriptedBytes::new([0xff, 0xff, 0x01, 0x05]);
        assert_eq!(sample_index(&mut source, 300).unwrap(), 261);
        assert_eq!(source.draws, 4);
    }

    #[test]
    fn oversized_set_is_refused() {
        let mut source = ScriptedBytes::every_byte_value();
        let err = sample_index(&mut source, MAX_SET_SIZE + 1).unwrap_err();
        assert!(matches!(err, GenerationError::CharacterSetTooLarge(65537)));
        assert_eq!(source.draws, 0);
    }

    #[test]
    fn picks_characters_from_the_set() {
        let chars = CharacterSet::for_mode(crate::Mode::new(2).unwrap());
        // Digits are "1234567890": index 3 is '4'.
        let mut source = ScriptedBytes::new([3]);
        assert_eq!(sample_char(&mut source, &chars).unwrap(), '4');
    }
}
