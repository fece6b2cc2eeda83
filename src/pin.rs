use crate::error::{ConfigError, Error, Result, check_range};
use crate::options::{MAX_PIN_LENGTH, MIN_PIN_LENGTH, PinOptions};
use crate::random::{ChaChaSource, RandomSource};
use zeroize::Zeroizing;

/// Restarts allowed when no digit can legally follow the previous one.
/// Only reachable with both `avoid_repeated` and `avoid_sequences` set.
pub const MAX_PIN_ATTEMPTS: usize = 1000;

const DIGIT_COUNT: usize = 10;

pub fn generate_pin(options: &PinOptions) -> Result<Zeroizing<String>> {
    validate(options)?;
    let mut rng = ChaChaSource::from_entropy()?;
    build_pin(&mut rng, options)
}

pub fn generate_pin_with<R>(rng: &mut R, options: &PinOptions) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    validate(options)?;
    build_pin(rng, options)
}

pub fn validate(options: &PinOptions) -> Result<()> {
    if options.avoid_repeated && options.length > DIGIT_COUNT {
        return Err(ConfigError::RepeatAvoidanceInfeasible {
            length: options.length,
            available: DIGIT_COUNT,
        }
        .into());
    }
    check_range("PIN length", options.length, MIN_PIN_LENGTH, MAX_PIN_LENGTH)
}

fn build_pin<R>(rng: &mut R, options: &PinOptions) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    for attempt in 1..=MAX_PIN_ATTEMPTS {
        if let Some(pin) = try_build_pin(rng, options) {
            log::debug!("generated PIN: length={} attempts={}", options.length, attempt);
            return Ok(pin);
        }
    }

    Err(Error::Exhausted {
        attempts: MAX_PIN_ATTEMPTS,
    })
}

/// One pass over the positions. Returns `None` on a dead end: every unused
/// digit is a neighbour of the previous one.
fn try_build_pin<R>(rng: &mut R, options: &PinOptions) -> Option<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    let mut used = [false; DIGIT_COUNT];
    let mut previous: Option<u8> = None;
    let mut pin = Zeroizing::new(String::with_capacity(options.length));

    for _ in 0..options.length {
        // Excluding previous±1 here is the same as drawing and retrying.
        let candidates: Vec<u8> = (0..DIGIT_COUNT as u8)
            .filter(|&d| !(options.avoid_repeated && used[d as usize]))
            .filter(|&d| !(options.avoid_sequences && previous.is_some_and(|p| p.abs_diff(d) == 1)))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let digit = candidates[rng.below(candidates.len())];
        used[digit as usize] = true;
        previous = Some(digit);
        pin.push(char::from(b'0' + digit));
    }

    Some(pin)
}
