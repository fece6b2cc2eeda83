use crate::charset::{CharClass, CharacterSets};
use crate::error::{ConfigError, Result, check_range};
use crate::options::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordOptions};
use crate::random::{ChaChaSource, RandomSource, shuffle};
use crate::sampler::Sampler;
use zeroize::Zeroizing;

/// Generates a password with a freshly seeded ChaCha20 source.
pub fn generate_password(options: &PasswordOptions) -> Result<Zeroizing<String>> {
    let sets = validate(options)?;
    let mut rng = ChaChaSource::from_entropy()?;
    build_password(&mut rng, options, &sets)
}

pub fn generate_password_with<R>(
    rng: &mut R,
    options: &PasswordOptions,
) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    let sets = validate(options)?;
    build_password(rng, options, &sets)
}

/// Checks every constraint up front and returns the filtered pools.
pub fn validate(options: &PasswordOptions) -> Result<CharacterSets> {
    if !options.any_class_enabled() {
        return Err(ConfigError::NoCharacterClass.into());
    }

    check_range(
        "password length",
        options.length,
        MIN_PASSWORD_LENGTH,
        MAX_PASSWORD_LENGTH,
    )?;

    if options.start_with_uppercase && !options.include_uppercase {
        return Err(ConfigError::StartWithUppercaseWithoutUppercase.into());
    }

    if options.end_with_number && !options.include_numbers {
        return Err(ConfigError::EndWithNumberWithoutNumbers.into());
    }

    let sets = CharacterSets::build(options)?;

    if options.avoid_repeated && options.length > sets.total() {
        return Err(ConfigError::RepeatAvoidanceInfeasible {
            length: options.length,
            available: sets.total(),
        }
        .into());
    }

    Ok(sets)
}

fn build_password<R>(
    rng: &mut R,
    options: &PasswordOptions,
    sets: &CharacterSets,
) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    let mut sampler = Sampler::new(options.avoid_repeated);
    let mut covered = [false; 4];

    let first = if options.start_with_uppercase {
        covered[CharClass::Uppercase.index()] = true;
        Some(sampler.draw(rng, sets.pool(CharClass::Uppercase)))
    } else {
        None
    };

    let last = if options.end_with_number {
        covered[CharClass::Digit.index()] = true;
        Some(sampler.draw(rng, sets.pool(CharClass::Digit)))
    } else {
        None
    };

    let reserved = first.is_some() as usize + last.is_some() as usize;
    let interior_len = options.length - reserved;

    let mut interior = Zeroizing::new(Vec::with_capacity(interior_len));

    for class in sets.enabled() {
        if !covered[class.index()] {
            interior.push(sampler.draw(rng, sets.pool(class)));
            covered[class.index()] = true;
        }
    }
    debug_assert!(interior.len() <= interior_len);

    let union = sets.union();
    while interior.len() < interior_len {
        interior.push(sampler.draw(rng, &union));
    }

    // Reserved ends never take part in the shuffle.
    shuffle(rng, &mut interior[..]);

    let mut password = String::with_capacity(options.length);
    password.extend(first.into_iter().chain(interior.iter().copied()).chain(last).map(char::from));

    log::debug!(
        "generated password: length={} reserved={} alphabet={}",
        options.length,
        reserved,
        sets.total()
    );

    Ok(Zeroizing::new(password))
}
