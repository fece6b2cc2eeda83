use crate::error::{Result, check_range};
use crate::options::{MAX_WORD_COUNT, MIN_WORD_COUNT, PassphraseOptions};
use crate::random::{ChaChaSource, RandomSource};
use crate::wordlist::{capitalize, get_wordlist};
use zeroize::Zeroizing;

/// Upper bound (exclusive) of the number token added by `add_numbers`.
pub const NUMBER_TOKEN_LIMIT: usize = 1000;

pub fn generate_passphrase(options: &PassphraseOptions) -> Result<Zeroizing<String>> {
    validate(options)?;
    let mut rng = ChaChaSource::from_entropy()?;
    Ok(build_passphrase(&mut rng, options))
}

pub fn generate_passphrase_with<R>(
    rng: &mut R,
    options: &PassphraseOptions,
) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    validate(options)?;
    Ok(build_passphrase(rng, options))
}

pub fn validate(options: &PassphraseOptions) -> Result<()> {
    check_range("word count", options.word_count, MIN_WORD_COUNT, MAX_WORD_COUNT)
}

fn build_passphrase<R>(rng: &mut R, options: &PassphraseOptions) -> Zeroizing<String>
where
    R: RandomSource + ?Sized,
{
    let words = get_wordlist();
    let mut tokens: Zeroizing<Vec<String>> =
        Zeroizing::new(Vec::with_capacity(options.word_count + 1));
    let mut previous: Option<usize> = None;

    for _ in 0..options.word_count {
        let index = match previous {
            // Skip over the previous index so consecutive words always differ.
            Some(prev) => {
                let index = rng.below(words.len() - 1);
                if index >= prev { index + 1 } else { index }
            }
            None => rng.below(words.len()),
        };
        previous = Some(index);

        let word = words[index];
        tokens.push(if options.capitalize {
            capitalize(word)
        } else {
            word.to_string()
        });
    }

    if options.add_numbers {
        let position = rng.below(tokens.len());
        let number = rng.below(NUMBER_TOKEN_LIMIT);
        tokens.insert(position, number.to_string());
    }

    log::debug!(
        "generated passphrase: words={} numbers={}",
        options.word_count,
        options.add_numbers
    );

    Zeroizing::new(tokens.join(options.separator.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Separator;

    fn seeded(n: u8) -> ChaChaSource {
        let mut seed = [0x3Cu8; 32];
        seed[1] = n;
        ChaChaSource::from_seed(seed)
    }

    fn hyphenated(word_count: usize, capitalize: bool, add_numbers: bool) -> PassphraseOptions {
        PassphraseOptions {
            word_count,
            separator: Separator::Hyphen,
            capitalize,
            add_numbers,
        }
    }

    #[test]
    fn test_passphrase_deterministic() {
        let options = PassphraseOptions::default();
        let first = generate_passphrase_with(&mut seeded(1), &options).unwrap();
        let second = generate_passphrase_with(&mut seeded(1), &options).unwrap();
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_word_count() {
        for word_count in MIN_WORD_COUNT..=MAX_WORD_COUNT {
            let options = hyphenated(word_count, false, false);
            let passphrase =
                generate_passphrase_with(&mut seeded(word_count as u8), &options).unwrap();
            assert_eq!(passphrase.split('-').count(), word_count);
        }
    }

    #[test]
    fn test_words_come_from_wordlist() {
        let words = get_wordlist();
        let options = hyphenated(10, false, false);
        let passphrase = generate_passphrase_with(&mut seeded(2), &options).unwrap();
        for token in passphrase.split('-') {
            assert!(words.contains(&token), "\"{}\" is not in the wordlist", token);
        }
    }

    #[test]
    fn test_no_consecutive_duplicates() {
        let options = hyphenated(10, false, false);
        for n in 0..=255 {
            let passphrase = generate_passphrase_with(&mut seeded(n), &options).unwrap();
            let tokens: Vec<&str> = passphrase.split('-').collect();
            assert!(
                tokens.windows(2).all(|pair| pair[0] != pair[1]),
                "consecutive duplicate in \"{}\"",
                &*passphrase
            );
        }
    }

    #[test]
    fn test_capitalize() {
        let options = hyphenated(6, true, false);
        let passphrase = generate_passphrase_with(&mut seeded(3), &options).unwrap();
        for token in passphrase.split('-') {
            let mut chars = token.chars();
            assert!(chars.next().is_some_and(|c| c.is_ascii_uppercase()));
            assert!(chars.all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_add_numbers() {
        let options = hyphenated(4, false, true);
        for n in 0..100 {
            let passphrase = generate_passphrase_with(&mut seeded(n), &options).unwrap();
            let tokens: Vec<&str> = passphrase.split('-').collect();
            assert_eq!(tokens.len(), 5);

            let numbers: Vec<&str> = tokens
                .iter()
                .copied()
                .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
                .collect();
            assert_eq!(numbers.len(), 1, "expected one number in \"{}\"", &*passphrase);
            let value: usize = numbers[0].parse().unwrap();
            assert!(value < NUMBER_TOKEN_LIMIT);

            // never appended after the last word
            assert!(!tokens[4].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_separators() {
        let cases = [
            (Separator::Space, ' '),
            (Separator::Hyphen, '-'),
            (Separator::Dot, '.'),
            (Separator::Underscore, '_'),
        ];
        for (separator, ch) in cases {
            let options = PassphraseOptions {
                word_count: 5,
                separator,
                capitalize: false,
                add_numbers: false,
            };
            let passphrase = generate_passphrase_with(&mut seeded(4), &options).unwrap();
            assert_eq!(passphrase.split(ch).count(), 5);
        }
    }

    #[test]
    fn test_no_separator_concatenates() {
        let options = PassphraseOptions {
            word_count: 3,
            separator: Separator::None,
            capitalize: true,
            add_numbers: false,
        };
        let passphrase = generate_passphrase_with(&mut seeded(5), &options).unwrap();
        assert!(passphrase.chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(passphrase.chars().filter(|c| c.is_ascii_uppercase()).count(), 3);
    }

    #[test]
    fn test_word_count_out_of_range() {
        for word_count in [0, 2, 11] {
            let options = hyphenated(word_count, false, false);
            let err = generate_passphrase_with(&mut seeded(0), &options).unwrap_err();
            assert!(err.is_invalid_configuration());
        }
    }

    #[test]
    fn test_generate_passphrase_from_entropy() {
        let passphrase = generate_passphrase(&PassphraseOptions::default()).unwrap();
        assert_eq!(passphrase.split(' ').count(), 4);
    }
}
