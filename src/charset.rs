use crate::error::{ConfigError, Result};
use crate::options::PasswordOptions;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Glyphs easily confused with one another when read or typed by hand.
pub const AMBIGUOUS: &[u8] = b"0O1lI5S2Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    pub fn index(self) -> usize {
        match self {
            CharClass::Lowercase => 0,
            CharClass::Uppercase => 1,
            CharClass::Digit => 2,
            CharClass::Symbol => 3,
        }
    }

    /// The unfiltered pool for this class.
    pub const fn chars(self) -> &'static [u8] {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    /// Anything that is not an ASCII letter or digit counts as a symbol.
    pub fn of(c: char) -> CharClass {
        if c.is_ascii_lowercase() {
            CharClass::Lowercase
        } else if c.is_ascii_uppercase() {
            CharClass::Uppercase
        } else if c.is_ascii_digit() {
            CharClass::Digit
        } else {
            CharClass::Symbol
        }
    }

    fn enabled_in(self, options: &PasswordOptions) -> bool {
        match self {
            CharClass::Lowercase => options.include_lowercase,
            CharClass::Uppercase => options.include_uppercase,
            CharClass::Digit => options.include_numbers,
            CharClass::Symbol => options.include_symbols,
        }
    }
}

/// Per-class character pools after applying the include flags and the
/// ambiguous-glyph filter. Disabled classes have empty pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSets {
    pools: [Vec<u8>; 4],
}

impl CharacterSets {
    pub fn build(options: &PasswordOptions) -> Result<Self> {
        let sets = Self::filtered(options);
        if sets.total() == 0 {
            return Err(ConfigError::NoCharactersAvailable.into());
        }

        log::debug!(
            "character pools: lowercase={} uppercase={} digits={} symbols={}",
            sets.pools[0].len(),
            sets.pools[1].len(),
            sets.pools[2].len(),
            sets.pools[3].len()
        );
        Ok(sets)
    }

    fn filtered(options: &PasswordOptions) -> Self {
        let pools = CharClass::ALL.map(|class| {
            if !class.enabled_in(options) {
                return Vec::new();
            }
            class
                .chars()
                .iter()
                .copied()
                .filter(|c| !options.exclude_ambiguous || !AMBIGUOUS.contains(c))
                .collect()
        });
        CharacterSets { pools }
    }

    pub fn pool(&self, class: CharClass) -> &[u8] {
        &self.pools[class.index()]
    }

    /// Classes with at least one usable character, in `CharClass::ALL` order.
    pub fn enabled(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL
            .into_iter()
            .filter(|&class| !self.pool(class).is_empty())
    }

    pub fn total(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    pub fn union(&self) -> Vec<u8> {
        self.pools.concat()
    }
}

/// Size of the combined alphabet the options describe. Zero when nothing
/// is enabled.
pub fn alphabet_size(options: &PasswordOptions) -> usize {
    CharacterSets::filtered(options).total()
}
