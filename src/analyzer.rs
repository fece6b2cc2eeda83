//! Heuristic strength score, entropy estimate and crack-time estimates.
//!
//! Crack times assume an attacker has to search half of the keyspace on
//! average: `2^entropy / rate / 2` seconds for each attacker tier below.

use crate::charset::{CharClass, alphabet_size};
use crate::options::{PassphraseOptions, PasswordOptions, WifiOptions};
use crate::passphrase::NUMBER_TOKEN_LIMIT;
use crate::wifi::{
    CHUNK_NUMBER_LIMIT, MEMORABLE_NUMBER_LIMIT, MEMORABLE_SYMBOLS, wifi_alphabet_size,
};
use crate::wordlist::{longest_word_len, wordlist_size};
use std::collections::HashSet;

/// Rate-limited guessing against a live login form.
pub const ONLINE_ATTEMPTS_PER_SECOND: f64 = 100.0;
/// Stolen hashes attacked on a single machine.
pub const OFFLINE_ATTEMPTS_PER_SECOND: f64 = 1e9;
/// Stolen hashes attacked by a GPU cluster.
pub const GPU_ATTEMPTS_PER_SECOND: f64 = 1e10;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.25 * DAY;

/// Beyond this the estimate is reported without computing `2^x`.
const MAX_SECONDS_LOG2: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

/// Display color associated with a strength level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthColor {
    Red,
    Orange,
    Yellow,
    Green,
    Emerald,
}

impl StrengthLevel {
    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }

    pub fn color(self) -> StrengthColor {
        match self {
            StrengthLevel::VeryWeak => StrengthColor::Red,
            StrengthLevel::Weak => StrengthColor::Orange,
            StrengthLevel::Medium => StrengthColor::Yellow,
            StrengthLevel::Strong => StrengthColor::Green,
            StrengthLevel::VeryStrong => StrengthColor::Emerald,
        }
    }
}

/// Coarse verdict on a password's length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRating {
    Short,
    Adequate,
    Good,
}

impl LengthRating {
    pub fn of(password: &str) -> LengthRating {
        match password.chars().count() {
            0..=7 => LengthRating::Short,
            8..=11 => LengthRating::Adequate,
            _ => LengthRating::Good,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LengthRating::Short => "short",
            LengthRating::Adequate => "adequate",
            LengthRating::Good => "good",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrackTimes {
    pub online: String,
    pub offline: String,
    pub gpu: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityAnalysis {
    pub strength: u8,
    pub level: StrengthLevel,
    pub entropy_bits: f64,
    pub time_to_crack: CrackTimes,
}

impl SecurityAnalysis {
    pub fn strength_label(&self) -> &'static str {
        self.level.label()
    }

    pub fn strength_color(&self) -> StrengthColor {
        self.level.color()
    }
}

pub fn strength_score(password: &str) -> u8 {
    let length = password.chars().count();
    let mut score: u32 = 0;

    if length >= 8 {
        score += 20;
    }
    if length >= 12 {
        score += 10;
    }
    if length >= 16 {
        score += 10;
    }

    let classes: HashSet<CharClass> = password.chars().map(CharClass::of).collect();
    if classes.contains(&CharClass::Lowercase) {
        score += 10;
    }
    if classes.contains(&CharClass::Uppercase) {
        score += 10;
    }
    if classes.contains(&CharClass::Digit) {
        score += 10;
    }
    if classes.contains(&CharClass::Symbol) {
        score += 20;
    }

    score.min(100) as u8
}

pub fn strength_level(score: u8) -> StrengthLevel {
    match score {
        0..=29 => StrengthLevel::VeryWeak,
        30..=49 => StrengthLevel::Weak,
        50..=69 => StrengthLevel::Medium,
        70..=89 => StrengthLevel::Strong,
        _ => StrengthLevel::VeryStrong,
    }
}

fn round_bits(bits: f64) -> f64 {
    (bits * 10.0).round() / 10.0
}

/// `length × log2(alphabet)`, rounded to one decimal.
pub fn entropy_bits(password: &str, options: &PasswordOptions) -> f64 {
    let alphabet = alphabet_size(options);
    if alphabet < 2 {
        return 0.0;
    }
    round_bits(password.chars().count() as f64 * (alphabet as f64).log2())
}

/// Entropy of the word choices themselves: any first word, then any word
/// but the previous one. Capitalization is deterministic and adds nothing.
pub fn passphrase_entropy_bits(options: &PassphraseOptions) -> f64 {
    if options.word_count == 0 {
        return 0.0;
    }
    let words = wordlist_size() as f64;
    let mut bits = words.log2() + (options.word_count - 1) as f64 * (words - 1.0).log2();
    if options.add_numbers {
        bits += (NUMBER_TOKEN_LIMIT as f64).log2() + (options.word_count as f64).log2();
    }
    round_bits(bits)
}

/// Entropy of a WiFi password.
///
/// Random mode counts characters over the WiFi alphabet. Memorable mode
/// counts only the word, number and symbol choices certain to survive the
/// cut at `length`, taking every word and number at its longest, so the
/// figure is a lower bound.
pub fn wifi_entropy_bits(options: &WifiOptions) -> f64 {
    if !options.memorable {
        return round_bits(options.length as f64 * (wifi_alphabet_size() as f64).log2());
    }

    let word_bits = (wordlist_size() as f64).log2();
    let longest_word = longest_word_len();

    let mut end = longest_word;
    if end > options.length {
        return 0.0;
    }
    let mut bits = word_bits;

    end += decimal_width(MEMORABLE_NUMBER_LIMIT) + 1;
    if end <= options.length {
        bits += (MEMORABLE_NUMBER_LIMIT as f64).log2() + (MEMORABLE_SYMBOLS.len() as f64).log2();

        let chunk_len = longest_word + decimal_width(CHUNK_NUMBER_LIMIT);
        let chunk_bits = word_bits + (CHUNK_NUMBER_LIMIT as f64).log2();
        while end + chunk_len <= options.length {
            bits += chunk_bits;
            end += chunk_len;
        }
    }
    round_bits(bits)
}

/// Digits needed to print the largest value below `limit`.
fn decimal_width(limit: usize) -> usize {
    limit.saturating_sub(1).to_string().len()
}

/// Which character classes occur in `password`, in `CharClass::ALL` order.
pub fn class_presence(password: &str) -> [(CharClass, bool); 4] {
    let classes: HashSet<CharClass> = password.chars().map(CharClass::of).collect();
    CharClass::ALL.map(|class| (class, classes.contains(&class)))
}

/// Options describing what a bare password appears to have been built with.
pub fn infer_options(password: &str) -> PasswordOptions {
    let classes: HashSet<CharClass> = password.chars().map(CharClass::of).collect();
    let unique: HashSet<char> = password.chars().collect();
    let length = password.chars().count();

    PasswordOptions {
        length,
        include_uppercase: classes.contains(&CharClass::Uppercase),
        include_lowercase: classes.contains(&CharClass::Lowercase),
        include_numbers: classes.contains(&CharClass::Digit),
        include_symbols: classes.contains(&CharClass::Symbol),
        exclude_ambiguous: false,
        avoid_repeated: unique.len() == length,
        start_with_uppercase: password.chars().next().is_some_and(|c| c.is_ascii_uppercase()),
        end_with_number: password.chars().last().is_some_and(|c| c.is_ascii_digit()),
    }
}

pub fn crack_times(entropy_bits: f64) -> CrackTimes {
    CrackTimes {
        online: crack_time(entropy_bits, ONLINE_ATTEMPTS_PER_SECOND),
        offline: crack_time(entropy_bits, OFFLINE_ATTEMPTS_PER_SECOND),
        gpu: crack_time(entropy_bits, GPU_ATTEMPTS_PER_SECOND),
    }
}

fn crack_time(entropy_bits: f64, attempts_per_second: f64) -> String {
    let seconds_log2 = entropy_bits - attempts_per_second.log2() - 1.0;
    if seconds_log2 > MAX_SECONDS_LOG2 {
        return "longer than a trillion years".to_string();
    }
    format_duration(seconds_log2.exp2())
}

fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        return "instantly".to_string();
    }
    if seconds < MINUTE {
        return plural(seconds, "second", "seconds");
    }
    if seconds < HOUR {
        return plural(seconds / MINUTE, "minute", "minutes");
    }
    if seconds < DAY {
        return plural(seconds / HOUR, "hour", "hours");
    }
    if seconds < YEAR {
        return plural(seconds / DAY, "day", "days");
    }

    let years = seconds / YEAR;
    if years < 100.0 {
        plural(years, "year", "years")
    } else if years < 1e6 {
        plural(years / 100.0, "century", "centuries")
    } else if years < 1e9 {
        format!("{} million years", (years / 1e6).floor() as u64)
    } else if years < 1e12 {
        format!("{} billion years", (years / 1e9).floor() as u64)
    } else {
        "longer than a trillion years".to_string()
    }
}

fn plural(value: f64, singular: &str, plural: &str) -> String {
    let count = value.floor() as u64;
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

fn analysis(secret: &str, entropy_bits: f64) -> SecurityAnalysis {
    let strength = strength_score(secret);

    SecurityAnalysis {
        strength,
        level: strength_level(strength),
        entropy_bits,
        time_to_crack: crack_times(entropy_bits),
    }
}

pub fn analyze_security(password: &str, options: &PasswordOptions) -> SecurityAnalysis {
    analysis(password, entropy_bits(password, options))
}

/// Like [`analyze_security`], with the entropy counted in words rather than
/// characters.
pub fn analyze_passphrase(passphrase: &str, options: &PassphraseOptions) -> SecurityAnalysis {
    analysis(passphrase, passphrase_entropy_bits(options))
}

/// Analysis of a generated WiFi password; see [`wifi_entropy_bits`].
pub fn analyze_wifi(password: &str, options: &WifiOptions) -> SecurityAnalysis {
    analysis(password, wifi_entropy_bits(options))
}

/// Analysis of a password whose generation options are unknown.
pub fn analyze_password(password: &str) -> SecurityAnalysis {
    analyze_security(password, &infer_options(password))
}
