use crate::charset::CharClass;
use crate::error::{Result, check_range};
use crate::options::{MAX_WIFI_LENGTH, MIN_WIFI_LENGTH, WifiOptions, WifiSecurity};
use crate::random::{ChaChaSource, RandomSource, shuffle};
use crate::wordlist::{capitalize, get_wordlist};
use zeroize::Zeroizing;

/// Symbols that are easy to type on phones and TV remotes.
pub(crate) const WIFI_SYMBOLS: &[u8] = b"!@#$%^&*";
pub(crate) const MEMORABLE_SYMBOLS: &[u8] = b"!@#$%";

pub(crate) const MEMORABLE_NUMBER_LIMIT: usize = 10_000;
pub(crate) const CHUNK_NUMBER_LIMIT: usize = 100;

const RANDOM_POOLS: [&[u8]; 4] = [
    CharClass::Uppercase.chars(),
    CharClass::Lowercase.chars(),
    CharClass::Digit.chars(),
    WIFI_SYMBOLS,
];

pub fn generate_wifi_password(options: &WifiOptions) -> Result<Zeroizing<String>> {
    validate(options)?;
    let mut rng = ChaChaSource::from_entropy()?;
    Ok(build_wifi_password(&mut rng, options))
}

pub fn generate_wifi_password_with<R>(
    rng: &mut R,
    options: &WifiOptions,
) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    validate(options)?;
    Ok(build_wifi_password(rng, options))
}

pub fn validate(options: &WifiOptions) -> Result<()> {
    check_range("WiFi password length", options.length, MIN_WIFI_LENGTH, MAX_WIFI_LENGTH)
}

fn build_wifi_password<R>(rng: &mut R, options: &WifiOptions) -> Zeroizing<String>
where
    R: RandomSource + ?Sized,
{
    log::debug!(
        "generating WiFi password: length={} memorable={}",
        options.length,
        options.memorable
    );
    if options.memorable {
        memorable(rng, options.length)
    } else {
        random(rng, options.length)
    }
}

fn random<R>(rng: &mut R, length: usize) -> Zeroizing<String>
where
    R: RandomSource + ?Sized,
{
    let alphabet = RANDOM_POOLS.concat();

    let mut chars = Zeroizing::new(Vec::with_capacity(length));
    for pool in RANDOM_POOLS {
        chars.push(pool[rng.below(pool.len())]);
    }
    while chars.len() < length {
        chars.push(alphabet[rng.below(alphabet.len())]);
    }
    chars.truncate(length);

    shuffle(rng, &mut chars[..]);

    Zeroizing::new(chars.iter().copied().map(char::from).collect())
}

/// Characters random mode draws from: letters, digits and [`WIFI_SYMBOLS`].
pub fn wifi_alphabet_size() -> usize {
    RANDOM_POOLS.iter().map(|pool| pool.len()).sum()
}

/// Word + number + symbol, then word + small number chunks until long
/// enough. The result is cut at exactly `length`, even mid-word.
fn memorable<R>(rng: &mut R, length: usize) -> Zeroizing<String>
where
    R: RandomSource + ?Sized,
{
    let words = get_wordlist();
    let mut password = Zeroizing::new(String::with_capacity(length + 16));

    password.push_str(&capitalize(words[rng.below(words.len())]));
    password.push_str(&rng.below(MEMORABLE_NUMBER_LIMIT).to_string());
    password.push(char::from(MEMORABLE_SYMBOLS[rng.below(MEMORABLE_SYMBOLS.len())]));

    while password.len() < length {
        password.push_str(&capitalize(words[rng.below(words.len())]));
        password.push_str(&rng.below(CHUNK_NUMBER_LIMIT).to_string());
    }

    password.truncate(length);
    password
}

/// `WIFI:T:<security>;S:<ssid>;P:<password>;;` as read by phone cameras.
///
/// Values are inserted verbatim. SSIDs or passwords containing `\ ; , : "`
/// need [`escape_qr_field`] applied first to be parsed correctly by
/// scanners.
pub fn wifi_qr_payload(ssid: &str, password: &str, security: WifiSecurity) -> String {
    format!("WIFI:T:{};S:{};P:{};;", security.as_str(), ssid, password)
}

/// Backslash-escapes the characters reserved by the `WIFI:` URI format.
pub fn escape_qr_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
