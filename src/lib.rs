pub mod analyzer;
pub mod charset;
pub mod error;
pub mod generator;
pub mod options;
pub mod passphrase;
pub mod pin;
pub mod random;
pub mod sampler;
pub mod wifi;
pub mod wordlist;

pub use analyzer::{
    CrackTimes, LengthRating, SecurityAnalysis, StrengthColor, StrengthLevel, analyze_passphrase,
    analyze_password, analyze_security, analyze_wifi, class_presence, infer_options, strength_level,
    strength_score,
};
pub use error::{ConfigError, Error, Result};
pub use generator::{generate_password, generate_password_with};
pub use options::{
    PassphraseOptions, PasswordOptions, PinOptions, Separator, WifiOptions, WifiSecurity,
};
pub use passphrase::{generate_passphrase, generate_passphrase_with};
pub use pin::{generate_pin, generate_pin_with};
pub use random::{ChaChaSource, RandomSource};
pub use wifi::{
    escape_qr_field, generate_wifi_password, generate_wifi_password_with, wifi_alphabet_size,
    wifi_qr_payload,
};
pub use wordlist::{get_wordlist, wordlist_size};
