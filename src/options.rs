//! Option structs for every generator, with the defaults the toolkit
//! starts from and the bounds they are validated against.

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 128;

pub const MIN_PIN_LENGTH: usize = 4;
pub const MAX_PIN_LENGTH: usize = 10;

pub const MIN_WORD_COUNT: usize = 3;
pub const MAX_WORD_COUNT: usize = 10;

/// WPA-PSK passphrases are 8 to 63 printable characters.
pub const MIN_WIFI_LENGTH: usize = 8;
pub const MAX_WIFI_LENGTH: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_ambiguous: bool,
    pub avoid_repeated: bool,
    pub start_with_uppercase: bool,
    pub end_with_number: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        PasswordOptions {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            exclude_ambiguous: false,
            avoid_repeated: false,
            start_with_uppercase: false,
            end_with_number: false,
        }
    }
}

impl PasswordOptions {
    pub fn any_class_enabled(&self) -> bool {
        self.include_uppercase
            || self.include_lowercase
            || self.include_numbers
            || self.include_symbols
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinOptions {
    pub length: usize,
    pub avoid_sequences: bool,
    pub avoid_repeated: bool,
}

impl Default for PinOptions {
    fn default() -> Self {
        PinOptions {
            length: 4,
            avoid_sequences: true,
            avoid_repeated: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Space,
    Hyphen,
    Dot,
    Underscore,
    None,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Hyphen => "-",
            Separator::Dot => ".",
            Separator::Underscore => "_",
            Separator::None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassphraseOptions {
    pub word_count: usize,
    pub separator: Separator,
    pub capitalize: bool,
    pub add_numbers: bool,
}

impl Default for PassphraseOptions {
    fn default() -> Self {
        PassphraseOptions {
            word_count: 4,
            separator: Separator::Space,
            capitalize: true,
            add_numbers: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiOptions {
    pub length: usize,
    pub memorable: bool,
}

impl Default for WifiOptions {
    fn default() -> Self {
        WifiOptions {
            length: 16,
            memorable: false,
        }
    }
}

/// Authentication type written into the `T:` field of a WiFi QR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    NoPass,
}

impl WifiSecurity {
    pub fn as_str(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}
