mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use keysmith::charset::alphabet_size;
use keysmith::{
    PassphraseOptions, PasswordOptions, PinOptions, Separator, WifiOptions, WifiSecurity,
    analyze_passphrase, analyze_password, analyze_security, analyze_wifi, generate_passphrase,
    generate_password, generate_pin, generate_wifi_password, wifi_alphabet_size, wifi_qr_payload,
};

#[derive(Parser)]
#[command(
    name = "keysmith",
    version,
    author,
    about = "Password, PIN, passphrase and WiFi key generator with strength analysis"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print only the generated values
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate random character passwords
    Password(PasswordArgs),
    /// Generate numeric PINs
    Pin(PinArgs),
    /// Generate word-based passphrases
    Passphrase(PassphraseArgs),
    /// Generate a WiFi password and its QR payload
    Wifi(WifiArgs),
    /// Analyze the strength of a password read from the terminal
    Analyze,
}

#[derive(Args)]
struct PasswordArgs {
    #[arg(short, long, default_value_t = 16)]
    length: usize,

    #[arg(long)]
    no_uppercase: bool,

    #[arg(long)]
    no_lowercase: bool,

    #[arg(long)]
    no_numbers: bool,

    #[arg(long)]
    no_symbols: bool,

    /// Drop look-alike characters (0 O 1 l I 5 S 2 Z)
    #[arg(long)]
    exclude_ambiguous: bool,

    /// Use every character at most once
    #[arg(long)]
    avoid_repeated: bool,

    #[arg(long)]
    start_uppercase: bool,

    #[arg(long)]
    end_number: bool,

    #[arg(short, long, default_value_t = 1)]
    count: usize,
}

#[derive(Args)]
struct PinArgs {
    #[arg(short, long, default_value_t = 4)]
    length: usize,

    /// Allow runs like 1-2-3 or 9-8-7
    #[arg(long)]
    allow_sequences: bool,

    #[arg(long)]
    avoid_repeated: bool,

    #[arg(short, long, default_value_t = 1)]
    count: usize,
}

#[derive(Args)]
struct PassphraseArgs {
    #[arg(short, long, default_value_t = 4)]
    words: usize,

    #[arg(short, long, value_enum, default_value = "space")]
    separator: SeparatorArg,

    #[arg(long)]
    no_capitalize: bool,

    /// Insert a number in [0, 1000) between the words
    #[arg(long)]
    numbers: bool,

    #[arg(short, long, default_value_t = 1)]
    count: usize,
}

#[derive(Args)]
struct WifiArgs {
    #[arg(long)]
    ssid: String,

    #[arg(short, long, default_value_t = 16)]
    length: usize,

    /// Words and numbers instead of random characters
    #[arg(long)]
    memorable: bool,

    #[arg(long, value_enum, default_value = "wpa")]
    security: SecurityArg,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum SeparatorArg {
    Space,
    Hyphen,
    Dot,
    Underscore,
    None,
}

impl From<SeparatorArg> for Separator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Space => Separator::Space,
            SeparatorArg::Hyphen => Separator::Hyphen,
            SeparatorArg::Dot => Separator::Dot,
            SeparatorArg::Underscore => Separator::Underscore,
            SeparatorArg::None => Separator::None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum SecurityArg {
    Wpa,
    Wep,
    Nopass,
}

impl From<SecurityArg> for WifiSecurity {
    fn from(arg: SecurityArg) -> Self {
        match arg {
            SecurityArg::Wpa => WifiSecurity::Wpa,
            SecurityArg::Wep => WifiSecurity::Wep,
            SecurityArg::Nopass => WifiSecurity::NoPass,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // RUST_LOG, when set, overrides the -v level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let display = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Password(args) => run_password(args, &display),
        Command::Pin(args) => run_pin(args, &display),
        Command::Passphrase(args) => run_passphrase(args, &display),
        Command::Wifi(args) => run_wifi(args, &display),
        Command::Analyze => run_analyze(&display),
    }
}

fn run_password(args: PasswordArgs, display: &ui::DisplayOptions) -> Result<()> {
    let options = PasswordOptions {
        length: args.length,
        include_uppercase: !args.no_uppercase,
        include_lowercase: !args.no_lowercase,
        include_numbers: !args.no_numbers,
        include_symbols: !args.no_symbols,
        exclude_ambiguous: args.exclude_ambiguous,
        avoid_repeated: args.avoid_repeated,
        start_with_uppercase: args.start_uppercase,
        end_with_number: args.end_number,
    };
    let alphabet = alphabet_size(&options);

    let mut outputs = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let secret = generate_password(&options).context("Failed to generate password")?;
        let analysis = analyze_security(&secret, &options);
        outputs.push(ui::Output {
            secret,
            analysis,
            alphabet: Some(alphabet),
        });
    }

    ui::display_outputs(&outputs, display);
    Ok(())
}

fn run_pin(args: PinArgs, display: &ui::DisplayOptions) -> Result<()> {
    let options = PinOptions {
        length: args.length,
        avoid_sequences: !args.allow_sequences,
        avoid_repeated: args.avoid_repeated,
    };

    let mut outputs = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let secret = generate_pin(&options).context("Failed to generate PIN")?;
        let analysis = analyze_password(&secret);
        outputs.push(ui::Output {
            secret,
            analysis,
            alphabet: Some(10),
        });
    }

    ui::display_outputs(&outputs, display);
    Ok(())
}

fn run_passphrase(args: PassphraseArgs, display: &ui::DisplayOptions) -> Result<()> {
    let options = PassphraseOptions {
        word_count: args.words,
        separator: args.separator.into(),
        capitalize: !args.no_capitalize,
        add_numbers: args.numbers,
    };

    let mut outputs = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let secret = generate_passphrase(&options).context("Failed to generate passphrase")?;
        let analysis = analyze_passphrase(&secret, &options);
        outputs.push(ui::Output {
            secret,
            analysis,
            alphabet: None,
        });
    }

    ui::display_outputs(&outputs, display);
    Ok(())
}

fn run_wifi(args: WifiArgs, display: &ui::DisplayOptions) -> Result<()> {
    if args.ssid.is_empty() {
        anyhow::bail!("SSID cannot be empty");
    }

    let options = WifiOptions {
        length: args.length,
        memorable: args.memorable,
    };

    let secret = generate_wifi_password(&options).context("Failed to generate WiFi password")?;
    let analysis = analyze_wifi(&secret, &options);
    let alphabet = (!options.memorable).then(wifi_alphabet_size);
    let payload = zeroize::Zeroizing::new(wifi_qr_payload(
        &args.ssid,
        &secret,
        args.security.into(),
    ));

    ui::display_outputs(
        &[ui::Output {
            secret,
            analysis,
            alphabet,
        }],
        display,
    );
    ui::display_qr_payload(&payload, display);
    Ok(())
}

fn run_analyze(display: &ui::DisplayOptions) -> Result<()> {
    let password = ui::prompt_password()?;
    let analysis = analyze_password(&password);
    ui::display_analysis(&password, &analysis, display);
    Ok(())
}
