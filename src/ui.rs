use anyhow::{Context, Result};
use console::{Style, Term};
use keysmith::charset::CharClass;
use keysmith::{LengthRating, SecurityAnalysis, StrengthColor, class_presence};
use rpassword::read_password;
use std::io::{self, Write};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MIN_SAFE_ENTROPY: f64 = 80.0;
pub const PARANOID_ENTROPY: f64 = 128.0;

pub const MAX_ANALYZE_BYTES: usize = 64 * 1024;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

/// One generated secret and what to print under it.
pub struct Output {
    pub secret: Zeroizing<String>,
    pub analysis: SecurityAnalysis,
    pub alphabet: Option<usize>,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Marks and tree connectors, with ASCII stand-ins for limited terminals.
struct Glyphs {
    ok: &'static str,
    warn: &'static str,
    missing: &'static str,
    branch: &'static str,
    last: &'static str,
}

impl Glyphs {
    fn new(unicode_support: bool) -> Self {
        if unicode_support {
            Glyphs {
                ok: "✓",
                warn: "!",
                missing: "✗",
                branch: "├─",
                last: "└─",
            }
        } else {
            Glyphs {
                ok: "+",
                warn: "!",
                missing: "-",
                branch: "|-",
                last: "`-",
            }
        }
    }
}

fn paint(color_support: bool, style: fn(Style) -> Style) -> Style {
    if color_support {
        style(Style::new())
    } else {
        Style::new()
    }
}

fn strength_style(color: StrengthColor, color_support: bool) -> Style {
    match color {
        StrengthColor::Red => paint(color_support, Style::red),
        StrengthColor::Orange => paint(color_support, |s| s.color256(208)),
        StrengthColor::Yellow => paint(color_support, Style::yellow),
        StrengthColor::Green => paint(color_support, Style::green),
        StrengthColor::Emerald => paint(color_support, |s| s.color256(36)),
    }
}

fn class_name(class: CharClass) -> &'static str {
    match class {
        CharClass::Lowercase => "Lowercase letters",
        CharClass::Uppercase => "Uppercase letters",
        CharClass::Digit => "Numbers",
        CharClass::Symbol => "Symbols",
    }
}

/// Trimmed, NFC-composed copy of terminal input.
fn normalize_input(raw: &str) -> Zeroizing<String> {
    Zeroizing::new(raw.trim().nfc().collect())
}

/// Character (not byte) offsets of control characters in `s`.
fn control_positions(s: &str) -> Vec<usize> {
    s.chars()
        .enumerate()
        .filter_map(|(pos, c)| c.is_control().then_some(pos))
        .collect()
}

/// Asks on stderr whether to keep input containing control characters.
fn confirm_control_characters(positions: &[usize], input_name: &str) -> Result<()> {
    let term = Term::stderr();
    let listed: Vec<String> = positions.iter().map(usize::to_string).collect();

    term.write_line(&format!(
        "WARNING: {} contains {} control character(s) at position(s): {}",
        input_name,
        positions.len(),
        listed.join(", ")
    ))?;
    term.write_str("Continue anyway? [y/N]: ")?;
    term.flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    term.clear_last_lines(2)?;

    match response.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => anyhow::bail!("Aborted"),
    }
}

/// Reads the password to analyze without echoing it.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    print!("In [0]: ");
    io::stdout().flush()?;

    let raw = Zeroizing::new(read_password().context("Failed to read password")?);
    let password = normalize_input(&raw);

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    if password.len() > MAX_ANALYZE_BYTES {
        anyhow::bail!(
            "Password too long ({} bytes, maximum is {})",
            password.len(),
            MAX_ANALYZE_BYTES
        );
    }

    let positions = control_positions(&password);
    if !positions.is_empty() {
        confirm_control_characters(&positions, "Password")?;
    }

    Ok(password)
}

pub fn display_outputs(outputs: &[Output], options: &DisplayOptions) {
    for (i, output) in outputs.iter().enumerate() {
        if options.quiet {
            println!("{}", &*output.secret);
        } else {
            println!("Out[{}]:\n{}\n", i, &*output.secret);
            display_stats(
                &output.analysis,
                output.secret.chars().count(),
                output.alphabet,
                options,
            );
            if i + 1 < outputs.len() {
                println!();
            }
        }
    }
}

pub fn display_analysis(password: &str, analysis: &SecurityAnalysis, options: &DisplayOptions) {
    if options.quiet {
        println!(
            "{} {} {:.1}",
            analysis.strength,
            analysis.strength_label(),
            analysis.entropy_bits
        );
        return;
    }

    println!("\nCriteria:");
    for line in criteria_lines(password, &Glyphs::new(options.unicode_support)) {
        println!("  {}", line);
    }
    println!();
    display_stats(analysis, password.chars().count(), None, options);
}

/// Length verdict followed by one present/absent line per character class.
fn criteria_lines(password: &str, glyphs: &Glyphs) -> Vec<String> {
    let length = password.chars().count();
    let rating = LengthRating::of(password);
    let length_mark = if rating == LengthRating::Short {
        glyphs.warn
    } else {
        glyphs.ok
    };

    let mut lines = vec![format!(
        "[{}] {} {}, {} length",
        length_mark,
        length,
        if length == 1 { "char" } else { "chars" },
        rating.label()
    )];
    for (class, present) in class_presence(password) {
        let mark = if present { glyphs.ok } else { glyphs.missing };
        lines.push(format!("[{}] {}", mark, class_name(class)));
    }
    lines
}

pub fn display_qr_payload(payload: &str, options: &DisplayOptions) {
    if options.quiet {
        println!("{}", payload);
    } else {
        println!("\nQR payload:\n{}", payload);
    }
}

fn display_stats(
    analysis: &SecurityAnalysis,
    length: usize,
    alphabet: Option<usize>,
    options: &DisplayOptions,
) {
    let glyphs = Glyphs::new(options.unicode_support);
    let (branch, last) = (glyphs.branch, glyphs.last);

    let level_style = strength_style(analysis.strength_color(), options.color_support);

    let (entropy_icon, entropy_style, entropy_text) = if analysis.entropy_bits >= PARANOID_ENTROPY {
        (glyphs.ok, paint(options.color_support, Style::green), "Paranoid")
    } else if analysis.entropy_bits >= MIN_SAFE_ENTROPY {
        (glyphs.ok, paint(options.color_support, Style::green), "Strong")
    } else {
        (glyphs.warn, paint(options.color_support, Style::yellow), "Weak")
    };

    println!("Stats:");

    println!(
        "  {} Strength   {} ({})",
        branch,
        level_style.apply_to(format!("{}/100", analysis.strength)),
        level_style.apply_to(analysis.strength_label())
    );

    println!(
        "  {} Entropy    {} {} bits ({})",
        branch,
        entropy_style.apply_to(format!("[{}]", entropy_icon)),
        entropy_style.apply_to(format!("{:.1}", analysis.entropy_bits)),
        entropy_style.apply_to(entropy_text)
    );

    println!(
        "  {} Length     {} {}",
        branch,
        length,
        if length == 1 { "char" } else { "chars" }
    );

    if let Some(alphabet) = alphabet {
        println!("  {} Charset    {} chars", branch, alphabet);
    }

    let crack = &analysis.time_to_crack;
    println!("  {} Crack time", last);
    println!("     {} Online   {}", branch, crack.online);
    println!("     {} Offline  {}", branch, crack.offline);
    println!("     {} GPU      {}", last, crack.gpu);
}
