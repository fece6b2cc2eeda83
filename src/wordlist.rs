use std::sync::OnceLock;

const WORDLIST_DATA: &str = include_str!("../assets/wordlist.txt");

const WORDLIST_SIZE: usize = 256;

#[cfg(test)]
const EXPECTED_SHA256: &str = "8a2962956b23e460ce256d8660912aabe18a6d2931c4279e900b63793df25b96";

static WORDLIST: OnceLock<Vec<&'static str>> = OnceLock::new();

pub fn get_wordlist() -> &'static [&'static str] {
    WORDLIST.get_or_init(|| {
        let words: Vec<&'static str> = WORDLIST_DATA
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        assert_eq!(
            words.len(),
            WORDLIST_SIZE,
            "Wordlist must contain exactly {} words",
            WORDLIST_SIZE
        );
        words
    })
}

pub const fn wordlist_size() -> usize {
    WORDLIST_SIZE
}

/// Length in bytes of the longest word in the list.
pub fn longest_word_len() -> usize {
    get_wordlist().iter().map(|word| word.len()).max().unwrap_or(0)
}

/// Uppercases the first letter of an ASCII word.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
