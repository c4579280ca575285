//! Letter and word normalization, plus the static letter rarity table
//!
//! Every word and letter is normalized (trimmed, uppercased) before it is
//! compared, stored or looked up, so case and stray whitespace never matter.

/// Point value for characters missing from the rarity table
pub const DEFAULT_LETTER_POINTS: u32 = 1;

/// Latin alphabet used when a dictionary does not report its own
pub const LATIN_ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Normalize a word: trim surrounding whitespace and uppercase it
///
/// # Examples
/// ```
/// use balda::core::normalize_word;
///
/// assert_eq!(normalize_word("  shell "), "SHELL");
/// assert_eq!(normalize_word(&normalize_word("Cat")), normalize_word("Cat"));
/// ```
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Normalize a letter: the first non-whitespace character, uppercased
///
/// Returns `None` for blank input. Characters whose uppercase form expands to
/// several characters keep only the first one.
#[must_use]
pub fn normalize_letter(letter: &str) -> Option<char> {
    letter.trim().chars().next()?.to_uppercase().next()
}

/// Rarity points for a single (already uppercased) letter
///
/// Common letters score 1, progressively rarer letters up to 4. Covers the
/// Latin and Cyrillic alphabets; anything else scores
/// [`DEFAULT_LETTER_POINTS`].
#[must_use]
pub const fn letter_points(letter: char) -> u32 {
    match letter {
        // Latin
        'E' | 'A' | 'I' | 'O' | 'N' | 'R' | 'T' | 'L' | 'S' | 'U' => 1,
        'D' | 'G' | 'C' | 'M' | 'P' | 'B' | 'H' => 2,
        'F' | 'V' | 'W' | 'Y' | 'K' => 3,
        'J' | 'X' | 'Q' | 'Z' => 4,
        // Cyrillic
        'О' | 'Е' | 'А' | 'И' | 'Н' | 'Т' | 'С' | 'Р' | 'В' | 'Л' => 1,
        'К' | 'М' | 'Д' | 'П' | 'У' | 'Я' | 'Ы' | 'Ь' | 'Г' | 'З' => 2,
        'Б' | 'Ч' | 'Й' | 'Х' | 'Ж' | 'Ш' | 'Ю' => 3,
        'Ц' | 'Щ' | 'Э' | 'Ф' | 'Ъ' | 'Ё' => 4,
        _ => DEFAULT_LETTER_POINTS,
    }
}

/// Sum of rarity points over every letter of a normalized word
#[must_use]
pub fn word_points(word: &str) -> u32 {
    word.chars().map(letter_points).sum()
}
