// File: src/core/script.rs
//! Devanagari code-point classes and the text cleaning shared by the index
//! and the query path.

pub const CANDRABINDU_INVERTED: char = '\u{0900}';
pub const CANDRABINDU: char = '\u{0901}';
pub const ANUSVARA: char = '\u{0902}';
pub const VISARGA: char = '\u{0903}';
pub const NUKTA: char = '\u{093C}';
pub const VIRAMA: char = '\u{094D}';

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';
const BOM: char = '\u{FEFF}';

/// True for any code point in the Devanagari block.
pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

pub fn contains_devanagari(s: &str) -> bool {
    s.chars().any(is_devanagari)
}

/// Code points that can sit in a conjunct chain after a virama.
pub fn is_consonant(c: char) -> bool {
    matches!(c, '\u{0915}'..='\u{0939}' | '\u{0958}'..='\u{095F}' | '\u{0978}'..='\u{097F}')
}

pub fn is_independent_vowel(c: char) -> bool {
    matches!(c, '\u{0904}'..='\u{0914}' | '\u{0960}' | '\u{0961}' | '\u{0972}'..='\u{0977}')
}

pub fn is_vowel_sign(c: char) -> bool {
    matches!(
        c,
        '\u{093A}' | '\u{093B}' | '\u{093E}'..='\u{094C}' | '\u{094E}' | '\u{094F}'
            | '\u{0955}'..='\u{0957}' | '\u{0962}' | '\u{0963}'
    )
}

pub fn is_nasalization(c: char) -> bool {
    matches!(c, CANDRABINDU_INVERTED | CANDRABINDU | ANUSVARA)
}

/// Marks that stay attached to the cluster they follow.
pub fn is_trailing_mark(c: char) -> bool {
    is_vowel_sign(c)
        || is_nasalization(c)
        || c == VISARGA
        || c == NUKTA
        || c == VIRAMA
        || matches!(c, '\u{0951}'..='\u{0954}')
}

fn is_stripped_punctuation(c: char) -> bool {
    matches!(
        c,
        '।' | '॥' | ',' | '.' | '!' | '?' | ';' | ':' | '"' | '\'' | '“' | '”' | '‘' | '’'
            | '–' | '—' | '-' | ZWNJ | ZWJ | BOM
    )
}

/// Strips verse punctuation and joiners and drops all whitespace.
pub fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|&c| !is_stripped_punctuation(c) && !c.is_whitespace())
        .collect()
}

/// Splits text on whitespace and keeps the cleaned tokens that are long
/// enough and carry at least one Devanagari code point.
pub fn tokenize(text: &str, min_chars: usize) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(clean_word)
        .filter(move |w| w.chars().count() >= min_chars && contains_devanagari(w))
}
