// File: src/core/encoder.rs
use crate::core::script::{is_nasalization, NUKTA, VIRAMA, VISARGA};
use crate::core::segmenter::segment;
use crate::core::types::PhoneticForm;

/// The implicit vowel of a bare consonant.
pub const SCHWA: &str = "a";
pub const NASAL: &str = "ṃ";
pub const ASPIRATE: &str = "ḥ";

/// Segments and encodes a word in one step.
pub fn phonetics(word: &str) -> PhoneticForm {
    encode(&segment(word))
}

/// Converts an ordered cluster sequence into phoneme tokens.
///
/// Only the last cluster loses its implicit vowel; every other bare
/// consonant cluster gets one.
pub fn encode(clusters: &[&str]) -> PhoneticForm {
    let mut form = PhoneticForm {
        clusters: clusters.iter().map(|c| c.to_string()).collect(),
        ..PhoneticForm::default()
    };
    let last = clusters.len().saturating_sub(1);
    for (i, cluster) in clusters.iter().enumerate() {
        let count = encode_cluster(cluster, i == last, &mut form.tokens, &mut form.token_offsets);
        form.cluster_token_counts.push(count);
    }
    form
}

/// Appends the tokens for one cluster and returns how many were added.
fn encode_cluster(
    cluster: &str,
    is_last: bool,
    tokens: &mut Vec<&'static str>,
    offsets: &mut Vec<usize>,
) -> usize {
    let before = tokens.len();
    let mut has_consonant = false;
    let mut dead = false;
    let mut consonant_end = 0;
    let mut vowel: Option<(&'static str, usize)> = None;
    let mut nasal: Option<usize> = None;
    let mut visarga: Option<usize> = None;

    for (offset, c) in cluster.char_indices() {
        if let Some(phoneme) = consonant_phoneme(c) {
            tokens.push(phoneme);
            offsets.push(offset);
            has_consonant = true;
            dead = false;
            consonant_end = offset + c.len_utf8();
        } else if c == NUKTA {
            if has_consonant && vowel.is_none() {
                if let Some(last) = tokens.last_mut() {
                    *last = nukta_variant(*last);
                }
                consonant_end = offset + c.len_utf8();
            }
        } else if c == VIRAMA {
            if has_consonant && vowel.is_none() {
                dead = true;
                consonant_end = offset + c.len_utf8();
            }
        } else if let Some(phoneme) = vowel_phoneme(c) {
            vowel.get_or_insert((phoneme, offset));
        } else if is_nasalization(c) {
            nasal.get_or_insert(offset);
        } else if c == VISARGA {
            visarga.get_or_insert(offset);
        }
    }

    match vowel {
        Some((phoneme, offset)) => {
            tokens.push(phoneme);
            offsets.push(offset);
        }
        None if has_consonant && !dead && !is_last => {
            tokens.push(SCHWA);
            offsets.push(consonant_end);
        }
        None => {}
    }
    if let Some(offset) = nasal {
        tokens.push(NASAL);
        offsets.push(offset);
    }
    if let Some(offset) = visarga {
        tokens.push(ASPIRATE);
        offsets.push(offset);
    }
    tokens.len() - before
}

/// Consonant table. Homophones collapse: ण reads as न, and ष as श.
fn consonant_phoneme(c: char) -> Option<&'static str> {
    let phoneme = match c {
        'क' => "k", 'ख' => "kh", 'ग' => "g", 'घ' => "gh", 'ङ' => "ṅ",
        'च' => "c", 'छ' => "ch", 'ज' => "j", 'झ' => "jh", 'ञ' => "ñ",
        'ट' => "ṭ", 'ठ' => "ṭh", 'ड' => "ḍ", 'ढ' => "ḍh", 'ण' => "n",
        'त' => "t", 'थ' => "th", 'द' => "d", 'ध' => "dh", 'न' => "n",
        'प' => "p", 'फ' => "ph", 'ब' => "b", 'भ' => "bh", 'म' => "m",
        'य' => "y", 'र' => "r", 'ल' => "l", 'ळ' => "ḷ", 'व' => "v",
        'श' => "ś", 'ष' => "ś", 'स' => "s", 'ह' => "h",
        // Precomposed nukta forms.
        '\u{0929}' => "n", '\u{0931}' => "r", '\u{0934}' => "ḷ",
        '\u{0958}' => "q", '\u{0959}' => "x", '\u{095A}' => "ġ", '\u{095B}' => "z",
        '\u{095C}' => "ṛ", '\u{095D}' => "ṛh", '\u{095E}' => "f", '\u{095F}' => "y",
        // Extended block.
        '\u{0978}' => "d", '\u{0979}' => "z", '\u{097A}' => "y", '\u{097B}' => "g",
        '\u{097C}' => "j", '\u{097D}' => "ʔ", '\u{097E}' => "ḍ", '\u{097F}' => "b",
        _ => return None,
    };
    Some(phoneme)
}

/// What a consonant becomes with a combining nukta after it.
fn nukta_variant(phoneme: &'static str) -> &'static str {
    match phoneme {
        "k" => "q",
        "kh" => "x",
        "g" => "ġ",
        "j" => "z",
        "ḍ" => "ṛ",
        "ḍh" => "ṛh",
        "ph" => "f",
        other => other,
    }
}

/// Shared table for independent vowels and their matra forms.
fn vowel_phoneme(c: char) -> Option<&'static str> {
    let phoneme = match c {
        'अ' => "a",
        'आ' | 'ा' => "ā",
        'इ' | 'ि' => "i",
        'ई' | 'ी' => "ī",
        'उ' | 'ु' | '\u{0956}' | '\u{0976}' => "u",
        'ऊ' | 'ू' | '\u{0957}' | '\u{0977}' => "ū",
        'ऋ' | 'ृ' => "r̥",
        'ॠ' | 'ॄ' => "r̥̄",
        'ऌ' | 'ॢ' => "l̥",
        'ॡ' | 'ॣ' => "l̥̄",
        'ऍ' | 'ॅ' | '\u{0972}' => "æ",
        'ऎ' | 'ॆ' | '\u{0904}' => "ĕ",
        'ए' | 'े' | '\u{094E}' | '\u{0955}' => "e",
        'ऐ' | 'ै' => "ai",
        'ऑ' | 'ॉ' => "ɔ",
        'ऒ' | 'ॊ' => "ŏ",
        'ओ' | 'ो' => "o",
        'औ' | 'ौ' | '\u{094F}' | '\u{0975}' => "au",
        '\u{093A}' | '\u{0973}' => "oe",
        '\u{093B}' | '\u{0974}' => "ooe",
        _ => return None,
    };
    Some(phoneme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_schwa_is_deleted() {
        let form = phonetics("कमल");
        assert_eq!(form.tokens, vec!["k", "a", "m", "a", "l"]);
        assert_eq!(form.cluster_token_counts, vec![2, 2, 1]);
    }

    #[test]
    fn matra_replaces_schwa() {
        let form = phonetics("नाम");
        assert_eq!(form.tokens, vec!["n", "ā", "m"]);
        assert_eq!(form.cluster_token_counts, vec![2, 1]);
    }

    #[test]
    fn conjunct_contributes_every_consonant() {
        let form = phonetics("श्याम");
        assert_eq!(form.tokens, vec!["ś", "y", "ā", "m"]);
        assert_eq!(form.cluster_token_counts, vec![3, 1]);
    }

    #[test]
    fn homophones_share_tokens() {
        assert_eq!(phonetics("बाण").tokens, phonetics("बान").tokens);
        assert_eq!(phonetics("शेष").tokens, phonetics("शेश").tokens);
        assert_ne!(phonetics("बाण").clusters, phonetics("बान").clusters);
    }

    #[test]
    fn nasal_and_visarga_follow_vowel() {
        assert_eq!(phonetics("गाँव").tokens, vec!["g", "ā", "ṃ", "v"]);
        assert_eq!(phonetics("दुःख").tokens, vec!["d", "u", "ḥ", "kh"]);
    }

    #[test]
    fn final_marks_do_not_restore_schwa() {
        assert_eq!(phonetics("हं").tokens, vec!["h", "ṃ"]);
        assert_eq!(phonetics("अतः").tokens, vec!["a", "t", "ḥ"]);
        // Not the last cluster, so the implicit vowel stays.
        assert_eq!(phonetics("संत").tokens, vec!["s", "a", "ṃ", "t"]);
    }

    #[test]
    fn final_virama_is_dead_consonant() {
        assert_eq!(phonetics("जगत्").tokens, vec!["j", "a", "g", "a", "t"]);
    }

    #[test]
    fn combining_and_precomposed_nukta_agree() {
        assert_eq!(phonetics("\u{095B}रा").tokens, phonetics("ज\u{093C}रा").tokens);
        assert_eq!(phonetics("\u{095B}रा").tokens, vec!["z", "a", "r", "ā"]);
    }

    #[test]
    fn independent_vowel_cluster() {
        let form = phonetics("आई");
        assert_eq!(form.tokens, vec!["ā", "ī"]);
    }

    #[test]
    fn offsets_point_into_clusters() {
        let form = phonetics("नाम");
        // "न" is 3 bytes, so the matra starts at 3 inside "ना".
        assert_eq!(form.token_offsets, vec![0, 3, 0]);
    }

    #[test]
    fn counts_sum_to_tokens() {
        for word in ["प्रेम", "कृष्ण", "ज्ञान", "abc", "१२"] {
            let form = phonetics(word);
            assert_eq!(form.cluster_token_counts.iter().sum::<usize>(), form.tokens.len());
            assert_eq!(form.cluster_token_counts.len(), form.clusters.len());
            assert_eq!(form.token_offsets.len(), form.tokens.len());
        }
    }
}
