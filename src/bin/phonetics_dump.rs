// Prints how the encoder reads each word.
// Run with: cargo run --bin phonetics_dump -- नाम श्याम कृष्ण
use rhyme_core::core::encoder::phonetics;
use rhyme_core::core::script::clean_word;

fn main() {
    let words: Vec<String> = std::env::args().skip(1).map(|w| clean_word(&w)).collect();
    let words = if words.is_empty() {
        ["नाम", "श्याम", "कमल", "प्राण", "गाँव", "दुःख", "जगत्", "ज़रा"]
            .iter()
            .map(|w| w.to_string())
            .collect()
    } else {
        words
    };

    for word in &words {
        let form = phonetics(word);
        println!(
            "{} => clusters {:?} tokens [{}] counts {:?}",
            word,
            form.clusters,
            form.tokens.join(" "),
            form.cluster_token_counts
        );
    }
}
