//! Tests for assistant output sanitization.

use morpheus_bot::{char_len, sanitize};

#[test]
fn test_citation_markers_are_removed() {
    let samples = [
        "Stake pools produce blocks.【4:0†source】",
        "Stake pools produce blocks [1].",
        "Stake pools【12:3†docs.pdf】 produce blocks [4:0] daily [2†source]",
    ];
    for raw in samples {
        let clean = sanitize(raw);
        assert!(!clean.contains('【'), "{clean}");
        assert!(!clean.contains('†'), "{clean}");
        assert!(!clean.contains('['), "{clean}");
    }
    assert_eq!(sanitize("Stake pools produce blocks [1]."), "Stake pools produce blocks.");
}

#[test]
fn test_plain_text_is_only_trimmed() {
    assert_eq!(
        sanitize("  Hydra heads settle off-chain.\n"),
        "Hydra heads settle off-chain."
    );
    // Not a hashtag token.
    assert_eq!(sanitize("Written in C# and Rust"), "Written in C# and Rust");
}

#[test]
fn test_wrapping_quotes_are_removed() {
    assert_eq!(sanitize("\"Blocks every 20 seconds.\""), "Blocks every 20 seconds.");
    assert_eq!(
        sanitize("\u{201C}Blocks every 20 seconds.\u{201D}"),
        "Blocks every 20 seconds."
    );
}

#[test]
fn test_inner_quotes_are_kept() {
    let raw = "\"Plutus\" scripts and \"Aiken\" validators";
    assert_eq!(sanitize(raw), raw);
}

#[test]
fn test_hashtags_move_to_their_own_line() {
    let clean = sanitize("Ouroboros is #Cardano's consensus. #PoS #Cardano");
    assert_eq!(clean, "Ouroboros is consensus.\n\n#Cardano #PoS");
}

#[test]
fn test_hashtag_output_has_single_separator_and_prefixes() {
    let samples = [
        "Delegation keeps ADA liquid #Cardano",
        "#DRMZ builds on Cardano, #Web3!",
        "Multi-asset ledger.\n#Cardano #NativeTokens #Cardano",
        "\"Native tokens need no contracts #Cardano\"",
    ];
    for raw in samples {
        let clean = sanitize(raw);
        assert_eq!(clean.matches("\n\n").count(), 1, "{clean:?}");
        let (_, tags) = clean.rsplit_once("\n\n").unwrap();
        for tag in tags.split(' ') {
            assert!(tag.starts_with('#') && !tag.starts_with("##"), "{tag}");
            assert!(tag.chars().last().unwrap().is_alphanumeric(), "{tag}");
        }
    }
}

#[test]
fn test_duplicate_and_punctuated_hashtags_collapse() {
    assert_eq!(
        sanitize("Epochs last five days. #Cardano, #cardano! ##Epochs"),
        "Epochs last five days.\n\n#Cardano #Epochs"
    );
}

#[test]
fn test_hashtags_only_yield_tag_line() {
    assert_eq!(sanitize("#Cardano #DRMZ"), "#Cardano #DRMZ");
}

#[test]
fn test_numeric_tokens_stay_in_text() {
    assert_eq!(
        sanitize("Staking is #1 for security #Cardano"),
        "Staking is #1 for security\n\n#Cardano"
    );
    assert_eq!(sanitize("Ranked #1 again"), "Ranked #1 again");
}

#[test]
fn test_char_len_counts_scalars() {
    assert_eq!(char_len("ada"), 3);
    assert_eq!(char_len("₳ and 🚀"), 7);
}
