use search_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_strips_punctuation() {
    assert_eq!(tokenize("Hello, World! 123"), vec!["hello", "world", "123"]);
}

#[test]
fn it_keeps_order_and_duplicates() {
    let toks = tokenize("the cat sat on the cat mat");
    assert_eq!(toks, vec!["the", "cat", "sat", "on", "the", "cat", "mat"]);
}

#[test]
fn it_drops_non_ascii_letters() {
    // Only ASCII alphanumerics survive; everything else separates words
    assert_eq!(tokenize("naïve café"), vec!["na", "ve", "caf"]);
}
