use ragdb_text::{window_ranges, ChunkParams, Chunker, HfTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};

fn numbered_words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn thousand_tokens_make_three_windows() {
    let chunker = Chunker::new(Box::new(WhitespaceTokenizer));
    let text = numbered_words(1000);
    let params = ChunkParams::new(450, 20).expect("params");

    let windows = chunker.windows(&text, params).expect("windows");
    let starts: Vec<usize> = windows.iter().map(|w| w.tokens.start).collect();
    assert_eq!(starts, vec![0, 430, 860]);
    assert_eq!(windows[2].tokens, 860..1000);
    assert_eq!(windows[2].tokens.len(), 140);
    assert!(windows[2].text.starts_with("w860 "));
    assert!(windows[2].text.ends_with(" w999"));

    let chunks = chunker.split(&text, 450, 20).expect("split");
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].split_whitespace().count(), 450);
}

#[test]
fn windows_cover_input_with_exact_overlap() {
    for n in 1..=60usize {
        for max in 1..=12usize {
            for overlap in 0..max {
                let params = ChunkParams::new(max, overlap).expect("params");
                let windows = window_ranges(n, params);

                let expected = (n.saturating_sub(overlap)).div_ceil(max - overlap).max(1);
                assert_eq!(windows.len(), expected, "n={n} max={max} overlap={overlap}");
                assert_eq!(windows.len(), params.window_count(n));

                assert_eq!(windows.first().map(|w| w.start), Some(0));
                assert_eq!(windows.last().map(|w| w.end), Some(n));
                for w in &windows {
                    assert!(!w.is_empty() && w.len() <= max);
                }
                for pair in windows.windows(2) {
                    assert_eq!(pair[0].len(), max, "only the final window may be short");
                    assert_eq!(pair[1].start, pair[0].start + (max - overlap));
                    assert_eq!(pair[0].end - pair[1].start, overlap, "no gaps, exact overlap");
                }
            }
        }
    }
}

#[test]
fn empty_input_has_no_windows() {
    let chunker = Chunker::new(Box::new(WhitespaceTokenizer));
    assert!(chunker.split("", 10, 2).expect("split").is_empty());
    assert!(chunker.split("   \n  ", 10, 2).expect("split").is_empty());
    assert!(window_ranges(0, ChunkParams::new(3, 1).expect("params")).is_empty());
}

#[test]
fn short_input_is_one_window_even_below_overlap() {
    let chunker = Chunker::new(Box::new(WhitespaceTokenizer));
    let chunks = chunker.split("Tear down this wall", 450, 20).expect("split");
    assert_eq!(chunks, vec!["Tear down this wall".to_string()]);
}

#[test]
fn invalid_params_are_input_errors() {
    let chunker = Chunker::new(Box::new(WhitespaceTokenizer));
    for (max, overlap) in [(0, 0), (5, 5), (5, 9)] {
        let err = chunker.split("some text", max, overlap).expect_err("must reject");
        assert!(matches!(err, ragdb_core::Error::InvalidInput(_)), "{err}");
    }
}

#[test]
fn window_text_preserves_source_spacing() {
    let chunker = Chunker::new(Box::new(WhitespaceTokenizer));
    let chunks = chunker.split("one  two\nthree four", 3, 1).expect("split");
    assert_eq!(chunks, vec!["one  two\nthree".to_string(), "three four".to_string()]);
}

#[test]
fn unicode_policy_counts_words_not_punctuation() {
    let chunker = Chunker::new(Box::new(UnicodeWordTokenizer));
    let chunks = chunker.split("Yes, we can. Yes, we can!", 3, 0).expect("split");
    assert_eq!(chunks, vec!["Yes, we can".to_string(), "Yes, we can".to_string()]);
}

const WORD_LEVEL_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": { "[UNK]": 0, "the": 1, "only": 2, "thing": 3, "we": 4, "have": 5, "to": 6, "fear": 7 },
    "unk_token": "[UNK]"
  }
}"#;

#[test]
fn model_tokenizer_drives_window_boundaries() {
    let tokenizer = HfTokenizer::from_json(WORD_LEVEL_JSON).expect("tokenizer");
    let text = "the only thing we have to fear, is fear itself";
    // Whitespace pre-tokenizer splits the comma off: 11 tokens.
    assert_eq!(tokenizer.count(text).expect("count"), 11);

    let chunker = Chunker::new(Box::new(tokenizer));
    let chunks = chunker.split(text, 6, 1).expect("split");
    assert_eq!(chunks, vec!["the only thing we have to".to_string(), "to fear, is fear itself".to_string()]);
}
