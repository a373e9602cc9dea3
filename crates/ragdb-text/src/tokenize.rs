use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use ragdb_core::config::TokenizerKind;
use ragdb_core::{Error, Result};
use unicode_segmentation::UnicodeSegmentation;

/// A token boundary policy.
///
/// `spans` returns the byte ranges of the atomic tokens of `text`, in order
/// and non-overlapping. Text between spans (whitespace, dropped punctuation)
/// belongs to no token.
pub trait Tokenizer: Send + Sync {
    fn name(&self) -> &'static str;
    fn spans(&self, text: &str) -> Result<Vec<Range<usize>>>;

    fn count(&self, text: &str) -> Result<usize> {
        Ok(self.spans(text)?.len())
    }
}

/// Tokens are maximal runs of non-whitespace characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &'static str { "whitespace" }

    fn spans(&self, text: &str) -> Result<Vec<Range<usize>>> {
        let mut spans = Vec::new();
        let mut start = None;
        for (i, ch) in text.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(s)) => { spans.push(s..i); start = None; }
                (false, None) => start = Some(i),
                _ => {}
            }
        }
        if let Some(s) = start { spans.push(s..text.len()); }
        Ok(spans)
    }
}

/// Tokens are Unicode words (UAX #29); punctuation and spacing are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn name(&self) -> &'static str { "unicode-words" }

    fn spans(&self, text: &str) -> Result<Vec<Range<usize>>> {
        Ok(text.unicode_word_indices().map(|(offset, word)| offset..offset + word.len()).collect())
    }
}

/// Tokens are those of a HuggingFace `tokenizer.json`, normally the one
/// shipped with the embedding model so chunk budgets are in model tokens.
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| Error::Tokenizer(format!("Failed to load tokenizer from {}: {}", path.display(), e)))?;
        Ok(Self { inner })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let inner = tokenizers::Tokenizer::from_str(json)
            .map_err(|e| Error::Tokenizer(format!("Failed to parse tokenizer json: {}", e)))?;
        Ok(Self { inner })
    }
}

impl Tokenizer for HfTokenizer {
    fn name(&self) -> &'static str { "model" }

    fn spans(&self, text: &str) -> Result<Vec<Range<usize>>> {
        let enc = self.inner.encode(text, false).map_err(|e| Error::Tokenizer(e.to_string()))?;
        let mut spans: Vec<Range<usize>> = Vec::with_capacity(enc.len());
        for &(start, end) in enc.get_offsets() {
            if start >= end { continue; }
            // Byte-level models can emit several tokens for one character;
            // they share its offsets and count as separate tokens.
            if let Some(prev) = spans.last() {
                if start < prev.start { return Err(Error::Tokenizer("tokenizer offsets are not monotonic".into())); }
            }
            spans.push(start..end);
        }
        Ok(spans)
    }
}

/// Build the configured tokenization policy. `model_dir` must contain a
/// `tokenizer.json` when `kind` is [`TokenizerKind::Model`].
pub fn tokenizer_for(kind: TokenizerKind, model_dir: Option<&Path>) -> Result<Box<dyn Tokenizer>> {
    match kind {
        TokenizerKind::Whitespace => Ok(Box::new(WhitespaceTokenizer)),
        TokenizerKind::UnicodeWords => Ok(Box::new(UnicodeWordTokenizer)),
        TokenizerKind::Model => {
            let dir = model_dir.ok_or_else(|| Error::Config("tokenizer = \"model\" requires embedding.model_dir".into()))?;
            Ok(Box::new(HfTokenizer::from_file(&dir.join("tokenizer.json"))?))
        }
    }
}
