use std::ops::Range;

use ragdb_core::{Error, Result};
use tracing::debug;

use crate::tokenize::Tokenizer;

/// Window size and overlap, both counted in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    max_tokens: usize,
    overlap_tokens: usize,
}

impl ChunkParams {
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(Error::invalid("max_tokens must be positive"));
        }
        if overlap_tokens >= max_tokens {
            return Err(Error::invalid(format!(
                "overlap_tokens ({overlap_tokens}) must be smaller than max_tokens ({max_tokens})"
            )));
        }
        Ok(Self { max_tokens, overlap_tokens })
    }

    pub fn max_tokens(&self) -> usize { self.max_tokens }
    pub fn overlap_tokens(&self) -> usize { self.overlap_tokens }

    /// Distance in tokens between the starts of consecutive windows.
    pub fn stride(&self) -> usize { self.max_tokens - self.overlap_tokens }

    /// Number of windows produced for `n_tokens` tokens:
    /// `ceil((n - overlap) / stride)`, at least one for non-empty input.
    pub fn window_count(&self, n_tokens: usize) -> usize {
        if n_tokens == 0 {
            return 0;
        }
        n_tokens.saturating_sub(self.overlap_tokens).div_ceil(self.stride()).max(1)
    }
}

/// Token-index windows covering `0..n_tokens`.
///
/// Window `i` starts at `i * stride`; every window but the last holds exactly
/// `max_tokens` tokens and shares `overlap_tokens` with its successor.
pub fn window_ranges(n_tokens: usize, params: ChunkParams) -> Vec<Range<usize>> {
    let mut windows = Vec::with_capacity(params.window_count(n_tokens));
    let mut start = 0usize;
    while start < n_tokens {
        let end = (start + params.max_tokens).min(n_tokens);
        windows.push(start..end);
        if end == n_tokens { break; }
        start += params.stride();
    }
    windows
}

/// One chunk of a source text.
///
/// `tokens` indexes the tokenizer output; `bytes` is the slice of the source
/// from the first token's start to the last token's end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWindow {
    pub text: String,
    pub tokens: Range<usize>,
    pub bytes: Range<usize>,
}

pub struct Chunker {
    tokenizer: Box<dyn Tokenizer>,
}

impl Chunker {
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self { Self { tokenizer } }

    pub fn tokenizer(&self) -> &dyn Tokenizer { self.tokenizer.as_ref() }

    /// Split `text` into overlapping token windows and return their text.
    pub fn split(&self, text: &str, max_tokens: usize, overlap_tokens: usize) -> Result<Vec<String>> {
        let params = ChunkParams::new(max_tokens, overlap_tokens)?;
        Ok(self.windows(text, params)?.into_iter().map(|w| w.text).collect())
    }

    pub fn windows(&self, text: &str, params: ChunkParams) -> Result<Vec<TextWindow>> {
        let spans = self.tokenizer.spans(text)?;
        let windows = window_ranges(spans.len(), params)
            .into_iter()
            .map(|tokens| {
                let bytes = spans[tokens.start].start..spans[tokens.end - 1].end;
                let slice = text
                    .get(bytes.clone())
                    .ok_or_else(|| Error::Tokenizer(format!("token span {bytes:?} is not on a char boundary")))?;
                Ok(TextWindow { text: slice.to_string(), tokens, bytes })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(tokenizer = self.tokenizer.name(), tokens = spans.len(), windows = windows.len(), "chunked text");
        Ok(windows)
    }
}
