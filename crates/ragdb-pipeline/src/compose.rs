//! Glue between retrieval results and an answer composer: provenance
//! headers, excerpt rendering and the grounded prompt template.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use ragdb_core::traits::AnswerComposer;
use ragdb_core::types::{Meta, SearchResult};

/// `key: value` lines in key order followed by a blank line; empty when
/// there is no metadata.
pub fn render_metadata_header(meta: &Meta) -> String {
    if meta.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for (key, value) in meta {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// One numbered excerpt block; `rank` is 1-based.
pub fn render_excerpt(rank: usize, result: &SearchResult) -> String {
    format!(
        "[{rank}] ({id}, part {part}/{total}, score {score:.3})\n{text}",
        id = result.chunk.id,
        part = result.chunk.ordinal + 1,
        total = result.chunk.of_total,
        score = result.score,
        text = result.chunk.text.trim_end(),
    )
}

pub fn render_excerpts(results: &[SearchResult]) -> Vec<String> {
    results.iter().enumerate().map(|(i, r)| render_excerpt(i + 1, r)).collect()
}

/// Prompt sent to a language model: instructions, excerpts, question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub instructions: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            instructions: "Answer the question using only the excerpts below. \
                Cite the excerpts you rely on by their bracketed number, e.g. [2]. \
                If the excerpts do not contain the answer, say that you do not know."
                .to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn render(&self, question: &str, excerpts: &[String]) -> String {
        let mut out = String::with_capacity(self.instructions.len() + question.len() + excerpts.iter().map(String::len).sum::<usize>() + 64);
        out.push_str(&self.instructions);
        out.push_str("\n\nExcerpts:\n");
        if excerpts.is_empty() {
            out.push_str("(none)\n");
        }
        for excerpt in excerpts {
            out.push('\n');
            out.push_str(excerpt);
            out.push('\n');
        }
        out.push_str("\nQuestion: ");
        out.push_str(question.trim());
        out.push_str("\nAnswer:");
        out
    }
}

/// Composer that returns the rendered prompt instead of calling a model.
///
/// Useful for inspecting exactly what a model-backed composer would send.
#[derive(Debug, Clone, Default)]
pub struct PromptEchoComposer {
    template: PromptTemplate,
}

impl PromptEchoComposer {
    pub fn new(template: PromptTemplate) -> Self { Self { template } }
}

impl AnswerComposer for PromptEchoComposer {
    fn compose(&self, question: &str, excerpts: &[String]) -> Result<String> {
        Ok(self.template.render(question, excerpts))
    }
}

/// A composed answer with the results it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SearchResult>,
}
