//! Offline extractive answerer.
//!
//! Picks the sentence that shares the most keywords with the question, then
//! returns the longest run of words in it that the question does not already
//! contain. Words come from the BERT pre-tokenizer, so punctuation inside a
//! run ("Ankara'dır", "2.5") is kept in the returned span. No model weights
//! are involved, so results are fully deterministic.

use super::{
    model::QaModel,
    types::{QaAnswer, QaInput},
};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use tokenizers::{
    OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer,
    pre_tokenizers::bert::BertPreTokenizer,
};
use tracing::debug;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "did", "do", "does", "for", "from", "has",
    "have", "how", "in", "is", "it", "its", "many", "much", "of", "on", "or", "that", "the",
    "this", "to", "was", "were", "what", "when", "where", "which", "who", "whom", "whose", "why",
    "with",
];

pub struct LexicalQaModel {
    name: String,
}

/// A word and its `[start, end)` character offsets.
#[derive(Debug, Clone, PartialEq)]
struct Token {
    text: String,
    start: usize,
    end: usize,
}

impl Token {
    fn key(&self) -> String {
        self.text.to_lowercase()
    }
}

impl LexicalQaModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Synchronous core of [`QaModel::answer`].
    pub fn extract(&self, question: &str, context: &str) -> Result<QaAnswer> {
        let chars: Vec<char> = context.chars().collect();
        let sentences = split_sentences(&chars)?;

        let question_words: HashSet<String> =
            tokenize(question, 0)?.iter().map(Token::key).collect();
        let mut keywords: HashSet<&String> = question_words
            .iter()
            .filter(|w| !is_stopword(w))
            .collect();
        if keywords.is_empty() {
            keywords = question_words.iter().collect();
        }

        let mut best: Option<(&Vec<Token>, usize)> = None;
        for sentence in sentences.iter().filter(|s| !s.is_empty()) {
            let covered: HashSet<String> = sentence
                .iter()
                .map(Token::key)
                .filter(|k| keywords.contains(k))
                .collect();
            let hits = covered.len();
            if best.is_none_or(|(_, top)| hits > top) {
                best = Some((sentence, hits));
            }
        }

        let Some((sentence, hits)) = best else {
            return Ok(QaAnswer {
                answer: String::new(),
                score: 0.0,
                start: 0,
                end: 0,
            });
        };

        let score = if keywords.is_empty() {
            0.0
        } else {
            hits as f64 / keywords.len() as f64
        };

        let span = longest_novel_run(sentence, &question_words).unwrap_or(sentence.as_slice());
        let start = span[0].start;
        let end = span[span.len() - 1].end;

        debug!(
            "Lexical span [{}, {}) covering {}/{} keywords",
            start,
            end,
            hits,
            keywords.len()
        );

        Ok(QaAnswer {
            answer: chars[start..end].iter().collect(),
            score,
            start,
            end,
        })
    }
}

impl Default for LexicalQaModel {
    fn default() -> Self {
        Self::new("lexical")
    }
}

#[async_trait]
impl QaModel for LexicalQaModel {
    async fn answer(&self, input: &QaInput) -> Result<QaAnswer> {
        self.extract(&input.question, &input.context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Words of `text` with character offsets shifted by `offset`.
/// Punctuation-only pieces from the pre-tokenizer are dropped.
fn tokenize(text: &str, offset: usize) -> Result<Vec<Token>> {
    let mut pretokenized = PreTokenizedString::from(text);
    BertPreTokenizer
        .pre_tokenize(&mut pretokenized)
        .map_err(|e| Error::inference(format!("pre-tokenization failed: {}", e)))?;

    Ok(pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Char)
        .into_iter()
        .filter(|(word, _, _)| word.chars().any(char::is_alphanumeric))
        .map(|(word, (start, end), _)| Token {
            text: word.to_string(),
            start: offset + start,
            end: offset + end,
        })
        .collect())
}

fn split_sentences(chars: &[char]) -> Result<Vec<Vec<Token>>> {
    let mut sentences = Vec::new();
    let mut begin = 0;

    for (i, c) in chars.iter().enumerate() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            // Decimal points stay inside the sentence.
            let decimal = *c == '.'
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if !decimal {
                let text: String = chars[begin..i].iter().collect();
                sentences.push(tokenize(&text, begin)?);
                begin = i + 1;
            }
        }
    }
    if begin < chars.len() {
        let text: String = chars[begin..].iter().collect();
        sentences.push(tokenize(&text, begin)?);
    }

    Ok(sentences)
}

/// Longest stretch of words absent from the question, stopwords trimmed from
/// both ends. Earliest wins on ties.
fn longest_novel_run<'a>(
    sentence: &'a [Token],
    question_words: &HashSet<String>,
) -> Option<&'a [Token]> {
    let mut best: Option<&[Token]> = None;

    for run in sentence.split(|t| question_words.contains(&t.key())) {
        let Some(first) = run.iter().position(|t| !is_stopword(&t.key())) else {
            continue;
        };
        let last = run
            .iter()
            .rposition(|t| !is_stopword(&t.key()))
            .unwrap_or(first);
        let trimmed = &run[first..=last];

        if best.is_none_or(|b| trimmed.len() > b.len()) {
            best = Some(trimmed);
        }
    }

    best
}
