use crate::{Error, Result};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IgnoredAny, MapAccess, Visitor},
};
use std::fmt;

/// Body of `POST /qa`.
///
/// Only a JSON object is accepted; the derived impl would also take a
/// positional array.
#[derive(Debug, Clone)]
pub struct QaRequest {
    pub question: String,
    pub context: String,
}

impl<'de> Deserialize<'de> for QaRequest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(QaRequestVisitor)
    }
}

struct QaRequestVisitor;

impl<'de> Visitor<'de> for QaRequestVisitor {
    type Value = QaRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with `question` and `context` strings")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<QaRequest, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut question: Option<String> = None;
        let mut context: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "question" => {
                    if question.is_some() {
                        return Err(de::Error::duplicate_field("question"));
                    }
                    question = Some(map.next_value()?);
                }
                "context" => {
                    if context.is_some() {
                        return Err(de::Error::duplicate_field("context"));
                    }
                    context = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(QaRequest {
            question: question
                .ok_or_else(|| <A::Error as de::Error>::missing_field("question"))?,
            context: context
                .ok_or_else(|| <A::Error as de::Error>::missing_field("context"))?,
        })
    }
}

impl QaRequest {
    /// Rejects blank fields; the model never sees an empty question or passage.
    pub fn into_input(self) -> Result<QaInput> {
        if self.question.trim().is_empty() {
            return Err(Error::invalid_request("`question` must not be empty"));
        }
        if self.context.trim().is_empty() {
            return Err(Error::invalid_request("`context` must not be empty"));
        }

        Ok(QaInput {
            question: self.question,
            context: self.context,
        })
    }
}

/// A validated question/context pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaInput {
    pub question: String,
    pub context: String,
}

/// Extracted answer span.
///
/// `start` and `end` are character offsets into the context, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

impl QaAnswer {
    /// Returns the text of `context` covered by `[start, end)`.
    pub fn span_of<'a>(&self, context: &'a str) -> Option<&'a str> {
        if self.start > self.end {
            return None;
        }

        let mut indices = context
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(context.len()));
        let begin = indices.nth(self.start)?;
        let finish = if self.end == self.start {
            begin
        } else {
            indices.nth(self.end - self.start - 1)?
        };

        context.get(begin..finish)
    }
}
