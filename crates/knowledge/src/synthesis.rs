//! Response synthesizer.
//!
//! Turns a `Retrieval` into the `{query, body}` record handed to the
//! presentation layer. Pure: same inputs, same answer.

use crate::retrieval::{QueryRetrieval, Retrieval};
use docqa_core::AnswerMessages;
use serde::{Deserialize, Serialize};

/// A rendered answer. Markup is left to whoever displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub query: String,
    pub body: String,
}

impl Answer {
    /// Markdown block: bold question and answer labels, as the chat UI shows them.
    pub fn to_markdown(&self, messages: &AnswerMessages) -> String {
        format!(
            "**{}:** {}\n\n**{}:** {}",
            messages.question_label, self.query, messages.answer_label, self.body
        )
    }
}

/// Render one retrieval outcome.
pub fn synthesize(query: &str, retrieval: &Retrieval, messages: &AnswerMessages) -> Answer {
    let body = match retrieval {
        Retrieval::NoContent => messages.no_content.clone(),
        Retrieval::FragmentsOnly { fragments } => {
            format!("{}\n\n{}", fragments.join(" "), messages.no_summary)
        }
        Retrieval::WithSummaries {
            fragments,
            summaries,
        } => format!(
            "{}\n\n{}: {}",
            fragments.join(" "),
            messages.summary_label,
            summaries.join(" ")
        ),
    };

    Answer {
        query: query.to_string(),
        body,
    }
}

/// Render a whole batch, keeping its order.
pub fn synthesize_all(results: &[QueryRetrieval], messages: &AnswerMessages) -> Vec<Answer> {
    results
        .iter()
        .map(|r| synthesize(&r.query, &r.retrieval, messages))
        .collect()
}
