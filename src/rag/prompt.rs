//! Prompt assembly for retrieval-augmented answers.
//!
//! Combines the system template, prior conversation turns, retrieved
//! excerpts, and the new question into one message list, within a
//! character budget. Retrieved evidence outranks far-past chat turns:
//! when over budget the oldest history turns are dropped first, and the
//! lowest-ranked excerpts only once no history is left.

use crate::completion::ChatMessage;
use crate::conversation::{ConversationTurn, Role};
use crate::index::SearchHit;

/// Format retrieved excerpts for the prompt, each tagged with its
/// source tag.
pub fn format_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("---\n[{}]\n{}\n---", hit.chunk.source_tag, hit.chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the final user message: the question plus its retrieved context.
fn render_user_message(hits: &[SearchHit], question: &str) -> String {
    if hits.is_empty() {
        format!(
            "Question: {}\n\n(No relevant excerpts were retrieved from the document)",
            question
        )
    } else {
        format!(
            "Question: {}\n\nRelevant excerpts from the document:\n{}",
            question,
            format_context(hits)
        )
    }
}

/// Assemble the full prompt for one answer turn.
///
/// The result is: system message, as many of the most recent history
/// turns as fit (in chronological order, whole turns only), then one
/// user message carrying the retrieved excerpts and the question.
pub fn assemble_prompt(
    system: &str,
    history: &[ConversationTurn],
    hits: &[SearchHit],
    question: &str,
    budget_chars: usize,
) -> Vec<ChatMessage> {
    let system_cost = system.chars().count();

    // Drop the lowest-ranked excerpts until the mandatory part fits.
    let mut kept_hits = hits.len();
    let mut user = render_user_message(&hits[..kept_hits], question);
    while kept_hits > 0 && system_cost + user.chars().count() > budget_chars {
        kept_hits -= 1;
        user = render_user_message(&hits[..kept_hits], question);
    }

    // Spend what remains on history, newest turns first.
    let mut remaining = budget_chars.saturating_sub(system_cost + user.chars().count());
    let mut kept_turns: Vec<&ConversationTurn> = Vec::new();
    for turn in history.iter().rev() {
        let cost = turn.content.chars().count();
        if cost > remaining {
            break;
        }
        remaining -= cost;
        kept_turns.push(turn);
    }
    kept_turns.reverse();

    let mut messages = Vec::with_capacity(kept_turns.len() + 2);
    messages.push(ChatMessage::system(system));
    for turn in kept_turns {
        messages.push(match turn.role {
            Role::User => ChatMessage::user(turn.content.clone()),
            Role::Assistant => ChatMessage::assistant(turn.content.clone()),
        });
    }
    messages.push(ChatMessage::user(user));

    messages
}
