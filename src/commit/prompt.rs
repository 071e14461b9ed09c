//! Prompt construction for commit message generation.

use crate::llm::ChatMessage;

/// Developer instruction sent ahead of the diff.
pub const COMMIT_INSTRUCTION: &str = "You are an assistant that writes concise, conventional commit \
messages based on the provided git diff. Return the commit message without any quotes.";

/// Build the two-message prompt: the fixed instruction, then the diff verbatim.
pub fn build_commit_prompt(diff: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::developer(COMMIT_INSTRUCTION),
        ChatMessage::user(diff),
    ]
}
