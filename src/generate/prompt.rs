// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Prompt sent to model providers.

use crate::config::CommitType;

/// System message for chat-style providers.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates meaningful git commit \
messages following the Conventional Commits specification.";

/// Build the user prompt embedding the staged diff.
pub fn build_prompt(diff: &str) -> String {
    let types = CommitType::all()
        .iter()
        .map(CommitType::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the following git diff and generate a concise, meaningful commit message \
following the Conventional Commits specification.
Focus on the main changes and their purpose.

Diff:
{diff}

Requirements:
1. Use one of these types: {types}
2. Format: <type>: <description>
3. Keep the description clear and concise
4. Use present tense, imperative mood
5. Focus on WHY and WHAT, not HOW
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_diff_and_types() {
        let prompt = build_prompt("diff --git a/x b/x\n+hello");
        assert!(prompt.contains("Diff:\ndiff --git a/x b/x\n+hello\n"));
        assert!(prompt.contains(
            "Use one of these types: feat, fix, docs, style, refactor, perf, test, build, ci, chore"
        ));
    }
}
