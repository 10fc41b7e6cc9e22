//! Prompt builders for the review request.
//!
//! Keep the wording stable; the posted comments rely on the three sections
//! and the two verdict phrases.

/// System-role instruction sent with every review.
pub const SYSTEM_PROMPT: &str = "\
You are an expert code review bot. Your task is to review a pull request based on the provided code diff.

Please provide your review in the following format:
1.  **Summary:** A brief, one-sentence summary of the changes.
2.  **Review:** A bulleted list of specific feedback. Focus on potential bugs, style issues, security vulnerabilities, or performance improvements.
3.  **Overall:** A final \"Looks good to me!\" or \"Needs changes.\"

Keep your review concise and constructive. If there are no issues, just say \"Looks good to me!\".";

/// Build the user message: the diff fenced as `diff`.
pub fn build_review_prompt(diff: &str) -> String {
    format!("Please review the following code diff:\n\n```diff\n{diff}\n```")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_is_the_fenced_diff() {
        let diff = "diff --git a/a.rs b/a.rs\n+fn main() {}\n";
        assert_eq!(
            build_review_prompt(diff),
            "Please review the following code diff:\n\n```diff\ndiff --git a/a.rs b/a.rs\n+fn main() {}\n\n```"
        );
        assert_eq!(
            build_review_prompt("+x"),
            "Please review the following code diff:\n\n```diff\n+x\n```"
        );
    }

    #[test]
    fn system_prompt_asks_for_three_sections() {
        assert!(SYSTEM_PROMPT.starts_with("You are an expert code review bot."));
        for section in ["**Summary:**", "**Review:**", "**Overall:**"] {
            assert!(SYSTEM_PROMPT.contains(section), "{section}");
        }
        assert!(SYSTEM_PROMPT.contains("\"Looks good to me!\" or \"Needs changes.\""));
        assert!(SYSTEM_PROMPT.ends_with("just say \"Looks good to me!\"."));
    }
}
