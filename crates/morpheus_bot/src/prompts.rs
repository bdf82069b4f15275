//! Prompt templates sent to the assistant.

use serde::{Deserialize, Serialize};

/// Prompt templates.
///
/// Templates may contain `{max_len}`, and the reply template also `{author}`
/// and `{text}`. Unknown placeholders are left as written.
///
/// # Examples
///
/// ```
/// use morpheus_bot::Prompts;
///
/// let prompts = Prompts::default();
/// let prompt = prompts.reply_prompt("ada_fan", "Hydra is live", 280);
/// assert!(prompt.contains("@ada_fan"));
/// assert!(prompt.contains("Hydra is live"));
/// assert!(prompt.contains("280"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// Regular scheduled post
    pub scheduled: String,
    /// First post of an account that has never posted
    pub bootstrap: String,
    /// Reply to a community post
    pub reply: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            scheduled: "Share ONE brief technical insight about Cardano or DRMZ.\n\
                STRICT REQUIREMENTS:\n\
                - Maximum {max_len} characters\n\
                - Focus on a single point\n\
                - Include 1-2 relevant hashtags\n\
                - Be concise but informative"
                .to_string(),
            bootstrap: "Write your very first post introducing yourself to the community.\n\
                STRICT REQUIREMENTS:\n\
                - Maximum {max_len} characters\n\
                - Say who you are and what you will share\n\
                - Include 1-2 relevant hashtags"
                .to_string(),
            reply: "Write a reply to this post by @{author}:\n\
                \"{text}\"\n\
                STRICT REQUIREMENTS:\n\
                - Maximum {max_len} characters\n\
                - Add one helpful technical point\n\
                - Stay friendly and on topic\n\
                - At most one hashtag"
                .to_string(),
        }
    }
}

impl Prompts {
    /// Prompt for a scheduled post.
    pub fn scheduled_prompt(&self, max_len: usize) -> String {
        self.scheduled.replace("{max_len}", &max_len.to_string())
    }

    /// Prompt for the account's first post.
    pub fn bootstrap_prompt(&self, max_len: usize) -> String {
        self.bootstrap.replace("{max_len}", &max_len.to_string())
    }

    /// Prompt for a reply to `author`'s post `text`.
    pub fn reply_prompt(&self, author: &str, text: &str, max_len: usize) -> String {
        // Substitute the candidate text last so braces inside it survive.
        self.reply
            .replace("{author}", author)
            .replace("{max_len}", &max_len.to_string())
            .replace("{text}", text)
    }
}
