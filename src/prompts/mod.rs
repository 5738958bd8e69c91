//! Prompts for podcast script generation
//!
//! This module holds the instructions sent to the text generation service
//! and the header/footer wrapped around the script it returns.

/// First line of every saved script
pub const SCRIPT_HEADER: &str = "PODCAST SCRIPT GENERATED FROM BLOG CONTENT";

/// Footer lines start with this text
pub const SCRIPT_FOOTER_PREFIX: &str = "Script generated";

/// System prompt for the script writer
pub const SCRIPT_SYSTEM_PROMPT: &str = r#"You are an expert podcast script writer. Your task is to transform blog content into an engaging, conversational podcast script that sounds natural when read aloud.

Guidelines:
1. Create a compelling introduction that hooks the listener
2. Structure the content in a logical flow with smooth transitions
3. Use conversational language that sounds natural in audio format
4. Include brief pauses and emphasis markers for better speech synthesis
5. Add engaging elements like rhetorical questions and listener engagement
6. Keep sentences at moderate length for clear speech
7. Include a memorable conclusion with key takeaways
8. Format the script clearly with sections and speaker notes

The script should be approximately 3-7 minutes when read aloud (roughly 450-1050 words)."#;

/// Builds the user prompt for one article
///
/// # Examples
///
/// ```
/// use blogcast::prompts::build_script_prompt;
///
/// let prompt = build_script_prompt("Title: Rust\n\nContent:\nOwnership.");
/// assert!(prompt.contains("Ownership."));
/// assert!(prompt.contains("without any markdown formatting"));
/// ```
pub fn build_script_prompt(article_text: &str) -> String {
    format!(
        r#"Transform the following blog content into an engaging podcast script:

{}

Create a podcast script that:
- Has a catchy introduction
- Presents the main points in an engaging, conversational way
- Includes natural transitions between topics
- Ends with a strong conclusion and call-to-action
- Is optimized for text-to-speech synthesis

Format the output as a clean script without any markdown formatting."#,
        article_text.trim()
    )
}

/// Wraps a generated script with the metadata header and footer
///
/// The header and footer are stripped again before synthesis.
pub fn format_script(script: &str, model: &str) -> String {
    format!(
        "{}\n\n{}\n\n---\n{} using OpenAI {}\nReady for text-to-speech conversion",
        SCRIPT_HEADER,
        script.trim(),
        SCRIPT_FOOTER_PREFIX,
        model
    )
}
