//! OpenAI script writer and speech synthesizer
//!
//! Script generation uses `/v1/chat/completions`; synthesis uses
//! `/v1/audio/speech` and streams the audio body straight to disk.

use crate::config::OpenAiConfig;
use crate::error::{BlogcastError, Result};
use crate::prompts::{build_script_prompt, SCRIPT_SYSTEM_PROMPT};
use crate::services::{status_error, ScriptWriter, SpeechSynthesizer};
use crate::voice::Voice;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

fn build_client(config: &OpenAiConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(concat!("blogcast/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BlogcastError::Config(format!("Failed to create HTTP client: {}", e)).into())
}

fn api_key(config: &OpenAiConfig) -> Result<&str> {
    config
        .api_key
        .as_deref()
        .ok_or_else(|| BlogcastError::MissingCredentials("OPENAI_API_KEY".to_string()).into())
}

fn endpoint(config: &OpenAiConfig, path: &str) -> String {
    format!("{}{}", config.api_base.trim_end_matches('/'), path)
}

/// Request structure for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response structure from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// OpenAI chat-backed [`ScriptWriter`]
///
/// # Examples
///
/// ```
/// use blogcast::config::OpenAiConfig;
/// use blogcast::services::{OpenAiScriptWriter, ScriptWriter};
///
/// let writer = OpenAiScriptWriter::new(OpenAiConfig::default()).unwrap();
/// assert_eq!(writer.model_name(), "gpt-4o");
/// ```
pub struct OpenAiScriptWriter {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiScriptWriter {
    /// Create a new script writer
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = build_client(&config)?;
        tracing::debug!(
            "Initialized OpenAI script writer: base={}, model={}",
            config.api_base,
            config.model
        );
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ScriptWriter for OpenAiScriptWriter {
    async fn write_script(&self, article_text: &str) -> Result<String> {
        let key = api_key(&self.config)?;
        let user_prompt = build_script_prompt(article_text);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SCRIPT_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        tracing::debug!(
            "Sending chat request: model={}, prompt_chars={}",
            self.config.model,
            user_prompt.len()
        );

        let response = self
            .client
            .post(endpoint(&self.config, "/v1/chat/completions"))
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI chat request failed: {}", e);
                BlogcastError::ScriptGeneration(format!("OpenAI request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI returned error {}: {}", status, error_text);
            return Err(status_error(
                "OpenAI",
                status,
                &error_text,
                BlogcastError::ScriptGeneration,
            )
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            BlogcastError::ScriptGeneration(format!("Failed to parse OpenAI response: {}", e))
        })?;

        if let Some(usage) = &body.usage {
            tracing::debug!(
                "OpenAI usage: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let script = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                BlogcastError::ScriptGeneration("No response generated from OpenAI API".to_string())
            })?;

        Ok(script)
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }
}

/// Request structure for the speech API
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

/// Formats the speech API can return
const SPEECH_FORMATS: [&str; 6] = ["mp3", "opus", "aac", "flac", "wav", "pcm"];

/// OpenAI speech-backed [`SpeechSynthesizer`]
pub struct OpenAiSpeech {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiSpeech {
    /// Create a new speech synthesizer
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = build_client(&config)?;
        tracing::debug!(
            "Initialized OpenAI speech: base={}, model={}",
            config.api_base,
            config.tts_model
        );
        Ok(Self { client, config })
    }

    /// Response format for `path`, chosen from its extension
    fn response_format(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        SPEECH_FORMATS
            .iter()
            .find(|f| **f == ext)
            .copied()
            .unwrap_or("mp3")
    }

    async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64> {
        let io_error = |e| BlogcastError::io(path, e);
        let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes = chunk.map_err(|e| {
                BlogcastError::Synthesis(format!("Audio stream interrupted: {}", e))
            })?;
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_error)?;

        Ok(written)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(&self, text: &str, voice: Voice, path: &Path) -> Result<u64> {
        let key = api_key(&self.config)?;
        if text.trim().is_empty() {
            return Err(BlogcastError::Synthesis(
                "No valid script content found for audio generation".to_string(),
            )
            .into());
        }

        let request = SpeechRequest {
            model: &self.config.tts_model,
            voice: voice.as_str(),
            input: text,
            response_format: Self::response_format(path),
        };

        tracing::debug!(
            "Sending speech request: model={}, voice={}, chars={}",
            self.config.tts_model,
            voice,
            text.chars().count()
        );

        let response = self
            .client
            .post(endpoint(&self.config, "/v1/audio/speech"))
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI speech request failed: {}", e);
                BlogcastError::Synthesis(format!("OpenAI request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI speech returned error {}: {}", status, error_text);
            return Err(
                status_error("OpenAI", status, &error_text, BlogcastError::Synthesis).into(),
            );
        }

        match Self::stream_to_file(response, path).await {
            Ok(written) => {
                tracing::debug!("Wrote {} bytes to {}", written, path.display());
                Ok(written)
            }
            Err(e) => {
                // A truncated file must not be mistaken for a finished part.
                if let Err(remove_err) = tokio::fs::remove_file(path).await {
                    tracing::warn!(
                        "Could not remove partial audio {}: {}",
                        path.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }
}
