use serde::Serialize;
use serde_json::Value;

/// Instruction placed in front of the note text for every summary request.
pub const PROMPT_PREFIX: &str = "Summarize this note in 2-3 sentences: ";
/// Cap on the number of tokens the model may generate for a summary.
pub const MAX_NEW_TOKENS: u32 = 100;
/// Number of characters of note text kept in a placeholder summary.
pub const PLACEHOLDER_TEXT_LEN: usize = 50;

#[derive(Clone, Debug)]
pub struct InferenceConfig {
    /// Base URL that model identifiers are appended to.
    pub base_url: String,
    /// Model identifier, e.g. `facebook/bart-large-cnn`.
    pub model: String,
    /// Optional bearer credential. An empty key is treated as no key.
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InferenceParameters {
    pub max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: InferenceParameters,
}

impl InferenceRequest {
    pub fn summarize(text: &str) -> Self {
        Self {
            inputs: format!("{PROMPT_PREFIX}{text}"),
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegradedReason {
    /// The inference API answered with JSON in neither known shape.
    UnexpectedResponse,
    /// The inference API couldn't be reached or didn't answer with JSON.
    RequestFailed,
}

impl DegradedReason {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::UnexpectedResponse => "Could not generate summary: ",
            Self::RequestFailed => "Mock Summary: ",
        }
    }

    /// Build the placeholder summary for a note's text.
    pub fn placeholder(&self, text: &str) -> String {
        // Counts Unicode scalar values. A UTF-16 count would stop one
        // character earlier when the text holds characters outside the BMP.
        let truncated: String = text.chars().take(PLACEHOLDER_TEXT_LEN).collect();
        format!("{}{truncated}...", self.prefix())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SummaryOutcome {
    Generated(String),
    Degraded {
        reason: DegradedReason,
        summary: String,
    },
}

impl SummaryOutcome {
    pub fn degraded(reason: DegradedReason, text: &str) -> Self {
        Self::Degraded {
            reason,
            summary: reason.placeholder(text),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn into_summary(self) -> String {
        match self {
            Self::Generated(summary) | Self::Degraded { summary, .. } => summary,
        }
    }
}

/// Pull a summary out of an inference response. Summarization models answer
/// with `summary_text` and generic text generation models with
/// `generated_text`, both inside the first element of an array.
pub fn extract_summary(value: &Value) -> Option<String> {
    let first = value.get(0)?;
    ["summary_text", "generated_text"]
        .into_iter()
        .filter_map(|field| first.get(field).and_then(Value::as_str))
        .find(|summary| !summary.is_empty())
        .map(str::to_string)
}
