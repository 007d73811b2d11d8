//! Direct lesson generation through the Gemini `generateContent` API.
//!
//! Used as the fallback when the task backend is unreachable. The model is
//! asked for a JSON document with a title, a three-part script and Manim
//! scene code; only script and code are kept.

use crate::backend::base::{GenerationError, LessonGenerator, LessonPlan};
use async_trait::async_trait;
use aura_protocol::config_models::FallbackSettings;
use aura_protocol::project_models::ScriptContent;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const MANIM_SYSTEM_INSTRUCTION: &str = r#"You generate Python code for the Manim Community Edition library, producing short educational animations for math teachers.

Rules:
- The main class is always `class MathLessonScene(Scene):`.
- Use MathTex with raw strings for every formula, e.g. MathTex(r"f'(x) = nx^{n-1}").
- The visible frame spans -7..7 horizontally and -4..4 vertically. Put the title at UP and keep visuals centered.
- Output raw Python only: no markdown fences, no commentary.
- Start with `title = Text("Lesson Title").to_edge(UP)` and `self.play(Write(title))`, use Create for axes and shapes and Transform for derivations.
- Stick to standard objects: Axes, Line, Circle, Polygon, ValueTracker.

Also write a narration script with an intro, an explanation and a conclusion."#;

/// [`LessonGenerator`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiLessonGenerator {
    client: Client,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    base_url: String,
}

impl GeminiLessonGenerator {
    /// Create a generator with an explicit API key.
    ///
    /// A `None` key is accepted here; [`LessonGenerator::generate`] then
    /// fails with `GenerationError::MissingCredentials`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::ApiError` if the HTTP client cannot be built.
    pub fn new(settings: &FallbackSettings, api_key: Option<String>) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| GenerationError::ApiError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: settings.api_key_env.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a generator reading the API key from the environment variable
    /// named in `settings`.
    pub fn from_env(settings: &FallbackSettings) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&settings.api_key_env).ok();
        Self::new(settings, api_key)
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(topic: &str) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": MANIM_SYSTEM_INSTRUCTION }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("TOPIC TO VISUALIZE: \"{topic}\"") }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "script": {
                            "type": "OBJECT",
                            "properties": {
                                "intro": { "type": "STRING" },
                                "explanation": { "type": "STRING" },
                                "conclusion": { "type": "STRING" }
                            }
                        },
                        "manimCode": { "type": "STRING" }
                    }
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: Option<String>,
}

/// The JSON document the model is asked to produce.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LessonDocument {
    #[serde(default)]
    title: String,
    script: ScriptContent,
    manim_code: String,
}

/// Parse the model's text answer into a lesson plan.
fn parse_lesson(text: &str, topic: &str) -> Result<LessonPlan, GenerationError> {
    let document: LessonDocument = serde_json::from_str(text)
        .map_err(|e| GenerationError::InvalidResponse(format!("Failed to parse lesson JSON: {e}")))?;

    if !document.script.is_complete() {
        return Err(GenerationError::InvalidResponse(
            "Lesson script is incomplete".to_string(),
        ));
    }
    if document.manim_code.trim().is_empty() {
        return Err(GenerationError::InvalidResponse(
            "Lesson code is empty".to_string(),
        ));
    }

    let title = if document.title.trim().is_empty() {
        topic.to_string()
    } else {
        document.title
    };

    Ok(LessonPlan {
        title,
        script: document.script,
        generated_code: document.manim_code,
    })
}

#[async_trait]
impl LessonGenerator for GeminiLessonGenerator {
    async fn generate(&self, topic: &str) -> Result<LessonPlan, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingCredentials(self.api_key_env.clone()))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, "Requesting lesson plan");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(topic))
            .send()
            .await
            .map_err(|e| GenerationError::ApiError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::ApiError(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::ApiError(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| GenerationError::InvalidResponse("Empty response from model".to_string()))?;

        parse_lesson(&text, topic)
    }
}
