use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::data_url::DataUrl;
use crate::error::AppError;
use crate::prompts::{enhancement_prompt, RealismLevel};

// ----------------------------
// Wire types (generateContent)
// ----------------------------
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

// ----------------------------
// Request assembly
// ----------------------------
pub fn image_request(image: &DataUrl, rendered_prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    inline_data: Some(InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    }),
                    ..Part::default()
                },
                Part {
                    text: Some(rendered_prompt.to_string()),
                    ..Part::default()
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
        }),
    }
}

pub fn text_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(prompt.to_string()),
                ..Part::default()
            }],
        }],
        generation_config: None,
    }
}

// ----------------------------
// Response parsing
// ----------------------------
fn first_candidate_parts(resp: &GenerateContentResponse) -> &[Part] {
    resp.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default()
}

/// First inline image of the first candidate, relabeled as PNG.
pub fn extract_image(resp: &GenerateContentResponse) -> Result<DataUrl, AppError> {
    first_candidate_parts(resp)
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| d.mime_type.starts_with("image/"))
        .map(|d| DataUrl::new("image/png", d.data.clone()))
        .ok_or(AppError::NoImageReturned)
}

/// Text parts of the first candidate, joined and trimmed.
pub fn extract_text(resp: &GenerateContentResponse) -> Result<String, AppError> {
    let text = first_candidate_parts(resp)
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::service("The AI returned an empty response."));
    }
    Ok(text.to_string())
}

/// Provider message from an error body, or the raw status line.
pub fn service_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.trim().is_empty() => parsed.error.message,
        _ if body.trim().is_empty() => format!("HTTP {status}"),
        _ => format!("HTTP {status}: {}", body.trim()),
    }
}

// ----------------------------
// Calls
// ----------------------------
async fn generate_content(
    config: &ApiConfig,
    model: &str,
    body: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AppError> {
    if !config.has_api_key() {
        return Err(AppError::MissingApiKey);
    }

    let resp = Request::post(&config.generate_url(model))
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", config.api_key.trim())
        .json(body)
        .map_err(|e| AppError::service(e.to_string()))?
        .send()
        .await
        .map_err(|e| AppError::service(e.to_string()))?;

    if !resp.ok() {
        let text = resp.text().await.unwrap_or_default();
        return Err(AppError::service(service_error_message(resp.status(), &text)));
    }

    resp.json::<GenerateContentResponse>()
        .await
        .map_err(|e| AppError::service(format!("unreadable response: {e}")))
}

/// Parses the photo to send; only image MIME types may reach the endpoint.
pub fn image_payload(image_url: &str) -> Result<DataUrl, AppError> {
    let image = DataUrl::parse(image_url)?;
    if !image.is_image() {
        return Err(AppError::MalformedImage(format!(
            "not an image: {}",
            image.mime_type
        )));
    }
    Ok(image)
}

/// Sends the photo and the level's rendered prompt; returns a PNG data URL.
pub async fn generate_background(
    config: &ApiConfig,
    image_url: &str,
    prompt: &str,
    level: RealismLevel,
) -> Result<String, AppError> {
    let image = image_payload(image_url)?;
    let body = image_request(&image, &level.render(prompt));
    let resp = generate_content(config, &config.image_model, &body).await?;
    extract_image(&resp).map(|url| url.to_string())
}

pub async fn enhance_prompt(config: &ApiConfig, short_text: &str) -> Result<String, AppError> {
    let body = text_request(&enhancement_prompt(short_text));
    let resp = generate_content(config, &config.text_model, &body).await?;
    extract_text(&resp)
}
