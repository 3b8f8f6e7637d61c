//! Google Cloud Vision `TEXT_DETECTION` client.

use crate::core::{OcrConfig, TextDetector};
use crate::errors::{GeneratorError, Result};
use crate::types::DetectedTextRegion;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as the `key` query parameter
    ApiKey(String),
    /// Sent as a bearer token
    AccessToken(String),
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    api_key: Option<String>,
    access_token: Option<String>,
}

impl Credential {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::ConfigurationError(format!(
                "cannot read credentials {}: {}",
                path.display(),
                e
            ))
        })?;
        let file: CredentialsFile = serde_json::from_str(&content)?;

        match (file.api_key, file.access_token) {
            (Some(key), _) if !key.trim().is_empty() => Ok(Credential::ApiKey(key)),
            (_, Some(token)) if !token.trim().is_empty() => Ok(Credential::AccessToken(token)),
            _ => Err(GeneratorError::ConfigurationError(format!(
                "{} holds neither api_key nor access_token",
                path.display()
            ))),
        }
    }
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<ImageRequest<'a>>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: Image,
    features: Vec<Feature<'a>>,
}

#[derive(Serialize)]
struct Image {
    content: String,
}

#[derive(Serialize)]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextAnnotation {
    #[serde(default)]
    description: String,
    bounding_poly: Option<BoundingPoly>,
}

#[derive(Debug, Deserialize)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<Vertex>,
}

// The service omits zero coordinates
#[derive(Debug, Deserialize)]
struct Vertex {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Status,
}

/// Turn an `images:annotate` response body into regions. The first
/// annotation is the whole detected text and is dropped.
pub fn parse_annotations(body: &str) -> Result<Vec<DetectedTextRegion>> {
    let response: AnnotateResponse = serde_json::from_str(body)?;
    let image = match response.responses.into_iter().next() {
        Some(image) => image,
        None => return Ok(vec![]),
    };

    if let Some(status) = image.error {
        if !status.message.is_empty() {
            return Err(GeneratorError::OcrFailed(status.message));
        }
    }

    Ok(image
        .text_annotations
        .into_iter()
        .skip(1)
        .filter_map(|annotation| {
            let vertices = annotation.bounding_poly?.vertices;
            if vertices.is_empty() {
                return None;
            }
            let min_x = vertices.iter().map(|v| v.x).fold(f64::INFINITY, f64::min);
            let min_y = vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
            let max_x = vertices.iter().map(|v| v.x).fold(f64::NEG_INFINITY, f64::max);
            let max_y = vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);
            Some(DetectedTextRegion::new(
                annotation.description,
                (min_x, min_y),
                (max_x, max_y),
            ))
        })
        .collect())
}

pub struct VisionClient {
    client: Client,
    endpoint: String,
    credential: Credential,
}

impl VisionClient {
    pub fn new(endpoint: impl Into<String>, credential: Credential, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::OcrFailed(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            credential,
        })
    }

    /// Credentials come from `credentials_path`, else from the
    /// `GOOGLE_APPLICATION_CREDENTIALS` file.
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        let path = config
            .credentials_path
            .clone()
            .or_else(|| std::env::var_os(CREDENTIALS_ENV).map(PathBuf::from))
            .ok_or_else(|| {
                GeneratorError::ConfigurationError(format!(
                    "no credentials path and {} is unset",
                    CREDENTIALS_ENV
                ))
            })?;

        let credential = Credential::from_file(&path)?;
        Self::new(
            config.endpoint.clone(),
            credential,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub async fn annotate(&self, image: &[u8]) -> Result<Vec<DetectedTextRegion>> {
        let request = AnnotateRequest {
            requests: vec![ImageRequest {
                image: Image {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        };

        let builder = match &self.credential {
            Credential::ApiKey(key) => self
                .client
                .post(&self.endpoint)
                .query(&[("key", key.as_str())]),
            Credential::AccessToken(token) => self.client.post(&self.endpoint).bearer_auth(token),
        };

        debug!("Vision request: {} bytes of PNG", image.len());

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::OcrFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::OcrFailed(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(GeneratorError::OcrFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        parse_annotations(&body)
    }
}

#[async_trait]
impl TextDetector for VisionClient {
    async fn detect_text(&self, image: &[u8]) -> Vec<DetectedTextRegion> {
        match self.annotate(image).await {
            Ok(regions) => regions,
            Err(e) => {
                warn!("Text detection failed: {}", e);
                vec![]
            }
        }
    }
}

/// Stand-in used when OCR is off or has no usable credentials.
pub struct DisabledDetector;

#[async_trait]
impl TextDetector for DisabledDetector {
    async fn detect_text(&self, _image: &[u8]) -> Vec<DetectedTextRegion> {
        vec![]
    }

    fn is_available(&self) -> bool {
        false
    }
}

pub fn detector_from_config(config: &OcrConfig) -> Box<dyn TextDetector> {
    if !config.enabled {
        return Box::new(DisabledDetector);
    }

    match VisionClient::from_config(config) {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!("OCR disabled: {}", e);
            Box::new(DisabledDetector)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_full_text_annotation() {
        let body = r#"{
            "responses": [{
                "textAnnotations": [
                    {"description": "Sign in\nNow", "boundingPoly": {"vertices": [{"x": 0, "y": 0}]}},
                    {"description": "Sign", "boundingPoly": {"vertices": [
                        {"y": 2}, {"x": 30, "y": 2}, {"x": 30, "y": 14}, {"y": 14}
                    ]}},
                    {"description": "in", "boundingPoly": {"vertices": [
                        {"x": 34, "y": 2}, {"x": 44, "y": 2}, {"x": 44, "y": 14}, {"x": 34, "y": 14}
                    ]}}
                ]
            }]
        }"#;

        let regions = parse_annotations(body).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "Sign");
        assert_eq!(regions[0].top_left.x, 0.0);
        assert_eq!(regions[0].bottom_right.x, 30.0);
        assert_eq!(regions[0].area(), 360.0);
    }

    #[test]
    fn test_parse_reports_service_error() {
        let body = r#"{"responses": [{"error": {"code": 3, "message": "Bad image data."}}]}"#;
        assert!(matches!(
            parse_annotations(body),
            Err(GeneratorError::OcrFailed(message)) if message == "Bad image data."
        ));
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_annotations(r#"{"responses": [{}]}"#).unwrap().is_empty());
        assert!(parse_annotations("{}").unwrap().is_empty());
    }

    #[test]
    fn test_credentials_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"access_token": "ya29.token"}}"#).unwrap();
        assert_eq!(
            Credential::from_file(file.path()).unwrap(),
            Credential::AccessToken("ya29.token".to_string())
        );

        let mut empty = tempfile::NamedTempFile::new().unwrap();
        write!(empty, r#"{{"type": "service_account"}}"#).unwrap();
        assert!(Credential::from_file(empty.path()).is_err());
    }

    #[test]
    fn test_disabled_when_ocr_off() {
        let config = OcrConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!detector_from_config(&config).is_available());
    }

    #[test]
    fn test_disabled_when_credentials_missing() {
        let config = OcrConfig {
            credentials_path: Some(PathBuf::from("/nonexistent/credentials.json")),
            ..Default::default()
        };
        assert!(!detector_from_config(&config).is_available());
    }
}
