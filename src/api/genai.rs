use serde::{Deserialize, Serialize};

use crate::{
    client::NewsDesk,
    error::{ClientError, ResponseError},
    http::{HttpClient, HttpRequest},
};

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl NewsDesk {
    /// Single prompt-in, completion-out call against the generative-text
    /// service, under the shared retry contract.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoints.genai, self.config.genai_model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };
        let req = HttpRequest::post(url)
            .query("key", &self.config.genai_api_key)
            .json(&body)?;
        let res: GenerateResponse = self.request(req).await?;

        res.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                ResponseError::unexpected_structure("completion returned no candidates").into()
            })
    }
}
