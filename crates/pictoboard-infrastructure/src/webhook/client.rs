//! Reqwest-backed recognition client.

use async_trait::async_trait;
use reqwest::multipart;

use pictoboard_core::error::{PictoError, Result};
use pictoboard_core::pictogram::PictogramDescriptor;
use pictoboard_core::recognition::RecognitionClient;

use crate::settings::Settings;
use crate::webhook::dto;

/// HTTP client for the recognition webhook endpoints.
pub struct WebhookClient {
    http: reqwest::Client,
    search_url: String,
    upload_url: String,
}

impl WebhookClient {
    /// Builds a client from settings (endpoints + request timeout).
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|err| PictoError::collaborator(format!("failed to build client: {err}")))?;

        Ok(Self {
            http,
            search_url: settings.search_url.clone(),
            upload_url: settings.upload_url.clone(),
        })
    }

    async fn read_success_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| PictoError::collaborator(format!("failed to read response: {err}")))?;

        if !status.is_success() {
            return Err(PictoError::collaborator(format!(
                "collaborator answered with status {status}"
            )));
        }
        Ok(body)
    }
}

#[async_trait]
impl RecognitionClient for WebhookClient {
    async fn search_text(&self, query: &str) -> Result<Vec<PictogramDescriptor>> {
        let query = query.trim();
        tracing::debug!("searching pictograms for '{query}'");

        let response = self
            .http
            .post(&self.search_url)
            .json(&serde_json::json!({ "elemento_principal": query }))
            .send()
            .await
            .map_err(|err| PictoError::collaborator(format!("search request failed: {err}")))?;

        let body = Self::read_success_body(response).await?;
        dto::descriptors_from_response(&body, query)
    }

    async fn recognize_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<Vec<PictogramDescriptor>> {
        tracing::debug!("uploading image '{file_name}' ({} bytes)", image.len());

        let part = multipart::Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|err| PictoError::collaborator(format!("invalid image mime type: {err}")))?;
        let form = multipart::Form::new().part("imagen", part);

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| PictoError::collaborator(format!("upload request failed: {err}")))?;

        let body = Self::read_success_body(response).await?;
        // Image recognition carries no query to echo.
        dto::descriptors_from_response(&body, "")
    }
}
