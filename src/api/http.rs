use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use super::{ApiAction, ApiError, ContactsApi, Result};
use crate::models::{Contact, ImageFile, PaginatedResponse};

/// [`ContactsApi`] over HTTP against a backend rooted at `base_url`.
pub struct HttpContactsApi {
    client: Client,
    base_url: Url,
}

impl HttpContactsApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(base_url.to_string(), e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(
                base_url.to_string(),
                "not a base url".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// `{base}/contacts/{segments..}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidBaseUrl(self.base_url.to_string(), "not a base url".to_string())
            })?
            .pop_if_empty()
            .push("contacts")
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        action: ApiAction,
        request: reqwest::RequestBuilder,
    ) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            let err = ApiError::request(action, e.to_string(), e.status().map(|s| s.as_u16()));
            error!(%action, error = %e, "request failed");
            err
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%action, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = backend_message(&body).unwrap_or_else(|| {
            format!("Request failed with status code {}", status.as_u16())
        });
        error!(%action, status = status.as_u16(), body = %body, "backend rejected request");
        Err(ApiError::request(action, message, Some(status.as_u16())))
    }

    async fn json<T: DeserializeOwned>(action: ApiAction, response: Response) -> Result<T> {
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            error!(%action, error = %e, "malformed response body");
            ApiError::request(action, e.to_string(), Some(status))
        })
    }
}

/// Spring style error bodies carry a human readable `message`.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    async fn list(&self, page: u32, size: u32) -> Result<PaginatedResponse> {
        let action = ApiAction::FetchContacts;
        let url = self.endpoint(&[])?;
        let request = self
            .client
            .get(url)
            .query(&[("page", page), ("size", size)]);
        let response = self.send(action, request).await?;
        Self::json(action, response).await
    }

    async fn get(&self, id: &str) -> Result<Contact> {
        let action = ApiAction::FetchContact;
        let url = self.endpoint(&[id])?;
        let response = self.send(action, self.client.get(url)).await?;
        Self::json(action, response).await
    }

    async fn create(&self, contact: &Contact) -> Result<Contact> {
        let action = ApiAction::SaveContact;
        let url = self.endpoint(&[])?;
        let response = self.send(action, self.client.post(url).json(contact)).await?;
        Self::json(action, response).await
    }

    async fn update(&self, id: &str, contact: &Contact) -> Result<Contact> {
        let action = ApiAction::UpdateContact;
        let url = self.endpoint(&[id])?;
        let response = self.send(action, self.client.put(url).json(contact)).await?;
        Self::json(action, response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let action = ApiAction::DeleteContact;
        let url = self.endpoint(&[id])?;
        self.send(action, self.client.delete(url)).await?;
        Ok(())
    }

    async fn update_image(&self, id: &str, image: &ImageFile) -> Result<()> {
        let action = ApiAction::UpdateImage;
        let url = self.endpoint(&["image"])?;
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime.as_ref())
            .map_err(|e| ApiError::request(action, e.to_string(), None))?;
        let form = Form::new().text("id", id.to_string()).part("file", part);
        self.send(action, self.client.put(url).multipart(form)).await?;
        Ok(())
    }
}
