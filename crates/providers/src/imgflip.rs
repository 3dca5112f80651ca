//! Imgflip client.
//!
//! Catalog via `GET /get_memes`; rendering via the `caption_image` form
//! endpoint, which takes the captions as plain form fields and answers
//! with an image URL plus a viewable page URL.

use async_trait::async_trait;
use memecp_engine::Template;
use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::provider::{fetch_bytes, MemeProvider, RenderedMeme};

const DEFAULT_BASE_URL: &str = "https://api.imgflip.com";
/// Imgflip's public demo account, same default the hubot integration uses.
const DEFAULT_CREDENTIALS: &str = "imgflip_hubot";

pub struct ImgflipClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

/// Imgflip wraps every payload in a success envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemeList {
    memes: Vec<ImgflipMeme>,
}

#[derive(Debug, Deserialize)]
struct ImgflipMeme {
    id: String,
    name: String,
    url: String,
    box_count: u32,
}

#[derive(Debug, Deserialize)]
struct CaptionedImage {
    url: String,
    page_url: Option<String>,
}

impl ImgflipMeme {
    fn into_template(self) -> Template {
        Template {
            id: self.id,
            name: self.name,
            keywords: Vec::new(),
            styles: Vec::new(),
            example_url: Some(self.url),
            blank_url: None,
            box_count: Some(self.box_count),
        }
    }
}

fn into_data<T>(response: ApiResponse<T>, kind: fn(String) -> ProviderError) -> Result<T> {
    if !response.success {
        return Err(kind(
            response
                .error_message
                .unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    response
        .data
        .ok_or_else(|| kind("response missing data".to_string()))
}

impl ImgflipClient {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    /// Credentials from `IMGFLIP_USERNAME`/`IMGFLIP_PASSWORD`, base URL
    /// override from `IMGFLIP_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("IMGFLIP_USERNAME")
            .unwrap_or_else(|_| DEFAULT_CREDENTIALS.to_string());
        let password = std::env::var("IMGFLIP_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_CREDENTIALS.to_string());
        let mut client = Self::new(username, password)?;
        if let Ok(base_url) = std::env::var("IMGFLIP_BASE_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }
}

#[async_trait]
impl MemeProvider for ImgflipClient {
    fn name(&self) -> &'static str {
        "imgflip"
    }

    async fn templates(&self) -> Result<Vec<Template>> {
        let url = format!("{}/get_memes", self.base_url);
        log::debug!("GET {url}");
        let response: ApiResponse<MemeList> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let list = into_data(response, ProviderError::Catalog)?;
        Ok(list
            .memes
            .into_iter()
            .map(ImgflipMeme::into_template)
            .collect())
    }

    async fn render(&self, template: &Template, top: &str, bottom: &str) -> Result<RenderedMeme> {
        let url = format!("{}/caption_image", self.base_url);
        let form = [
            ("template_id", template.id.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("text0", top),
            ("text1", bottom),
        ];
        let response: ApiResponse<CaptionedImage> = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let captioned = into_data(response, ProviderError::Render)?;

        let image = fetch_bytes(&self.client, &captioned.url).await?;
        Ok(RenderedMeme {
            image,
            mime_type: "image/jpeg".to_string(),
            image_url: captioned.url,
            page_url: captioned.page_url,
        })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        fetch_bytes(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_get_memes_payload() {
        let body = r#"{
            "success": true,
            "data": {
                "memes": [
                    {
                        "id": "181913649",
                        "name": "Drake Hotline Bling",
                        "url": "https://i.imgflip.com/30b1gx.jpg",
                        "width": 1200,
                        "height": 1200,
                        "box_count": 2,
                        "captions": 1330000
                    }
                ]
            }
        }"#;

        let response: ApiResponse<MemeList> = serde_json::from_str(body).unwrap();
        let list = into_data(response, ProviderError::Catalog).unwrap();
        let template = list.memes.into_iter().next().unwrap().into_template();

        assert_eq!(template.id, "181913649");
        assert_eq!(template.name, "Drake Hotline Bling");
        assert_eq!(
            template.example_url.as_deref(),
            Some("https://i.imgflip.com/30b1gx.jpg")
        );
        assert_eq!(template.box_count, Some(2));
        assert!(template.keywords.is_empty());
    }

    #[test]
    fn application_failure_surfaces_error_message() {
        let body = r#"{"success": false, "error_message": "No texts specified"}"#;
        let response: ApiResponse<CaptionedImage> = serde_json::from_str(body).unwrap();

        let err = into_data(response, ProviderError::Render).unwrap_err();
        assert_eq!(err.to_string(), "render failed: No texts specified");
    }

    #[test]
    fn missing_data_is_an_error_even_on_success() {
        let body = r#"{"success": true}"#;
        let response: ApiResponse<MemeList> = serde_json::from_str(body).unwrap();

        assert!(into_data(response, ProviderError::Catalog).is_err());
    }
}
