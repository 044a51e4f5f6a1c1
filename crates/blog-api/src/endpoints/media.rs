//! POST /media/upload

use async_trait::async_trait;
use blog_common::AppError;
use blog_core::{DomainError, GatewayResult, MediaFile, MediaGateway, UploadedMedia};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::client::{ApiClient, RequestOptions};
use crate::dto::UploadResponse;

pub const NO_FILES_PROVIDED: &str = "No files provided for upload";

/// URL for previewing an uploaded file; relative URLs are served from `asset_base`
pub fn display_url(asset_base: &str, url: &str) -> String {
    if url.is_empty() || url.starts_with("http") {
        url.to_string()
    } else {
        format!("{asset_base}{url}")
    }
}

fn build_form(files: &[MediaFile]) -> Result<Form, AppError> {
    files.iter().try_fold(Form::new(), |form, file| {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::InvalidInput(format!("{}: {e}", file.file_name)))?;
        }
        Ok(form.part("file", part))
    })
}

#[async_trait]
impl MediaGateway for ApiClient {
    async fn upload(&self, files: &[MediaFile]) -> GatewayResult<UploadedMedia> {
        if files.is_empty() {
            return Err(DomainError::InvalidMedia(NO_FILES_PROVIDED.to_string()));
        }

        let form = build_form(files)?;
        let raw = self
            .send_with(
                Method::POST,
                "/media/upload",
                RequestOptions::new("Failed to upload media").authenticated(),
                |builder| builder.multipart(form),
            )
            .await?;

        let response: UploadResponse = crate::client::decode::<Option<UploadResponse>>(&raw)?
            .unwrap_or_default();
        let media_urls = response.urls();
        let asset_base = self.config().asset_base();
        let display_urls = media_urls
            .iter()
            .map(|url| display_url(&asset_base, url))
            .collect();

        tracing::info!(files = files.len(), urls = media_urls.len(), "Media uploaded");

        Ok(UploadedMedia {
            media_urls,
            display_urls,
        })
    }
}
