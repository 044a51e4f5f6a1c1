//! Media service
//!
//! Uploads attachments for a post and checks them against the post's media type.

use blog_core::{DomainError, MediaFile, MediaType, UploadedMedia};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upload files for a post of `media_type`
    ///
    /// Files with a declared content type outside the media type's MIME family
    /// are rejected before anything is sent.
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload(
        &self,
        media_type: MediaType,
        files: &[MediaFile],
    ) -> ServiceResult<UploadedMedia> {
        if let Err(e) = check_files(media_type, files) {
            warn!(error = %e, "Rejected media files");
            self.ctx.notifier().notify_error(&e.to_string());
            return Err(e.into());
        }

        match self.ctx.media().upload(files).await {
            Ok(uploaded) => {
                info!(urls = uploaded.media_urls.len(), "Media uploaded");
                Ok(uploaded)
            }
            Err(e) => {
                warn!(error = %e, "Media upload failed");
                self.ctx.notifier().notify_error(&e.to_string());
                Err(e.into())
            }
        }
    }
}

fn check_files(media_type: MediaType, files: &[MediaFile]) -> Result<(), DomainError> {
    let mismatch = files.iter().find(|file| {
        file.content_type
            .as_deref()
            .is_some_and(|content_type| !media_type.accepts(content_type))
    });

    match mismatch {
        Some(file) => Err(DomainError::InvalidMedia(format!(
            "{} is not accepted for {} posts (expected {})",
            file.file_name,
            media_type,
            media_type.accepted_mime()
        ))),
        None => Ok(()),
    }
}
