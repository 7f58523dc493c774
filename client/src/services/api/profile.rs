//! # Profile Endpoints
//!
//! Profile CRUD, search and image upload under `/profile`.

use std::num::NonZeroU32;
use std::sync::Arc;

use shared::dto::profile::{Profile, ProfileDraft, ProfileResponse};

use crate::core::auth::AuthToken;
use crate::core::error::{ApiError, Result};
use crate::core::transport::{decode, ApiRequest, FileUpload, Transport};

const PROFILE: &str = "profile";

/// Form field every uploaded image is attached under.
pub const UPLOAD_FIELD: &str = "files";

/// Client for the `/profile` resource.
#[derive(Clone)]
pub struct ProfileClient {
    transport: Arc<dyn Transport>,
}

impl ProfileClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn create_profile(&self, auth: &AuthToken, draft: &ProfileDraft) -> Result<ProfileResponse> {
        let request = ApiRequest::post([PROFILE]).bearer(auth).json(draft)?;
        decode(self.transport.execute(request).await?)
    }

    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn get_profile(&self, auth: &AuthToken, user_id: &str) -> Result<Profile> {
        let request = ApiRequest::get([PROFILE, user_id]).bearer(auth);
        decode(self.transport.execute(request).await?)
    }

    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        auth: &AuthToken,
        user_id: &str,
        profile: &Profile,
    ) -> Result<ProfileResponse> {
        let request = ApiRequest::put([PROFILE, user_id]).bearer(auth).json(profile)?;
        decode(self.transport.execute(request).await?)
    }

    /// Upload one or more images as a multipart form.
    ///
    /// Files are sent in order, each as a `files` part with its file name.
    #[tracing::instrument(skip_all, fields(user_id = %user_id, files = files.len()))]
    pub async fn upload_profile_image(
        &self,
        auth: &AuthToken,
        user_id: &str,
        files: Vec<FileUpload>,
    ) -> Result<ProfileResponse> {
        if files.is_empty() {
            return Err(ApiError::InvalidInput("at least one file is required".to_string()));
        }
        if let Some(file) = files.iter().find(|f| f.file_name.trim().is_empty()) {
            return Err(ApiError::InvalidInput(format!(
                "every upload needs a file name ({} bytes without one)",
                file.bytes.len()
            )));
        }

        let request = ApiRequest::post([PROFILE, user_id, "upload-image"])
            .bearer(auth)
            .multipart(UPLOAD_FIELD, files);
        decode(self.transport.execute(request).await?)
    }

    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn delete_profile(&self, auth: &AuthToken, user_id: &str) -> Result<ProfileResponse> {
        let request = ApiRequest::delete([PROFILE, user_id]).bearer(auth);
        decode(self.transport.execute(request).await?)
    }

    /// Page through all profiles.
    pub async fn get_profiles(&self, auth: &AuthToken, page: NonZeroU32) -> Result<ProfileResponse> {
        let request = ApiRequest::get([PROFILE]).query("page", page).bearer(auth);
        decode(self.transport.execute(request).await?)
    }

    /// Search profiles; each pair becomes one query parameter.
    pub async fn search_profiles<I, K, V>(&self, auth: &AuthToken, query: I) -> Result<ProfileResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = ApiRequest::get([PROFILE, "search"])
            .query_pairs(query)
            .bearer(auth);
        decode(self.transport.execute(request).await?)
    }
}
