use thiserror::Error;

use shutterbox_api_structs::{
    Album, AlbumId, CreateAlbumPayload, InvitationPayload, LoginPayload, Photo, PhotoId,
    SelectionsPayload, SignUpPayload, User, UserId,
};

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod multipart;

pub use client::HttpApi;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(surf::Error),
    #[error("{code}: {body}")]
    Status { code: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not encode query string")]
    Query(#[from] serde_qs::Error),
    #[error("invalid endpoint url")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { code: 404, .. })
    }
}

/// The backend REST surface the front-end is written against.
///
/// Every method is one request. Any status other than 200 comes back as
/// [`ApiError::Status`] carrying the response text.
#[async_trait::async_trait]
pub trait AlbumApi: Send + Sync {
    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), ApiError>;

    async fn login(&self, payload: &LoginPayload) -> Result<User, ApiError>;

    async fn user_by_email(&self, email: &str) -> Result<User, ApiError>;

    async fn create_album(&self, payload: &CreateAlbumPayload) -> Result<Album, ApiError>;

    async fn albums_created(&self, photographer_id: UserId) -> Result<Vec<Album>, ApiError>;

    async fn albums_invited(&self, client_id: UserId) -> Result<Vec<Album>, ApiError>;

    async fn upload_photo(
        &self,
        album_id: AlbumId,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<Photo, ApiError>;

    async fn create_invitation(
        &self,
        payload: &InvitationPayload,
    ) -> Result<InvitationPayload, ApiError>;

    async fn photos(&self, album_id: AlbumId) -> Result<Vec<Photo>, ApiError>;

    async fn photo_bytes(&self, photo_id: PhotoId) -> Result<Vec<u8>, ApiError>;

    async fn select_photos(
        &self,
        payload: &SelectionsPayload,
    ) -> Result<SelectionsPayload, ApiError>;

    async fn selected_photos(
        &self,
        client_id: UserId,
        album_id: AlbumId,
    ) -> Result<Vec<Photo>, ApiError>;
}
