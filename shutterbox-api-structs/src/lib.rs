use serde::{de::DeserializeOwned, Serialize};

pub type UserId = i32;
pub type AlbumId = i32;
pub type PhotoId = i32;

/// JSON text conversions shared by the backend data transfer objects.
pub trait Json: Serialize + DeserializeOwned {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Json for User {}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Album {
    pub album_id: AlbumId,
    pub name: String,
    pub photographer_id: UserId,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Json for Album {}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Photo {
    pub photo_id: PhotoId,
    pub album_id: AlbumId,
    pub s3_path: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl Json for Photo {}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct SignUpPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreateAlbumPayload {
    pub photographer_id: UserId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InvitationPayload {
    pub client_id: UserId,
    pub album_id: AlbumId,
    pub photographer_id: UserId,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SelectionsPayload {
    pub client_id: UserId,
    pub album_id: AlbumId,
    pub photo_ids: Vec<PhotoId>,
}
