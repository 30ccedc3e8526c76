use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{AlbumApi, ApiError};
use shutterbox_api_structs::{
    Album, AlbumId, CreateAlbumPayload, InvitationPayload, LoginPayload, Photo, PhotoId,
    SelectionsPayload, SignUpPayload, User, UserId,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SignUp(String),
    Login(String),
    UserByEmail(String),
    CreateAlbum(CreateAlbumPayload),
    AlbumsCreated(UserId),
    AlbumsInvited(UserId),
    Upload(AlbumId, String),
    Invitation(InvitationPayload),
    Photos(AlbumId),
    PhotoBytes(PhotoId),
    Select(SelectionsPayload),
    SelectedPhotos(UserId, AlbumId),
}

/// Records every call and answers from canned data.
///
/// Endpoints listed in `failing` answer with a 500.
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<Call>>,
    pub users: Vec<User>,
    pub created: Vec<Album>,
    pub invited: Vec<Album>,
    pub photos: Vec<Photo>,
    pub photo_data: HashMap<PhotoId, Vec<u8>>,
    pub selected: Option<Vec<Photo>>,
    pub failing: HashSet<&'static str>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    fn record(&self, endpoint: &'static str, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(endpoint) {
            return Err(ApiError::Status {
                code: 500,
                body: format!("{} exploded", endpoint),
            });
        }
        Ok(())
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            code: 404,
            body: String::new(),
        }
    }
}

pub fn user(user_id: UserId, email: &str) -> User {
    User {
        user_id,
        username: email.split('@').next().unwrap_or_default().to_string(),
        email: email.to_string(),
        created_at: None,
    }
}

pub fn album(album_id: AlbumId, name: &str, photographer_id: UserId) -> Album {
    Album {
        album_id,
        name: name.to_string(),
        photographer_id,
        created_at: Some("2024-06-02T08:15:00".to_string()),
    }
}

pub fn photo(photo_id: PhotoId, album_id: AlbumId, s3_path: &str) -> Photo {
    Photo {
        photo_id,
        album_id,
        s3_path: s3_path.to_string(),
        uploaded_at: None,
    }
}

#[async_trait::async_trait]
impl AlbumApi for FakeApi {
    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), ApiError> {
        self.record("sign_up", Call::SignUp(payload.email.clone()))
    }

    async fn login(&self, payload: &LoginPayload) -> Result<User, ApiError> {
        self.record("login", Call::Login(payload.email.clone()))?;
        self.users
            .iter()
            .find(|user| user.email == payload.email)
            .cloned()
            .ok_or(ApiError::Status {
                code: 401,
                body: "invalid password".to_string(),
            })
    }

    async fn user_by_email(&self, email: &str) -> Result<User, ApiError> {
        self.record("user", Call::UserByEmail(email.to_string()))?;
        self.users
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_album(&self, payload: &CreateAlbumPayload) -> Result<Album, ApiError> {
        self.record("album", Call::CreateAlbum(payload.clone()))?;
        Ok(album(100, &payload.name, payload.photographer_id))
    }

    async fn albums_created(&self, photographer_id: UserId) -> Result<Vec<Album>, ApiError> {
        self.record("albums/created", Call::AlbumsCreated(photographer_id))?;
        Ok(self.created.clone())
    }

    async fn albums_invited(&self, client_id: UserId) -> Result<Vec<Album>, ApiError> {
        self.record("albums/invited", Call::AlbumsInvited(client_id))?;
        Ok(self.invited.clone())
    }

    async fn upload_photo(
        &self,
        album_id: AlbumId,
        file_name: &str,
        _data: Vec<u8>,
    ) -> Result<Photo, ApiError> {
        self.record("upload", Call::Upload(album_id, file_name.to_string()))?;
        let photo_id = self.calls.lock().unwrap().len() as PhotoId;
        Ok(photo(photo_id, album_id, file_name))
    }

    async fn create_invitation(
        &self,
        payload: &InvitationPayload,
    ) -> Result<InvitationPayload, ApiError> {
        self.record("invitation", Call::Invitation(payload.clone()))?;
        Ok(payload.clone())
    }

    async fn photos(&self, album_id: AlbumId) -> Result<Vec<Photo>, ApiError> {
        self.record("photos", Call::Photos(album_id))?;
        Ok(self
            .photos
            .iter()
            .filter(|photo| photo.album_id == album_id)
            .cloned()
            .collect())
    }

    async fn photo_bytes(&self, photo_id: PhotoId) -> Result<Vec<u8>, ApiError> {
        self.record("photo", Call::PhotoBytes(photo_id))?;
        self.photo_data
            .get(&photo_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn select_photos(
        &self,
        payload: &SelectionsPayload,
    ) -> Result<SelectionsPayload, ApiError> {
        self.record("selections", Call::Select(payload.clone()))?;
        Ok(payload.clone())
    }

    async fn selected_photos(
        &self,
        client_id: UserId,
        album_id: AlbumId,
    ) -> Result<Vec<Photo>, ApiError> {
        self.record("selected_photo", Call::SelectedPhotos(client_id, album_id))?;
        self.selected.clone().ok_or_else(Self::not_found)
    }
}
