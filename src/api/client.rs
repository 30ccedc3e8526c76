use std::str::FromStr;

use serde::{de::DeserializeOwned, Serialize};
use surf::{http::Mime, StatusCode};
use tracing::debug;
use url::Url;

use super::multipart::{content_type_of, Multipart};
use super::{AlbumApi, ApiError};
use shutterbox_api_structs::{
    Album, AlbumId, CreateAlbumPayload, InvitationPayload, LoginPayload, Photo, PhotoId,
    SelectionsPayload, SignUpPayload, User, UserId,
};

#[derive(Serialize)]
struct EmailQuery<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PhotographerQuery {
    photographer_id: UserId,
}

#[derive(Serialize)]
struct ClientQuery {
    client_id: UserId,
}

#[derive(Serialize)]
struct AlbumQuery {
    album_id: AlbumId,
}

#[derive(Serialize)]
struct PhotoQuery {
    photo_id: PhotoId,
}

#[derive(Serialize)]
struct SelectionQuery {
    client_id: UserId,
    album_id: AlbumId,
}

/// [`AlbumApi`] over HTTP with surf.
#[derive(Clone)]
pub struct HttpApi {
    base_url: Url,
    client: surf::Client,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(HttpApi {
            base_url,
            client: surf::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn endpoint_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.set_query(Some(&serde_qs::to_string(query)?));
        Ok(url)
    }

    async fn send(&self, request: surf::RequestBuilder) -> Result<surf::Response, ApiError> {
        let mut res = request.await.map_err(ApiError::Transport)?;
        let status = res.status();
        debug!("Backend responded with {}", status);

        if status != StatusCode::Ok {
            let body = res.body_string().await.unwrap_or_default();
            return Err(ApiError::Status {
                code: status.into(),
                body,
            });
        }

        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let res = self.send(self.client.get(url)).await?;
        decode(res).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .client
            .post(self.endpoint(path)?)
            .body_json(payload)
            .map_err(ApiError::Transport)?;
        let res = self.send(request).await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(mut res: surf::Response) -> Result<T, ApiError> {
    let body = res.body_string().await.map_err(ApiError::Transport)?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait::async_trait]
impl AlbumApi for HttpApi {
    #[tracing::instrument(skip_all, fields(email = %payload.email))]
    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.endpoint("sign_up")?)
            .body_json(payload)
            .map_err(ApiError::Transport)?;
        self.send(request).await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(email = %payload.email))]
    async fn login(&self, payload: &LoginPayload) -> Result<User, ApiError> {
        self.post_json("login", payload).await
    }

    #[tracing::instrument(skip(self))]
    async fn user_by_email(&self, email: &str) -> Result<User, ApiError> {
        let url = self.endpoint_with_query("user", &EmailQuery { email })?;
        self.get_json(url).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_album(&self, payload: &CreateAlbumPayload) -> Result<Album, ApiError> {
        self.post_json("album", payload).await
    }

    #[tracing::instrument(skip(self))]
    async fn albums_created(&self, photographer_id: UserId) -> Result<Vec<Album>, ApiError> {
        let url = self.endpoint_with_query("albums/created", &PhotographerQuery { photographer_id })?;
        self.get_json(url).await
    }

    #[tracing::instrument(skip(self))]
    async fn albums_invited(&self, client_id: UserId) -> Result<Vec<Album>, ApiError> {
        let url = self.endpoint_with_query("albums/invited", &ClientQuery { client_id })?;
        self.get_json(url).await
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn upload_photo(
        &self,
        album_id: AlbumId,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<Photo, ApiError> {
        let form = Multipart::new()
            .text("album_id", &album_id.to_string())
            .text("file_name", file_name)
            .file("file", file_name, content_type_of(&data), &data);

        let mime = Mime::from_str(&form.content_type()).map_err(ApiError::Transport)?;
        let mut body = surf::Body::from_bytes(form.finish());
        body.set_mime(mime);

        let request = self.client.post(self.endpoint("upload")?).body(body);
        let res = self.send(request).await?;
        decode(res).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_invitation(
        &self,
        payload: &InvitationPayload,
    ) -> Result<InvitationPayload, ApiError> {
        self.post_json("invitation", payload).await
    }

    #[tracing::instrument(skip(self))]
    async fn photos(&self, album_id: AlbumId) -> Result<Vec<Photo>, ApiError> {
        let url = self.endpoint_with_query("photos", &AlbumQuery { album_id })?;
        self.get_json(url).await
    }

    #[tracing::instrument(skip(self))]
    async fn photo_bytes(&self, photo_id: PhotoId) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint_with_query("photo", &PhotoQuery { photo_id })?;
        let mut res = self.send(self.client.get(url)).await?;
        res.body_bytes().await.map_err(ApiError::Transport)
    }

    #[tracing::instrument(skip(self))]
    async fn select_photos(
        &self,
        payload: &SelectionsPayload,
    ) -> Result<SelectionsPayload, ApiError> {
        self.post_json("selections", payload).await
    }

    #[tracing::instrument(skip(self))]
    async fn selected_photos(
        &self,
        client_id: UserId,
        album_id: AlbumId,
    ) -> Result<Vec<Photo>, ApiError> {
        let url = self.endpoint_with_query(
            "selected_photo",
            &SelectionQuery {
                client_id,
                album_id,
            },
        )?;
        self.get_json(url).await
    }
}
