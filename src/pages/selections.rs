use serde::Deserialize;
use tracing::info;

use super::{PageError, PageResult, View, ViewData};
use crate::api::AlbumApi;
use crate::archive;
use crate::session::{Page, SessionState};
use shutterbox_api_structs::{AlbumId, Photo, UserId};

pub const DOWNLOAD_NAME: &str = "selected_photos.zip";

/// Which client's selection the photographer is looking for.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub client_email: String,
}

#[derive(Debug)]
pub struct DownloadParams {
    pub album_id: AlbumId,
    pub client_id: UserId,
}

async fn selected_photos(
    api: &dyn AlbumApi,
    client_id: UserId,
    album_id: AlbumId,
) -> Result<Vec<Photo>, PageError> {
    let photos = match api.selected_photos(client_id, album_id).await {
        Ok(photos) => photos,
        Err(err) if err.is_not_found() => return Err(PageError::NothingSelected),
        Err(err) => return Err(PageError::api("Error fetching selected photos")(err)),
    };

    if photos.is_empty() {
        return Err(PageError::NothingSelected);
    }
    Ok(photos)
}

/// Finds what the client with the given email picked in the album.
pub async fn search(
    api: &dyn AlbumApi,
    session: &SessionState,
    album_id: AlbumId,
    form: SearchForm,
) -> PageResult {
    session.require_login()?;

    let client = api
        .user_by_email(&form.client_email)
        .await
        .map_err(PageError::api("Error fetching user"))?;
    let photos = selected_photos(api, client.user_id, album_id).await?;
    info!(album_id, client_id = client.user_id, "Got {} selected photos", photos.len());

    Ok(View::new(Page::Albums)
        .template("selections.html")
        .data(ViewData::Selection {
            album_id,
            client,
            photos,
        })
        .into())
}

/// Builds the zip of a client's selection, one entry per selected photo named
/// by its storage path. Any photo that cannot be fetched fails the download.
pub async fn download(
    api: &dyn AlbumApi,
    session: &SessionState,
    params: DownloadParams,
) -> Result<Vec<u8>, PageError> {
    session.require_login()?;

    let photos = selected_photos(api, params.client_id, params.album_id).await?;

    let mut entries = Vec::with_capacity(photos.len());
    for photo in photos {
        let data = api
            .photo_bytes(photo.photo_id)
            .await
            .map_err(PageError::api("Error downloading image"))?;
        entries.push((photo.s3_path, data));
    }

    let zip = archive::zip_files(entries)?;
    info!(
        album_id = params.album_id,
        client_id = params.client_id,
        size = zip.len(),
        "Built selection archive"
    );
    Ok(zip)
}
