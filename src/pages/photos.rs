use tracing::{info, warn};

use super::{PageError, PageResult, View, ViewData};
use crate::api::multipart::content_type_of;
use crate::api::AlbumApi;
use crate::session::{Page, SessionState};
use shutterbox_api_structs::{AlbumId, PhotoId, SelectionsPayload};

/// Form field each photo's checkbox submits its id under.
pub const SELECTION_FIELD: &str = "photo_id";

pub struct PhotoData {
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

async fn photos_view(api: &dyn AlbumApi, album_id: AlbumId) -> Result<View, PageError> {
    let photos = api
        .photos(album_id)
        .await
        .map_err(PageError::api("Error fetching photos"))?;

    Ok(View::new(Page::ViewPhotos).data(ViewData::Photos { album_id, photos }))
}

pub async fn show(api: &dyn AlbumApi, session: &SessionState) -> PageResult {
    let album_id = session.require_selected_album()?;
    Ok(photos_view(api, album_id).await?.into())
}

pub async fn save_selection(
    api: &dyn AlbumApi,
    session: &SessionState,
    photo_ids: Vec<PhotoId>,
) -> PageResult {
    let album_id = session.require_selected_album()?;
    let client_id = session.require_login()?;

    let saved = api
        .select_photos(&SelectionsPayload {
            client_id,
            album_id,
            photo_ids,
        })
        .await
        .map_err(PageError::api("Error saving selection"))?;
    info!(album_id, client_id, count = saved.photo_ids.len(), "Saved selection");

    Ok(photos_view(api, album_id)
        .await?
        .notice(format!("Saved a selection of {} photos.", saved.photo_ids.len()))
        .into())
}

/// Collects the checked photo ids from an urlencoded form body.
pub fn parse_selection(body: &str) -> Vec<PhotoId> {
    url::form_urlencoded::parse(body.as_bytes())
        .filter(|(key, _)| key == SELECTION_FIELD)
        .filter_map(|(_, value)| match value.parse() {
            Ok(photo_id) => Some(photo_id),
            Err(err) => {
                warn!("Ignoring photo id {:?}: {}", value, err);
                None
            },
        })
        .collect()
}

pub async fn photo(
    api: &dyn AlbumApi,
    session: &SessionState,
    photo_id: PhotoId,
) -> Result<PhotoData, PageError> {
    session.require_login()?;

    let data = api
        .photo_bytes(photo_id)
        .await
        .map_err(PageError::api("Error fetching image"))?;

    Ok(PhotoData {
        content_type: content_type_of(&data),
        data,
    })
}
