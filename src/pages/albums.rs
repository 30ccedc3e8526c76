use serde::Deserialize;
use tracing::info;

use super::{Outcome, PageError, PageResult, View, ViewData};
use crate::api::AlbumApi;
use crate::session::{Page, SessionState};
use shutterbox_api_structs::{AlbumId, CreateAlbumPayload, InvitationPayload, UserId};

#[derive(Debug, Deserialize)]
pub struct CreateAlbumForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteForm {
    pub client_email: String,
}

pub async fn show(api: &dyn AlbumApi, session: &SessionState) -> PageResult {
    let user_id = session.require_login()?;
    Ok(albums_view(api, user_id).await?.into())
}

async fn albums_view(api: &dyn AlbumApi, user_id: UserId) -> Result<View, PageError> {
    let created = api
        .albums_created(user_id)
        .await
        .map_err(PageError::api("Error fetching albums"))?;
    let invited = api
        .albums_invited(user_id)
        .await
        .map_err(PageError::api("Error fetching albums"))?;

    Ok(View::new(Page::Albums).data(ViewData::Albums { created, invited }))
}

pub async fn create(api: &dyn AlbumApi, session: &SessionState, form: CreateAlbumForm) -> PageResult {
    let user_id = session.require_login()?;

    let payload = CreateAlbumPayload {
        photographer_id: user_id,
        name: form.name,
    };
    let album = api
        .create_album(&payload)
        .await
        .map_err(PageError::api("Error creating album"))?;
    info!(album_id = album.album_id, "Created album");

    Ok(albums_view(api, user_id)
        .await?
        .notice(format!("Created album {}.", album.name))
        .into())
}

/// Looks the client up by email and invites them to the album.
pub(super) async fn invite_client(
    api: &dyn AlbumApi,
    photographer_id: UserId,
    album_id: AlbumId,
    client_email: &str,
) -> Result<InvitationPayload, PageError> {
    let client = api
        .user_by_email(client_email)
        .await
        .map_err(PageError::api("Error fetching user"))?;

    let invitation = api
        .create_invitation(&InvitationPayload {
            client_id: client.user_id,
            album_id,
            photographer_id,
        })
        .await
        .map_err(PageError::api("Error creating invitation"))?;
    info!(
        album_id,
        client_id = invitation.client_id,
        "Invited client to album"
    );

    Ok(invitation)
}

pub async fn invite(
    api: &dyn AlbumApi,
    session: &mut SessionState,
    album_id: AlbumId,
    form: InviteForm,
) -> PageResult {
    let user_id = session.require_login()?;

    invite_client(api, user_id, album_id, &form.client_email).await?;
    let view = albums_view(api, user_id).await?;

    session.album_id = Some(album_id);
    Ok(view
        .notice(format!("Invited {} to the album.", form.client_email))
        .into())
}

pub fn open_upload(session: &mut SessionState, album_id: AlbumId) -> PageResult {
    session.require_login()?;
    session.album_id = Some(album_id);
    Ok(Outcome::Redirect(Page::Upload))
}

pub fn open_view(session: &mut SessionState, album_id: AlbumId) -> PageResult {
    session.require_login()?;
    session.selected_album_id = Some(album_id);
    Ok(Outcome::Redirect(Page::ViewPhotos))
}
