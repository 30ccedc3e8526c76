use tracing::info;

use super::albums::{invite_client, InviteForm};
use super::{PageError, PageResult, View, ViewData};
use crate::api::AlbumApi;
use crate::session::{Page, SessionState};
use shutterbox_api_structs::AlbumId;

#[derive(Debug)]
pub struct UploadFile {
    pub name: String,
    pub data: Vec<u8>,
}

fn upload_view(album_id: AlbumId) -> View {
    View::new(Page::Upload).data(ViewData::Upload {
        album_id,
        uploaded: Vec::new(),
    })
}

pub fn show(session: &SessionState) -> PageResult {
    let album_id = session.require_album()?;
    Ok(upload_view(album_id).into())
}

/// Uploads the files one request each, in the order they were submitted.
///
/// The first rejected file ends the page with its error; files after it are
/// not sent.
pub async fn upload(api: &dyn AlbumApi, session: &SessionState, files: Vec<UploadFile>) -> PageResult {
    let album_id = session.require_album()?;
    if files.is_empty() {
        return Err(PageError::NoFiles);
    }

    let mut uploaded = Vec::with_capacity(files.len());
    for file in files {
        let photo = api
            .upload_photo(album_id, &file.name, file.data)
            .await
            .map_err(PageError::api(format!("Error uploading {}", file.name)))?;
        info!(album_id, photo_id = photo.photo_id, "Uploaded {}", file.name);
        uploaded.push(photo);
    }

    let notice = format!("Uploaded {} photos.", uploaded.len());
    Ok(View::new(Page::Upload)
        .data(ViewData::Upload { album_id, uploaded })
        .notice(notice)
        .into())
}

pub async fn invite(api: &dyn AlbumApi, session: &SessionState, form: InviteForm) -> PageResult {
    let album_id = session.require_album()?;
    let user_id = session.require_login()?;

    invite_client(api, user_id, album_id, &form.client_email).await?;

    Ok(upload_view(album_id)
        .notice(format!("Invited {} to the album.", form.client_email))
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{user, Call, FakeApi};
    use crate::pages::Outcome;

    fn files(names: &[&str]) -> Vec<UploadFile> {
        names
            .iter()
            .map(|name| UploadFile {
                name: name.to_string(),
                data: name.as_bytes().to_vec(),
            })
            .collect()
    }

    fn with_album(album_id: AlbumId) -> SessionState {
        SessionState {
            user: Some(user(7, "pat@example.com")),
            album_id: Some(album_id),
            ..Default::default()
        }
    }

    #[async_std::test]
    async fn one_upload_call_per_file_in_order() {
        let api = FakeApi::default();

        let outcome = upload(&api, &with_album(4), files(&["c.jpg", "a.jpg", "b.jpg"]))
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::Upload(4, "c.jpg".to_string()),
                Call::Upload(4, "a.jpg".to_string()),
                Call::Upload(4, "b.jpg".to_string()),
            ]
        );
        match outcome {
            Outcome::Render(view) => {
                assert_eq!(view.notice.as_deref(), Some("Uploaded 3 photos."))
            },
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[async_std::test]
    async fn upload_without_album_makes_no_calls() {
        let api = FakeApi::default();
        let session = SessionState {
            user: Some(user(7, "pat@example.com")),
            ..Default::default()
        };

        let err = upload(&api, &session, files(&["a.jpg"])).await.unwrap_err();

        assert_eq!(err.to_string(), "Please create an album first.");
        assert!(api.calls().is_empty());
    }

    #[async_std::test]
    async fn first_failure_stops_the_batch() {
        let api = FakeApi::default().failing("upload");

        let err = upload(&api, &with_album(4), files(&["a.jpg", "b.jpg"]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error uploading a.jpg. 500: upload exploded");
        assert_eq!(api.calls(), vec![Call::Upload(4, "a.jpg".to_string())]);
    }

    #[async_std::test]
    async fn empty_submission_is_rejected() {
        let api = FakeApi::default();

        let err = upload(&api, &with_album(4), Vec::new()).await.unwrap_err();

        assert!(matches!(err, PageError::NoFiles));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn show_requires_album() {
        assert!(show(&SessionState::default()).is_err());
        assert!(show(&with_album(4)).is_ok());
    }

    #[async_std::test]
    async fn invite_from_upload_page_targets_current_album() {
        let api = FakeApi {
            users: vec![user(9, "cli@example.com")],
            ..Default::default()
        };

        let form = InviteForm {
            client_email: "cli@example.com".to_string(),
        };
        invite(&api, &with_album(4), form).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::UserByEmail("cli@example.com".to_string()),
                Call::Invitation(shutterbox_api_structs::InvitationPayload {
                    client_id: 9,
                    album_id: 4,
                    photographer_id: 7,
                }),
            ]
        );
    }
}
