use std::str::FromStr;

use tide::http::StatusCode;
use tide::{Redirect, Request, Response};
use tracing::warn;

use crate::pages::{
    account, albums, photos, selections, upload, Outcome, PageError, PageResult, View,
};
use crate::session::{Page, SessionState};
use crate::State;
use shutterbox_api_structs::{AlbumId, PhotoId};

mod forms;
pub mod utils;

pub(in super::super) fn mount(route: &mut tide::Server<State>) {
    route.at("/").get(landing);

    route.at("/register").get(register_form).post(register);
    route.at("/login").get(login_form).post(login);
    route.at("/logout").post(logout);

    route.at("/albums").get(album_page).post(create_album);
    route.at("/albums/:album_id/invite").post(invite_from_albums);
    route.at("/albums/:album_id/upload").post(open_upload);
    route.at("/albums/:album_id/view").post(open_view);
    route.at("/albums/:album_id/selections").post(search_selections);
    route
        .at("/albums/:album_id/selections/:client_id/download")
        .get(download_selections);

    route.at("/upload").get(upload_page).post(upload_photos);
    route.at("/upload/invite").post(invite_from_upload);

    route.at("/photos").get(photos_page).post(save_selection);
    route.at("/photo/:photo_id").get(photo);
}

fn render_view(state: &State, session: &SessionState, view: &View) -> tide::Result<Response> {
    let context = utils::view_context(session, view);
    let body = utils::render(state, view.template, &context)?;

    let res = Response::builder(StatusCode::Ok)
        .content_type("text/html")
        .body(body)
        .build();
    Ok(res)
}

/// Turns a page operation's result into a response.
///
/// The session is written back only when the operation succeeded. A failure
/// renders `page` with the error inline, against the session as it was before
/// the request.
fn respond(
    mut req: Request<State>,
    mut session: SessionState,
    page: Page,
    result: PageResult,
) -> tide::Result<Response> {
    match result {
        Ok(Outcome::Render(view)) => {
            session.page = Some(view.page);
            session.store(req.session_mut())?;
            render_view(req.state(), &session, &view)
        },
        Ok(Outcome::Redirect(target)) => {
            session.store(req.session_mut())?;
            Ok(Redirect::see_other(target.path()).into())
        },
        Err(err) => {
            warn!("{} failed: {}", page.title(), err);
            let session = SessionState::load(req.session());
            render_view(req.state(), &session, &View::failed(page, &err))
        },
    }
}

/// Parses a numeric route parameter, answering 400 when it is not one.
fn id_param<T: FromStr>(req: &Request<State>, name: &str) -> tide::Result<T> {
    req.param(name)?.parse().map_err(|_| {
        tide::Error::from_str(StatusCode::BadRequest, format!("Invalid {}", name))
    })
}

fn album_id(req: &Request<State>) -> tide::Result<AlbumId> {
    id_param(req, "album_id")
}

async fn landing(req: Request<State>) -> tide::Result<Response> {
    let page = SessionState::load(req.session()).landing_page();
    Ok(Redirect::see_other(page.path()).into())
}

async fn register_form(req: Request<State>) -> tide::Result<Response> {
    let session = SessionState::load(req.session());
    respond(req, session, Page::Register, Ok(View::new(Page::Register).into()))
}

async fn register(mut req: Request<State>) -> tide::Result<Response> {
    let form: account::RegisterForm = req.body_form().await?;
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = account::register(api.as_ref(), form).await;
    respond(req, session, Page::Register, result)
}

async fn login_form(req: Request<State>) -> tide::Result<Response> {
    let session = SessionState::load(req.session());
    respond(req, session, Page::Login, Ok(View::new(Page::Login).into()))
}

async fn login(mut req: Request<State>) -> tide::Result<Response> {
    let form: account::LoginForm = req.body_form().await?;
    let api = req.state().api.clone();
    let mut session = SessionState::load(req.session());

    let result = account::login(api.as_ref(), &mut session, form).await;
    respond(req, session, Page::Login, result)
}

async fn logout(req: Request<State>) -> tide::Result<Response> {
    let mut session = SessionState::load(req.session());
    let result = account::logout(&mut session);
    respond(req, session, Page::Login, result)
}

async fn album_page(req: Request<State>) -> tide::Result<Response> {
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = albums::show(api.as_ref(), &session).await;
    respond(req, session, Page::Albums, result)
}

async fn create_album(mut req: Request<State>) -> tide::Result<Response> {
    let form: albums::CreateAlbumForm = req.body_form().await?;
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = albums::create(api.as_ref(), &session, form).await;
    respond(req, session, Page::Albums, result)
}

async fn invite_from_albums(mut req: Request<State>) -> tide::Result<Response> {
    let album_id = album_id(&req)?;
    let form: albums::InviteForm = req.body_form().await?;
    let api = req.state().api.clone();
    let mut session = SessionState::load(req.session());

    let result = albums::invite(api.as_ref(), &mut session, album_id, form).await;
    respond(req, session, Page::Albums, result)
}

async fn open_upload(req: Request<State>) -> tide::Result<Response> {
    let album_id = album_id(&req)?;
    let mut session = SessionState::load(req.session());

    let result = albums::open_upload(&mut session, album_id);
    respond(req, session, Page::Albums, result)
}

async fn open_view(req: Request<State>) -> tide::Result<Response> {
    let album_id = album_id(&req)?;
    let mut session = SessionState::load(req.session());

    let result = albums::open_view(&mut session, album_id);
    respond(req, session, Page::Albums, result)
}

async fn search_selections(mut req: Request<State>) -> tide::Result<Response> {
    let album_id = album_id(&req)?;
    let form: selections::SearchForm = req.body_form().await?;
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = selections::search(api.as_ref(), &session, album_id, form).await;
    respond(req, session, Page::Albums, result)
}

async fn download_selections(req: Request<State>) -> tide::Result<Response> {
    let params = selections::DownloadParams {
        album_id: album_id(&req)?,
        client_id: id_param(&req, "client_id")?,
    };
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    match selections::download(api.as_ref(), &session, params).await {
        Ok(zip) => {
            let res = Response::builder(StatusCode::Ok)
                .content_type("application/zip")
                .header(
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", selections::DOWNLOAD_NAME),
                )
                .body(zip)
                .build();
            Ok(res)
        },
        Err(err) => respond(req, session, Page::Albums, Err(err)),
    }
}

async fn upload_page(req: Request<State>) -> tide::Result<Response> {
    let session = SessionState::load(req.session());
    let result = upload::show(&session);
    respond(req, session, Page::Upload, result)
}

async fn upload_photos(mut req: Request<State>) -> tide::Result<Response> {
    let files = forms::upload_files(&mut req).await?;
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = upload::upload(api.as_ref(), &session, files).await;
    respond(req, session, Page::Upload, result)
}

async fn invite_from_upload(mut req: Request<State>) -> tide::Result<Response> {
    let form: albums::InviteForm = req.body_form().await?;
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = upload::invite(api.as_ref(), &session, form).await;
    respond(req, session, Page::Upload, result)
}

async fn photos_page(req: Request<State>) -> tide::Result<Response> {
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = photos::show(api.as_ref(), &session).await;
    respond(req, session, Page::ViewPhotos, result)
}

async fn save_selection(mut req: Request<State>) -> tide::Result<Response> {
    let photo_ids = photos::parse_selection(&req.body_string().await?);
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let result = photos::save_selection(api.as_ref(), &session, photo_ids).await;
    respond(req, session, Page::ViewPhotos, result)
}

async fn photo(req: Request<State>) -> tide::Result<Response> {
    let photo_id: PhotoId = id_param(&req, "photo_id")?;
    let api = req.state().api.clone();
    let session = SessionState::load(req.session());

    let res = match photos::photo(api.as_ref(), &session, photo_id).await {
        Ok(photo) => Response::builder(StatusCode::Ok)
            .content_type(photo.content_type)
            .body(photo.data)
            .build(),
        Err(err @ PageError::NotLoggedIn) => Response::builder(StatusCode::Unauthorized)
            .body(err.to_string())
            .build(),
        Err(err) => {
            warn!(photo_id, "{}", err);
            Response::builder(StatusCode::BadGateway)
                .body(err.to_string())
                .build()
        },
    };
    Ok(res)
}
