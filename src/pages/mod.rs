//! Page operations.
//!
//! Each operation takes the backend, the request's [`SessionState`] and the
//! submitted form, and either names what to render next or fails with a
//! [`PageError`] that the page shows inline. Operations touch the session only
//! after every backend call they depend on has succeeded.
//!
//! [`SessionState`]: crate::session::SessionState

use serde::Serialize;
use thiserror::Error;

use crate::api::ApiError;
use crate::session::Page;
use shutterbox_api_structs::{Album, AlbumId, Photo, User};

pub mod account;
pub mod albums;
pub mod photos;
pub mod selections;
pub mod upload;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Please login first.")]
    NotLoggedIn,
    #[error("Please create an album first.")]
    NoAlbum,
    #[error("Please select an album first.")]
    NoSelectedAlbum,
    #[error("Please choose at least one photo.")]
    NoFiles,
    #[error("No photos selected yet. Return later.")]
    NothingSelected,
    #[error("{context}. {source}")]
    Api {
        context: String,
        #[source]
        source: ApiError,
    },
    #[error("Error building zip archive. {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl PageError {
    /// Wraps a backend failure with the message prefix the page shows.
    pub fn api(context: impl Into<String>) -> impl FnOnce(ApiError) -> PageError {
        let context = context.into();
        move |source| PageError::Api { context, source }
    }
}

pub type PageResult = Result<Outcome, PageError>;

#[derive(Debug)]
pub enum Outcome {
    Render(View),
    Redirect(Page),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    None,
    Albums {
        created: Vec<Album>,
        invited: Vec<Album>,
    },
    Upload {
        album_id: AlbumId,
        uploaded: Vec<Photo>,
    },
    Photos {
        album_id: AlbumId,
        photos: Vec<Photo>,
    },
    Selection {
        album_id: AlbumId,
        client: User,
        photos: Vec<Photo>,
    },
}

#[derive(Debug)]
pub struct View {
    pub page: Page,
    pub template: &'static str,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub data: ViewData,
}

impl View {
    pub fn new(page: Page) -> Self {
        View {
            page,
            template: page.template(),
            error: None,
            notice: None,
            data: ViewData::None,
        }
    }

    pub fn failed(page: Page, error: &PageError) -> Self {
        View {
            error: Some(error.to_string()),
            ..View::new(page)
        }
    }

    pub fn template(mut self, template: &'static str) -> Self {
        self.template = template;
        self
    }

    pub fn notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn data(mut self, data: ViewData) -> Self {
        self.data = data;
        self
    }
}

impl From<View> for Outcome {
    fn from(view: View) -> Self {
        Outcome::Render(view)
    }
}
