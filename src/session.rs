use serde::{Deserialize, Serialize};
use tide::sessions::Session;

use crate::pages::PageError;
use shutterbox_api_structs::{AlbumId, User, UserId};

const SESSION_KEY: &str = "shutterbox";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Register,
    Login,
    Albums,
    Upload,
    ViewPhotos,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Register,
        Page::Login,
        Page::Albums,
        Page::Upload,
        Page::ViewPhotos,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Register => "Register",
            Page::Login => "Login",
            Page::Albums => "Album Page",
            Page::Upload => "Upload Photos",
            Page::ViewPhotos => "View Photos",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Register => "/register",
            Page::Login => "/login",
            Page::Albums => "/albums",
            Page::Upload => "/upload",
            Page::ViewPhotos => "/photos",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Page::Register => "register.html",
            Page::Login => "login.html",
            Page::Albums => "albums.html",
            Page::Upload => "upload.html",
            Page::ViewPhotos => "photos.html",
        }
    }
}

#[derive(Serialize)]
pub struct NavEntry {
    pub page: Page,
    pub title: &'static str,
    pub path: &'static str,
}

pub fn nav() -> Vec<NavEntry> {
    Page::ALL
        .iter()
        .map(|&page| NavEntry {
            page,
            title: page.title(),
            path: page.path(),
        })
        .collect()
}

/// Per-browser state kept in the tide session.
///
/// Loaded fresh for every request and written back only when the page
/// operation succeeded.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub album_id: Option<AlbumId>,
    pub selected_album_id: Option<AlbumId>,
    pub page: Option<Page>,
}

impl SessionState {
    pub fn load(session: &Session) -> Self {
        session.get(SESSION_KEY).unwrap_or_default()
    }

    pub fn store(&self, session: &mut Session) -> Result<(), serde_json::Error> {
        session.insert(SESSION_KEY, self)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.user_id)
    }

    pub fn require_login(&self) -> Result<UserId, PageError> {
        self.user_id().ok_or(PageError::NotLoggedIn)
    }

    pub fn require_album(&self) -> Result<AlbumId, PageError> {
        self.album_id.ok_or(PageError::NoAlbum)
    }

    pub fn require_selected_album(&self) -> Result<AlbumId, PageError> {
        self.selected_album_id.ok_or(PageError::NoSelectedAlbum)
    }

    /// Where `/` sends the browser: the last rendered page, else login or
    /// albums depending on whether anyone is logged in.
    pub fn landing_page(&self) -> Page {
        match (self.page, self.user.is_some()) {
            (Some(page), _) => page,
            (None, true) => Page::Albums,
            (None, false) => Page::Login,
        }
    }

    pub fn logout(&mut self) {
        *self = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::user;

    #[test]
    fn empty_session_lands_on_login() {
        let state = SessionState::default();
        assert_eq!(state.landing_page(), Page::Login);
        assert!(matches!(state.require_login(), Err(PageError::NotLoggedIn)));
    }

    #[test]
    fn logged_in_session_resumes_last_page() {
        let mut state = SessionState {
            user: Some(user(3, "ana@example.com")),
            ..Default::default()
        };
        assert_eq!(state.landing_page(), Page::Albums);
        assert_eq!(state.require_login().unwrap(), 3);

        state.page = Some(Page::ViewPhotos);
        assert_eq!(state.landing_page(), Page::ViewPhotos);
    }

    #[test]
    fn missing_album_keys_have_their_own_messages() {
        let state = SessionState::default();
        assert_eq!(
            state.require_album().unwrap_err().to_string(),
            "Please create an album first."
        );
        assert_eq!(
            state.require_selected_album().unwrap_err().to_string(),
            "Please select an album first."
        );
    }

    #[test]
    fn state_round_trips_through_tide_session() {
        let mut session = Session::new();
        let state = SessionState {
            user: Some(user(3, "ana@example.com")),
            album_id: Some(8),
            selected_album_id: None,
            page: Some(Page::Upload),
        };

        state.store(&mut session).unwrap();
        assert_eq!(SessionState::load(&session), state);
    }

    #[test]
    fn logout_forgets_everything() {
        let mut state = SessionState {
            user: Some(user(3, "ana@example.com")),
            album_id: Some(8),
            selected_album_id: Some(9),
            page: Some(Page::Upload),
        };
        state.logout();
        assert_eq!(state, SessionState::default());
    }
}
