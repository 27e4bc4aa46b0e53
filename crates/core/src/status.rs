//! View model for the access-denied status page.
//!
//! The page shows a numeric status code as its title and one of two fixed
//! subtitles, plus a "Back Home" action that always leads to the home page.

use crate::routes::HOME_PATH;

/// Status code shown when none is given.
pub const DEFAULT_STATUS_CODE: u16 = 403;

const FORBIDDEN: &str = "Forbidden";
const NOT_FOUND: &str = "Not Found";

/// The access-denied view for a given status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied {
    pub code: u16,
}

impl AccessDenied {
    /// Creates the view; an omitted code means 403.
    pub fn new(code: Option<u16>) -> Self {
        Self {
            code: code.unwrap_or(DEFAULT_STATUS_CODE),
        }
    }

    pub fn title(&self) -> String {
        self.code.to_string()
    }

    /// "Forbidden" for 403, "Not Found" for every other code.
    pub fn subtitle(&self) -> &'static str {
        if self.is_forbidden() {
            FORBIDDEN
        } else {
            NOT_FOUND
        }
    }

    pub fn home_href(&self) -> &'static str {
        HOME_PATH
    }

    /// HTTP status of the rendered page. Only the two variants the page can
    /// describe are used.
    pub fn response_status(&self) -> u16 {
        if self.is_forbidden() {
            403
        } else {
            404
        }
    }

    fn is_forbidden(&self) -> bool {
        self.code == DEFAULT_STATUS_CODE
    }
}

impl Default for AccessDenied {
    fn default() -> Self {
        Self::new(None)
    }
}
