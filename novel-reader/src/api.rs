//! Wire types for the site's form endpoints.
//!
//! Every endpoint takes an `application/x-www-form-urlencoded` POST and
//! answers with the JSON envelope [`ApiResponse`].

use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use url::form_urlencoded;

use crate::config::Endpoints;
use crate::forms::{LoginForm, RegisterForm};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// JSON envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl ApiResponse {
    /// Turn the envelope into an outcome, collecting the server's reasons
    /// on failure.
    pub fn into_outcome(self) -> Result<(), SubmitError> {
        if self.success {
            return Ok(());
        }
        let mut errors = self.errors.unwrap_or_default();
        if errors.is_empty() && !self.msg.is_empty() {
            errors.push(self.msg);
        }
        Err(SubmitError::Rejected(errors))
    }
}

/// User action that posts a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Register,
    AddBookshelf,
    RemoveBookshelf,
}

impl Action {
    pub fn path<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            Action::Login => &endpoints.login,
            Action::Register => &endpoints.register,
            Action::AddBookshelf => &endpoints.add_bookshelf,
            Action::RemoveBookshelf => &endpoints.remove_bookshelf,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Action::Login => "Signed in",
            Action::Register => "Account created",
            Action::AddBookshelf => "Added to bookshelf",
            Action::RemoveBookshelf => "Removed from bookshelf",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Login => "Login",
            Action::Register => "Registration",
            Action::AddBookshelf => "Add to bookshelf",
            Action::RemoveBookshelf => "Remove from bookshelf",
        };
        f.write_str(name)
    }
}

/// Why a submission did not succeed. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("{}", .0.join("\n"))]
    Rejected(Vec<String>),

    #[error("{0} request failed")]
    Network(Action),
}

/// A request body for one of the site's form endpoints.
pub trait FormRequest {
    const ACTION: Action;

    fn form_pairs(&self) -> Vec<(&'static str, String)>;

    fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form_pairs())
            .finish()
    }
}

impl FormRequest for LoginForm {
    const ACTION: Action = Action::Login;

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
        ]
    }
}

impl FormRequest for RegisterForm {
    const ACTION: Action = Action::Register;

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("email", self.email.clone()),
        ]
    }
}

/// Add a book, optionally bookmarked at a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddBookshelfRequest {
    pub article_id: u64,
    pub article_name: String,
    pub chapter_id: Option<u64>,
    pub chapter_name: String,
}

impl FormRequest for AddBookshelfRequest {
    const ACTION: Action = Action::AddBookshelf;

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        // Chapter id 0 means "no bookmark"; the name is dropped with it.
        let (chapter_id, chapter_name) = match self.chapter_id.filter(|id| *id != 0) {
            Some(id) => (id, self.chapter_name.clone()),
            None => (0, String::new()),
        };
        vec![
            ("articleid", self.article_id.to_string()),
            ("articlename", self.article_name.clone()),
            ("chapterid", chapter_id.to_string()),
            ("chaptername", chapter_name),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveBookshelfRequest {
    pub case_id: u64,
}

impl FormRequest for RemoveBookshelfRequest {
    const ACTION: Action = Action::RemoveBookshelf;

    fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("caseid", self.case_id.to_string())]
    }
}
