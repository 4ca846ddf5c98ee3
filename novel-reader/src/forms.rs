//! Login and registration form validation.
//!
//! Runs before anything is posted so obviously bad input never reaches the
//! server. The server validates again; these rules only need to be no
//! stricter than its own.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_@-]{6,32}$").expect("valid username regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// First rule a submitted form broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Username and password must not be empty")]
    MissingCredentials,

    #[error("Email must not be empty")]
    MissingEmail,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Username may only contain letters, digits, _ @ - and be 6-32 characters long")]
    InvalidUsername,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Trimmed, validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(username: &str, password: &str) -> Result<Self, FormError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Trimmed, validated registration details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegisterForm {
    pub fn validate(username: &str, password: &str, email: &str) -> Result<Self, FormError> {
        let LoginForm { username, password } = LoginForm::validate(username, password)?;
        let email = email.trim();
        if email.is_empty() {
            return Err(FormError::MissingEmail);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(FormError::InvalidEmail);
        }
        if !USERNAME_RE.is_match(&username) {
            return Err(FormError::InvalidUsername);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        Ok(Self {
            username,
            password,
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_trims() {
        let form = LoginForm::validate("  reader01 ", " secret ").unwrap();
        assert_eq!(form.username, "reader01");
        assert_eq!(form.password, "secret");
    }

    #[test]
    fn test_login_requires_both() {
        assert_eq!(
            LoginForm::validate("reader01", "   "),
            Err(FormError::MissingCredentials)
        );
        assert_eq!(LoginForm::validate("", "x"), Err(FormError::MissingCredentials));
    }

    #[test]
    fn test_register_accepts_valid() {
        let form = RegisterForm::validate("reader_01", "secret1", " a@b.cn ").unwrap();
        assert_eq!(form.email, "a@b.cn");
    }

    #[test]
    fn test_register_rule_order() {
        assert_eq!(
            RegisterForm::validate("", "", ""),
            Err(FormError::MissingCredentials)
        );
        assert_eq!(
            RegisterForm::validate("reader01", "secret1", ""),
            Err(FormError::MissingEmail)
        );
        assert_eq!(
            RegisterForm::validate("bad", "x", "no-at-sign"),
            Err(FormError::InvalidEmail)
        );
        assert_eq!(
            RegisterForm::validate("bad", "x", "a@b.c"),
            Err(FormError::InvalidUsername)
        );
        assert_eq!(
            RegisterForm::validate("reader01", "12345", "a@b.c"),
            Err(FormError::PasswordTooShort)
        );
    }

    #[test]
    fn test_username_charset() {
        assert!(RegisterForm::validate("me@home-1", "secret1", "a@b.c").is_ok());
        assert_eq!(
            RegisterForm::validate("has space", "secret1", "a@b.c"),
            Err(FormError::InvalidUsername)
        );
        let long = "a".repeat(33);
        assert_eq!(
            RegisterForm::validate(&long, "secret1", "a@b.c"),
            Err(FormError::InvalidUsername)
        );
    }
}
