//! Login and signup form input, validated before any network call.

use authgate_types::{LoginRequest, SignupRequest};
use secrecy::{ExposeSecret, SecretString};

use crate::application::{
    dictionaries::{MessageKey, text, text_with},
    language::UserLanguage,
    validators::{FieldErrors, MIN_NAME_LEN, MIN_PASSWORD_LEN, has_min_chars, is_valid_email},
};

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub terms_accepted: bool,
}

fn check_email(errors: &mut FieldErrors, lang: UserLanguage, email: &str) {
    if !is_valid_email(email) {
        errors.add("email", text(lang, MessageKey::EmailInvalid));
    }
}

fn check_password(errors: &mut FieldErrors, lang: UserLanguage, password: &SecretString) {
    if !has_min_chars(password.expose_secret(), MIN_PASSWORD_LEN) {
        let min = MIN_PASSWORD_LEN.to_string();
        errors.add(
            "password",
            text_with(lang, MessageKey::PasswordTooShort, &[("min", &min)]),
        );
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn validate(&self, lang: UserLanguage) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, lang, &self.email);
        check_password(&mut errors, lang, &self.password);
        errors.into_result()
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.expose_secret().to_string(),
        }
    }
}

impl SignupForm {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        terms_accepted: bool,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            terms_accepted,
        }
    }

    pub fn validate(&self, lang: UserLanguage) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !has_min_chars(self.full_name.trim(), MIN_NAME_LEN) {
            errors.add("full_name", text(lang, MessageKey::NameTooShort));
        }
        check_email(&mut errors, lang, &self.email);
        check_password(&mut errors, lang, &self.password);
        if !self.terms_accepted {
            errors.add("terms", text(lang, MessageKey::TermsRequired));
        }
        errors.into_result()
    }

    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.expose_secret().to_string(),
        }
    }

    /// Credentials for the follow-up login when signup returns no token.
    pub fn login_form(&self) -> LoginForm {
        LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}
