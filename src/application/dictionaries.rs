use once_cell::sync::Lazy;
use serde_json::Value;

use crate::application::language::UserLanguage;

static RAW_EN: &str = include_str!("../../dictionaries/en.json");
static RAW_MN: &str = include_str!("../../dictionaries/mn.json");

static DICT_EN: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(RAW_EN).expect("failed to parse en dictionary json"));
static DICT_MN: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(RAW_MN).expect("failed to parse mn dictionary json"));

/// Every user-facing text the client can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKey {
    BadRequest,
    AuthRequired,
    Forbidden,
    NotFound,
    Conflict,
    ValidationError,
    ServerError,
    ServerUnavailable,
    GenericError,
    ConnectionProblem,
    UnknownError,
    InvalidResponse,
    LoginSuccess,
    SignupSuccess,
    SignupLoginRequired,
    LoggedOut,
    EmailInvalid,
    PasswordTooShort,
    NameTooShort,
    TermsRequired,
    Loading,
}

impl MessageKey {
    pub const ALL: [MessageKey; 21] = [
        MessageKey::BadRequest,
        MessageKey::AuthRequired,
        MessageKey::Forbidden,
        MessageKey::NotFound,
        MessageKey::Conflict,
        MessageKey::ValidationError,
        MessageKey::ServerError,
        MessageKey::ServerUnavailable,
        MessageKey::GenericError,
        MessageKey::ConnectionProblem,
        MessageKey::UnknownError,
        MessageKey::InvalidResponse,
        MessageKey::LoginSuccess,
        MessageKey::SignupSuccess,
        MessageKey::SignupLoginRequired,
        MessageKey::LoggedOut,
        MessageKey::EmailInvalid,
        MessageKey::PasswordTooShort,
        MessageKey::NameTooShort,
        MessageKey::TermsRequired,
        MessageKey::Loading,
    ];

    /// Dotted path into the dictionary json.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::BadRequest => "errors.bad_request",
            MessageKey::AuthRequired => "errors.auth_required",
            MessageKey::Forbidden => "errors.forbidden",
            MessageKey::NotFound => "errors.not_found",
            MessageKey::Conflict => "errors.conflict",
            MessageKey::ValidationError => "errors.validation",
            MessageKey::ServerError => "errors.server",
            MessageKey::ServerUnavailable => "errors.unavailable",
            MessageKey::GenericError => "errors.generic",
            MessageKey::ConnectionProblem => "errors.connection",
            MessageKey::UnknownError => "errors.unknown",
            MessageKey::InvalidResponse => "errors.invalid_response",
            MessageKey::LoginSuccess => "toasts.login_success",
            MessageKey::SignupSuccess => "toasts.signup_success",
            MessageKey::SignupLoginRequired => "toasts.signup_login_required",
            MessageKey::LoggedOut => "toasts.logged_out",
            MessageKey::EmailInvalid => "validation.email_invalid",
            MessageKey::PasswordTooShort => "validation.password_too_short",
            MessageKey::NameTooShort => "validation.name_too_short",
            MessageKey::TermsRequired => "validation.terms_required",
            MessageKey::Loading => "guard.loading",
        }
    }
}

fn dictionary(lang: UserLanguage) -> &'static Value {
    match lang {
        UserLanguage::En => &DICT_EN,
        UserLanguage::Mn => &DICT_MN,
    }
}

fn lookup<'a>(dict: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(dict, |node, part| node.get(part))
        .and_then(Value::as_str)
}

/// Localized text for `key`, falling back to English and then to the key.
pub fn text(lang: UserLanguage, key: MessageKey) -> String {
    lookup(dictionary(lang), key.as_str())
        .or_else(|| lookup(&DICT_EN, key.as_str()))
        .unwrap_or(key.as_str())
        .to_string()
}

/// Like [`text`], replacing `{name}` placeholders.
pub fn text_with(lang: UserLanguage, key: MessageKey, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(text(lang, key), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
