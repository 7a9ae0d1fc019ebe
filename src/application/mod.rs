pub mod app_error;
pub mod dictionaries;
pub mod error_handler;
pub mod forms;
pub mod guard;
pub mod language;
pub mod runtime_env;
pub mod session;
pub mod use_cases;
pub mod validators;
