use tracing::{error, info};

use crate::application::use_cases::auth::Notifier;

/// Notifications as log events only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(kind = "success", "{message}");
    }

    fn info(&self, message: &str) {
        info!(kind = "info", "{message}");
    }

    fn error(&self, message: &str, details: Option<&str>) {
        error!(details, "{message}");
    }
}

/// Prints notifications for a person at the terminal. Errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✔ {message}");
    }

    fn info(&self, message: &str) {
        println!("ℹ {message}");
    }

    fn error(&self, message: &str, details: Option<&str>) {
        eprintln!("✖ {message}");
        if let Some(details) = details {
            eprintln!("{details}");
        }
    }
}
