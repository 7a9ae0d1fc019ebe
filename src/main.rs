use std::process::ExitCode;
use std::sync::Arc;

use authgate::{
    adapters::{app_state::AppState, notify::ConsoleNotifier},
    app_error::AppError,
    dictionaries::{MessageKey, text},
    forms::{LoginForm, SignupForm},
    guard::{GuardOutcome, ProtectedRoute},
    infra::{
        config::AppConfig,
        setup::{init_app_state, init_tracing},
    },
    use_cases::auth::{Notifier, SignupOutcome},
    validators::FieldErrors,
};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use reqwest::{
    Method,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid HTTP method `{0}`")]
    InvalidMethod(String),
    #[error("invalid header `{0}`, expected NAME:VALUE")]
    InvalidHeader(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(FieldErrors),
    /// Already shown to the user.
    #[error("command failed")]
    Reported,
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Validation(fields) => CliError::Validation(fields),
            _ => CliError::Reported,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "authgate", about = "Sign in to the backend and make authenticated calls")]
struct Cli {
    /// Overrides API_URL
    #[arg(long)]
    api_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        accept_terms: bool,
    },
    Logout,
    /// Shows the signed-in user, or fails when there is none.
    Whoami,
    /// Raw authenticated call; prints the JSON response.
    Request {
        method: String,
        path: String,
        #[arg(long)]
        data: Option<String>,
        #[arg(long = "header")]
        headers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    init_tracing(config.log_file.as_deref())?;

    let state = init_app_state(config, Arc::new(ConsoleNotifier))?;

    match run(&state, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Reported) => Ok(ExitCode::FAILURE),
        Err(CliError::Validation(fields)) => {
            for (field, message) in fields.iter() {
                eprintln!("{field}: {message}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = state
                .auth_use_cases
                .login(&LoginForm::new(email, password))
                .await?;
            print_json(&serde_json::to_value(&user)?);
        }
        Command::Signup {
            name,
            email,
            password,
            accept_terms,
        } => {
            let form = SignupForm::new(name, email, password, accept_terms);
            match state.auth_use_cases.sign_up(&form).await? {
                SignupOutcome::LoggedIn(user) => print_json(&serde_json::to_value(&user)?),
                SignupOutcome::Created => debug!("signed up without a session"),
            }
        }
        Command::Logout => state.auth_use_cases.logout(),
        Command::Whoami => match ProtectedRoute::new(&state.session).evaluate() {
            GuardOutcome::Render => {
                let user = state.session.user();
                print_json(&serde_json::to_value(&user)?);
            }
            GuardOutcome::Waiting | GuardOutcome::Redirected => {
                ConsoleNotifier.error(
                    &text(state.config.language, MessageKey::AuthRequired),
                    None,
                );
                return Err(CliError::Reported);
            }
        },
        Command::Request {
            method,
            path,
            data,
            headers,
        } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .map_err(|_| CliError::InvalidMethod(method.clone()))?;
            let headers = parse_headers(&headers)?;
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;

            match state.api.request::<Value>(method, &path, body, headers).await {
                Ok(value) => print_json(&value),
                Err(e) => {
                    let error = AppError::from(e);
                    if error.is_auth_required() {
                        state.session.refresh();
                    }
                    ConsoleNotifier.error(
                        &state.normalizer.format_message(&error),
                        state.normalizer.details(&error).as_deref(),
                    );
                    return Err(CliError::Reported);
                }
            }
        }
    }
    Ok(())
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap, CliError> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let invalid = || CliError::InvalidHeader(entry.clone());
        let (name, value) = entry.split_once(':').ok_or_else(invalid)?;
        let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{pretty}"),
        Err(_) => println!("{value}"),
    }
}
