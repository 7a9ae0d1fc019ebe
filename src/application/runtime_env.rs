use std::str::FromStr;

/// Build/runtime profile. Only `Development` exposes error details.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    #[default]
    Production,
}

impl RuntimeEnv {
    pub fn is_development(&self) -> bool {
        matches!(self, RuntimeEnv::Development)
    }
}

impl FromStr for RuntimeEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(RuntimeEnv::Development),
            "production" | "prod" => Ok(RuntimeEnv::Production),
            other => Err(format!(
                "unknown APP_ENV `{other}`, expected `development` or `production`"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("development".parse::<RuntimeEnv>(), Ok(RuntimeEnv::Development));
        assert_eq!(" Prod ".parse::<RuntimeEnv>(), Ok(RuntimeEnv::Production));
        assert!("staging".parse::<RuntimeEnv>().is_err());
    }

    #[test]
    fn test_default_is_production() {
        assert!(!RuntimeEnv::default().is_development());
    }
}
