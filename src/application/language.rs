use std::str::FromStr;

/// Language used for every user-facing text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserLanguage {
    #[default]
    Mn,
    En,
}

impl UserLanguage {
    /// Accepts raw values such as `en`, `en-US` or an `Accept-Language` list.
    /// Anything unrecognised falls back to Mongolian.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let candidate = raw
            .unwrap_or("mn")
            .split(',')
            .next()
            .unwrap_or("mn")
            .split(['-', '_'])
            .next()
            .unwrap_or("mn")
            .trim()
            .to_lowercase();
        match candidate.as_str() {
            "en" => UserLanguage::En,
            _ => UserLanguage::Mn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserLanguage::Mn => "mn",
            UserLanguage::En => "en",
        }
    }
}

impl FromStr for UserLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_raw(Some(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(UserLanguage::from_raw(Some("en")), UserLanguage::En);
        assert_eq!(UserLanguage::from_raw(Some("en-US,mn;q=0.8")), UserLanguage::En);
        assert_eq!(UserLanguage::from_raw(Some("EN_gb")), UserLanguage::En);
        assert_eq!(UserLanguage::from_raw(Some("mn")), UserLanguage::Mn);
        assert_eq!(UserLanguage::from_raw(Some("de")), UserLanguage::Mn);
        assert_eq!(UserLanguage::from_raw(None), UserLanguage::Mn);
    }

    #[test]
    fn test_parse() {
        let lang: UserLanguage = "en".parse().unwrap();
        assert_eq!(lang.as_str(), "en");
    }
}
