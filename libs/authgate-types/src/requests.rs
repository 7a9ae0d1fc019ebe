use serde::Serialize;

/// Body of `POST /users/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /users`.
#[derive(Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_shape() {
        let request = LoginRequest {
            email: "a@b.com".into(),
            password: "longenough1".into(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "a@b.com", "password": "longenough1"})
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let request = SignupRequest {
            name: "Bat".into(),
            email: "a@b.com".into(),
            password: "longenough1".into(),
        };

        let debug = format!("{request:?}");
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("longenough1"));
    }
}
