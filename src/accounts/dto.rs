use serde::{Deserialize, Serialize};

/// Request body for registration: the account fields arrive nested under
/// a `user` key.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user: NewUser,
}

/// A registration candidate. The plaintext password lives only for the
/// duration of one request; its `Debug` output is redacted so it can never
/// leak through a log line.
#[derive(Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Acknowledgment returned after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_payload_deserializes() {
        let body = r#"{"user":{"username":"alice","email":"a@x.com","password":"s3cret"}}"#;
        let req: RegisterRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.user.username, "alice");
        assert_eq!(req.user.email, "a@x.com");
        assert_eq!(req.user.password, "s3cret");
    }

    #[test]
    fn debug_never_shows_password() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"user":{"username":"alice","email":"a@x.com","password":"s3cret"}}"#,
        )
        .unwrap();
        let rendered = format!("{:?}", req);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
