//! Auth Endpoints
//!
//! Sign-in, sign-up and sign-out against `/api/auth`, keeping the session in
//! step with the outcome.

use tracing::info;

use super::ApiClient;
use crate::error::ClientError;
use crate::models::{Credentials, SignupResponse, TokenResponse};
use crate::validation::{validate_login, validate_signup};

impl ApiClient {
    /// Exchange credentials for an access token and persist it
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), ClientError> {
        validate_login(email, password)?;
        let token: TokenResponse = self
            .post("/api/auth/login", &Credentials { email, password })
            .await?;
        self.session().set_token(&token.access_token);
        info!("signed in");
        Ok(())
    }

    /// Create an account.
    ///
    /// Returns `true` when the backend also issued a token, i.e. the user is
    /// now signed in; otherwise they still have to log in.
    pub async fn sign_up(&self, email: &str, password: &str, confirm_password: &str) -> Result<bool, ClientError> {
        validate_signup(email, password, confirm_password)?;
        let response: SignupResponse = self
            .post("/api/auth/signup", &Credentials { email, password })
            .await?;
        let signed_in = match response.access_token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.session().set_token(token);
                true
            }
            _ => false,
        };
        info!(signed_in, "account created");
        Ok(signed_in)
    }

    /// Forget the token; no server call is made
    pub fn sign_out(&self) {
        self.session().clear();
        info!("signed out");
    }

    /// Whether a token is stored. Does not ask the server.
    pub fn check_auth(&self) -> bool {
        self.session().is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::error::{ApiError, ClientError, ValidationError};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sign_in_persists_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({"email": "a@b.co", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "jwt-1",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(!client.check_auth());
        client.sign_in("a@b.co", "hunter22").await.unwrap();
        assert!(client.check_auth());
        assert_eq!(client.session().token().as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn test_sign_in_failure_leaves_session_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.sign_in("a@b.co", "wrongpass").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(matches!(err, ClientError::Api(ApiError::Status { status_code: 401, .. })));
        assert!(!client.check_auth());
    }

    #[tokio::test]
    async fn test_sign_in_validation_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).sign_in("", "secret").await.unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::MissingCredentials));
    }

    #[tokio::test]
    async fn test_sign_up_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "u1",
                "email": "a@b.co",
                "created_at": "2025-01-01T10:00:00"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let signed_in = client.sign_up("a@b.co", "password1", "password1").await.unwrap();
        assert!(!signed_in);
        assert!(!client.check_auth());
    }

    #[tokio::test]
    async fn test_sign_up_with_token_signs_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "access_token": "jwt-new",
                "user": {"id": "u1", "email": "a@b.co", "created_at": "2025-01-01T10:00:00"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.sign_up("a@b.co", "password1", "password1").await.unwrap());
        assert_eq!(client.session().token().as_deref(), Some("jwt-new"));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_mismatch_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .sign_up("a@b.co", "password1", "password2")
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_sign_out_clears_token() {
        let server = MockServer::start().await;
        let client = authed_client_for(&server, "jwt-1");
        assert!(client.check_auth());
        client.sign_out();
        assert!(!client.check_auth());
    }
}
