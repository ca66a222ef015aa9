use hotel_api::{LoginRequest, LoginResponse};
use reqwest::Method;

use crate::{HotelClient, SdkError};

impl HotelClient {
    /// Sign in and keep the returned bearer token for later requests.
    ///
    /// A successful response without a token is still a successful login; the
    /// client then carries on without an Authorization header.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Option<String>, SdkError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let resp: Option<LoginResponse> = match self
            .send_json(Method::POST, &["Auth", "login"], &req)
            .await
        {
            Ok(resp) => resp,
            Err(SdkError::Api { status: 401, .. }) => return Err(SdkError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let token = resp.and_then(|r| r.token);
        if token.is_some() {
            tracing::info!(email, "signed in");
            self.set_token(token.clone());
        } else {
            tracing::warn!(email, "login succeeded without a token");
        }
        Ok(token)
    }

    /// Forget the bearer token
    pub fn logout(&mut self) {
        self.set_token(None);
    }
}
