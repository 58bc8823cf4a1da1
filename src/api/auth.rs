use rand::{distributions::Alphanumeric, Rng};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    client::NewsDesk,
    error::{AuthError, ClientError},
    http::{HttpClient, HttpRequest},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
}

impl NewsDesk {
    /// Signs in and remembers the session's user id. Custom-token sign-in
    /// falls back to anonymous sign-in, and an unreachable provider falls
    /// back to a locally generated identifier, so this always yields an id.
    pub async fn sign_in(&self) -> String {
        let user_id = match self.provider_sign_in().await {
            Ok(uid) => {
                info!("Signed in with provider identity");
                uid
            }
            Err(err) => {
                warn!(error = %err, "Identity provider unreachable, using local identity");
                local_user_id()
            }
        };
        self.set_user_id(user_id.clone());
        user_id
    }

    async fn provider_sign_in(&self) -> Result<String, ClientError> {
        if let Some(token) = &self.config.auth_token {
            match self.sign_in_request("accounts:signInWithCustomToken", json!({
                "token": token,
                "returnSecureToken": true,
            }))
            .await
            {
                Ok(uid) => return Ok(uid),
                Err(err) => {
                    warn!(
                        error = %AuthError::TokenRejected(err.to_string()),
                        "Falling back to anonymous sign-in"
                    );
                }
            }
        }
        self.sign_in_request("accounts:signUp", json!({ "returnSecureToken": true }))
            .await
    }

    async fn sign_in_request(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<String, ClientError> {
        let url = format!("{}/v1/{}", self.endpoints.identity, action);
        let req = HttpRequest::post(url)
            .query("key", &self.config.firebase_api_key)
            .json(&body)?;
        let res: SignInResponse = self.request(req).await?;
        if res.local_id.is_empty() {
            return Err(AuthError::SignInFailed("provider returned no user id".to_string()).into());
        }
        Ok(res.local_id)
    }
}

/// Random session-scoped identifier used when no provider identity exists.
pub(crate) fn local_user_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(28)
        .map(char::from)
        .collect()
}
