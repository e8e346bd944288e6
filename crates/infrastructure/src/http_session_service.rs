use taskdeck_core::{AccessToken, AppResult, Session, SessionUser};
use tracing::{info, warn};

use crate::HttpApiClient;
use crate::dto::SessionUserResponse;

/// Resolves the signed-in user behind a bearer token.
#[derive(Debug, Clone)]
pub struct HttpSessionService {
    client: HttpApiClient,
}

impl HttpSessionService {
    /// Creates a service over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }

    /// Loads `GET /auth/me` for the current session.
    pub async fn current_user(&self) -> AppResult<SessionUser> {
        let url = self.client.endpoint(&["auth", "me"])?;
        let response = self.client.get_json::<SessionUserResponse>(url).await?;
        Ok(SessionUser::from(response))
    }

    /// Resolves the user behind an issued token and stores the session.
    ///
    /// A token the API rejects leaves the context signed out.
    pub async fn establish(&self, access_token: AccessToken) -> AppResult<Session> {
        let url = self.client.endpoint(&["auth", "me"])?;
        let response = self
            .client
            .get_json_as::<SessionUserResponse>(url, &access_token)
            .await;

        match response {
            Ok(response) => {
                let user = SessionUser::from(response);
                info!(user_id = %user.user_id(), roles = ?user.role_names(), "signed in");
                let session = Session::new(user, access_token);
                self.client.session().sign_in(session.clone()).await;
                Ok(session)
            }
            Err(error) => {
                warn!(error = %error, "token rejected while establishing session");
                self.client.session().sign_out().await;
                Err(error)
            }
        }
    }
}
