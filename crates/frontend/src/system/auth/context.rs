use async_trait::async_trait;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::identity::IdentityProvider;
use super::{api, storage};
use crate::shared::api_client::{ApiFailure, HttpTransport};
use crate::shared::config::AppConfig;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Set once the stored session has been restored or discarded
    pub is_loaded: bool,
}

impl AuthState {
    fn signed_in(access_token: String, user_info: UserInfo) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: Some(user_info),
            is_loaded: true,
        }
    }

    fn signed_out() -> Self {
        Self {
            is_loaded: true,
            ..Self::default()
        }
    }

    /// Token kept from storage while the server could not confirm it.
    fn unverified(access_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: None,
            is_loaded: true,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let (auth_state, set_auth_state) = signal(AuthState::default());

    let transport = HttpTransport::new(config);
    spawn_local(async move {
        let restored = restore_session(&transport).await;
        log::debug!("Session restored, signed in: {}", restored.is_signed_in());
        set_auth_state.set(restored);
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Validate the stored access token, refreshing it once if it was rejected.
async fn restore_session(transport: &HttpTransport) -> AuthState {
    let Some(access_token) = storage::get_access_token() else {
        return AuthState::signed_out();
    };

    match api::get_current_user(transport, &access_token).await {
        Ok(user_info) => return AuthState::signed_in(access_token, user_info),
        Err(e) if !token_rejected(&e) => {
            // keep the tokens; the next request can still use them
            log::warn!("Session check failed, keeping stored tokens: {}", e);
            return AuthState::unverified(access_token);
        }
        Err(e) => log::info!("Stored access token rejected ({}), refreshing", e),
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return AuthState::signed_out();
    };
    let refreshed = match api::refresh_token(transport, refresh_token).await {
        Ok(response) => response,
        Err(e) => {
            log::info!("Session refresh failed: {}", e);
            if token_rejected(&e) {
                storage::clear_tokens();
            }
            return AuthState::signed_out();
        }
    };

    storage::save_access_token(&refreshed.access_token);
    match api::get_current_user(transport, &refreshed.access_token).await {
        Ok(user_info) => AuthState::signed_in(refreshed.access_token, user_info),
        Err(e) => {
            log::warn!("Refreshed token rejected: {}", e);
            storage::clear_tokens();
            AuthState::signed_out()
        }
    }
}

/// The server answered that the credential itself is invalid, as opposed
/// to being unreachable or failing for another reason.
fn token_rejected(failure: &ApiFailure) -> bool {
    failure.status() == Some(401)
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Sign in and persist both tokens.
pub async fn do_login(
    config: &AppConfig,
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), ApiFailure> {
    let transport = HttpTransport::new(config.clone());
    let response = api::login(&transport, username, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);
    set_auth_state.set(AuthState::signed_in(response.access_token, response.user));
    Ok(())
}

/// Revoke the refresh token best-effort and forget the session.
pub async fn do_logout(config: &AppConfig, set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        let transport = HttpTransport::new(config.clone());
        if let Err(e) = api::logout(&transport, refresh_token).await {
            log::warn!("Failed to revoke refresh token: {}", e);
        }
    }

    storage::clear_tokens();
    let _ = set_auth_state.try_set(AuthState::signed_out());
}

/// [`IdentityProvider`] over the session signals.
#[derive(Clone)]
pub struct SessionIdentity {
    state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
    config: AppConfig,
}

impl SessionIdentity {
    pub fn new(
        state: ReadSignal<AuthState>,
        set_state: WriteSignal<AuthState>,
        config: AppConfig,
    ) -> Self {
        Self {
            state,
            set_state,
            config,
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for SessionIdentity {
    fn is_loaded(&self) -> bool {
        self.state
            .try_with_untracked(|s| s.is_loaded)
            .unwrap_or(false)
    }

    fn is_signed_in(&self) -> bool {
        self.state
            .try_with_untracked(AuthState::is_signed_in)
            .unwrap_or(false)
    }

    async fn get_token(&self) -> Option<String> {
        self.state
            .try_with_untracked(|s| s.access_token.clone())
            .flatten()
    }

    async fn sign_out(&self) {
        do_logout(&self.config, self.set_state).await;
    }
}
