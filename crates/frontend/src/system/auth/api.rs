use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};

use crate::shared::api_client::{decode, AnalyticsTransport, ApiFailure, HttpTransport};

const LOGIN_PATH: &str = "/system/auth/login";
const REFRESH_PATH: &str = "/system/auth/refresh";
const LOGOUT_PATH: &str = "/system/auth/logout";
const CURRENT_USER_PATH: &str = "/system/auth/me";

/// Login with username and password
pub async fn login(
    transport: &HttpTransport,
    username: String,
    password: String,
) -> Result<LoginResponse, ApiFailure> {
    let request = LoginRequest { username, password };
    decode(transport.post_json(LOGIN_PATH, &request, None).await?)
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(
    transport: &HttpTransport,
    refresh_token: String,
) -> Result<RefreshResponse, ApiFailure> {
    let request = RefreshRequest { refresh_token };
    decode(transport.post_json(REFRESH_PATH, &request, None).await?)
}

/// Revoke a refresh token
pub async fn logout(transport: &HttpTransport, refresh_token: String) -> Result<(), ApiFailure> {
    let request = RefreshRequest { refresh_token };
    transport.post_json(LOGOUT_PATH, &request, None).await?;
    Ok(())
}

pub async fn get_current_user(
    transport: &HttpTransport,
    access_token: &str,
) -> Result<UserInfo, ApiFailure> {
    decode(transport.get(CURRENT_USER_PATH, &[], Some(access_token)).await?)
}
