use async_trait::async_trait;

/// The session as seen by the data pages.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// `false` while the stored session is still being restored
    fn is_loaded(&self) -> bool;
    fn is_signed_in(&self) -> bool;
    /// Credential for the next request, if any.
    async fn get_token(&self) -> Option<String>;
    async fn sign_out(&self);
}
