//! Pause for out-of-band authorization

use crate::connect::AuthorizationLink;
use crate::error::Result;
use async_trait::async_trait;

/// Waits until the user reports that the authorization link was visited
#[async_trait]
pub trait AuthorizationPrompt: Send + Sync {
    async fn wait_for_authorization(&self, link: &AuthorizationLink) -> Result<()>;
}

/// Prompt that returns immediately, for unattended runs
pub struct NoPrompt;

#[async_trait]
impl AuthorizationPrompt for NoPrompt {
    async fn wait_for_authorization(&self, _link: &AuthorizationLink) -> Result<()> {
        Ok(())
    }
}
