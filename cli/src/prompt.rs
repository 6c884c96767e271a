//! Terminal authorization prompt

use agent_actions_core::error::Result;
use agent_actions_core::workflow::AuthorizationPrompt;
use agent_actions_core::AuthorizationLink;
use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Waits for the user to press Enter after visiting the link
pub struct StdinPrompt;

#[async_trait]
impl AuthorizationPrompt for StdinPrompt {
    async fn wait_for_authorization(&self, _link: &AuthorizationLink) -> Result<()> {
        let mut stdout = io::stdout();
        stdout
            .write_all("⌨️  Press Enter after completing authorization...".as_bytes())
            .await?;
        stdout.flush().await?;

        let mut line = String::new();
        BufReader::new(io::stdin()).read_line(&mut line).await?;
        Ok(())
    }
}
