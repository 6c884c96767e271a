//! Print the authorization link of a connection

use super::{build_client, ClientSource};
use anyhow::Result;
use tracing::info;

/// Get or create the connected account and print its authorization link
pub async fn auth_link_command(
    source: ClientSource,
    connection: String,
    identifier: String,
) -> Result<()> {
    let client = build_client(source).await?;

    let account = client
        .get_or_create_connected_account(&connection, &identifier)
        .await?;
    println!("🔗 Connected account ID: {}", account.id);
    println!("🔐 Account status: {}", account.status);

    if account.is_active() {
        info!("Account {} is already active", account.id);
    }

    let link = client.get_authorization_link(&connection, &identifier).await?;
    println!("🔗 Authorization URL: {}", link.link);

    Ok(())
}
