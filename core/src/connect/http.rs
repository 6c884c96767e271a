//! HTTP implementation of the connector client
//!
//! Authenticates with the OAuth 2.0 client-credentials grant and sends every
//! further call with the resulting bearer token. The token is cached until
//! shortly before it expires.

use super::client::ConnectClient;
use super::types::{AuthorizationLink, ConnectedAccount, ToolExecution};
use crate::config::ResolvedConnectConfig;
use crate::error::{ConfigError, ConnectError, Result};
use crate::tools::ToolResult;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

const GET_OR_CREATE_ACCOUNT_PATH: &str = "/api/v1/connect/accounts:getOrCreate";
const AUTHORIZATION_LINK_PATH: &str = "/api/v1/connect/accounts:authorizationLink";
const EXECUTE_TOOL_PATH: &str = "/api/v1/connect/tools:execute";

/// Seconds before expiry at which a cached token is refreshed
const TOKEN_REFRESH_MARGIN_SECS: i64 = 30;
/// Lifetime assumed when the token response carries no `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 300;

/// OAuth token response (standard OAuth 2.0)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Serialize)]
struct AccountRequest<'a> {
    connection_name: &'a str,
    identifier: &'a str,
}

#[derive(Deserialize)]
struct AccountResponse {
    connected_account: ConnectedAccount,
}

/// Connector client talking to the service over HTTPS
pub struct HttpConnectClient {
    config: ResolvedConnectConfig,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

impl HttpConnectClient {
    /// Create a new client from a resolved configuration
    pub fn new(config: ResolvedConnectConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|message| ConfigError::Invalid { message })?;

        Ok(Self {
            config,
            client: Client::new(),
            token: Mutex::new(None),
        })
    }

    /// Get a bearer token, requesting a new one when the cached token is
    /// missing or about to expire
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
            debug!("Cached access token is about to expire, refreshing");
        }

        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let token_url = self.config.token_url();
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        if let Some(scope) = &self.config.scope {
            form.push(("scope", scope.as_str()));
        }

        debug!("Requesting client-credentials token from {}", token_url);

        let response = self
            .client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::Authentication {
                message: format!("token request failed with status {}: {}", status, body),
            }
            .into());
        }

        let token: TokenResponse = response.json().await.map_err(|e| ConnectError::Authentication {
            message: format!("Failed to parse token response: {}", e),
        })?;

        let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        debug!("Token acquired, expires in {} seconds", lifetime);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        })
    }

    /// POST a JSON body to `path` with the bearer token and decode the reply
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.config.env_url, path);

        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ConnectError::Api { status, message }.into());
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ConnectClient for HttpConnectClient {
    async fn get_or_create_connected_account(
        &self,
        connection_name: &str,
        identifier: &str,
    ) -> Result<ConnectedAccount> {
        let request = AccountRequest {
            connection_name,
            identifier,
        };
        let response: AccountResponse = self.post_json(GET_OR_CREATE_ACCOUNT_PATH, &request).await?;
        Ok(response.connected_account)
    }

    async fn get_authorization_link(
        &self,
        connection_name: &str,
        identifier: &str,
    ) -> Result<AuthorizationLink> {
        let request = AccountRequest {
            connection_name,
            identifier,
        };
        self.post_json(AUTHORIZATION_LINK_PATH, &request).await
    }

    async fn execute_tool(&self, execution: ToolExecution) -> Result<ToolResult> {
        execution.validate()?;
        self.post_json(EXECUTE_TOOL_PATH, &execution).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> HttpConnectClient {
        let config = ResolvedConnectConfig::new(
            server.url(),
            "skc_test".to_string(),
            "test_secret".to_string(),
        );
        HttpConnectClient::new(config).unwrap()
    }

    async fn mock_token(server: &mut Server, expires_in: i64, hits: usize) -> mockito::Mock {
        server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
                Matcher::UrlEncoded("client_id".into(), "skc_test".into()),
                Matcher::UrlEncoded("client_secret".into(), "test_secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"access_token": "tok_abc", "expires_in": expires_in, "token_type": "Bearer"})
                    .to_string(),
            )
            .expect(hits)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_get_or_create_connected_account() {
        let mut server = Server::new_async().await;
        let token = mock_token(&mut server, 3600, 1).await;
        let account = server
            .mock("POST", GET_OR_CREATE_ACCOUNT_PATH)
            .match_header("authorization", "Bearer tok_abc")
            .match_body(Matcher::Json(
                json!({"connection_name": "gmail", "identifier": "user_123"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"connected_account": {
                    "id": "ca_1",
                    "connection_name": "gmail",
                    "identifier": "user_123",
                    "status": "ACTIVE"
                }})
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .get_or_create_connected_account("gmail", "user_123")
            .await
            .unwrap();

        assert_eq!(result.id, "ca_1");
        assert!(result.is_active());
        token.assert_async().await;
        account.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_is_reused_while_fresh() {
        let mut server = Server::new_async().await;
        let token = mock_token(&mut server, 3600, 1).await;
        let _link = server
            .mock("POST", AUTHORIZATION_LINK_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"link": "https://auth.example.com/consent"}"#)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server);
        let first = client.get_authorization_link("gmail", "user_123").await.unwrap();
        let second = client.get_authorization_link("gmail", "user_123").await.unwrap();

        assert_eq!(first.link, "https://auth.example.com/consent");
        assert_eq!(first, second);
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_refreshed_near_expiry() {
        let mut server = Server::new_async().await;
        // Expires inside the refresh margin, so every call fetches a new token.
        let token = mock_token(&mut server, 5, 2).await;

        let client = client_for(&server);
        client.access_token().await.unwrap();
        client.access_token().await.unwrap();

        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_execute_tool_returns_result() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, 3600, 1).await;
        let _execute = server
            .mock("POST", EXECUTE_TOOL_PATH)
            .match_body(Matcher::PartialJson(json!({
                "tool_name": "googlecalendar_list_events",
                "identifier": "default",
                "tool_input": {"max_results": 1}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"data": {"events": [{"summary": "Standup"}]}, "execution_id": "exec_9"})
                    .to_string(),
            )
            .create_async()
            .await;

        let mut input = serde_json::Map::new();
        input.insert("max_results".to_string(), json!(1));
        let execution = ToolExecution::new("googlecalendar_list_events")
            .for_identifier("default")
            .with_input(input);

        let client = client_for(&server);
        let result = client.execute_tool(execution).await.unwrap();

        assert_eq!(result.execution_id.as_deref(), Some("exec_9"));
        assert!(result.data.unwrap().contains_key("events"));
    }

    #[tokio::test]
    async fn test_execute_tool_without_target_makes_no_request() {
        let server = Server::new_async().await;
        let client = client_for(&server);

        let err = client
            .execute_tool(ToolExecution::new("gmail_fetch_mails"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Connect(ConnectError::MissingTarget { .. })
        ));
    }

    #[tokio::test]
    async fn test_token_failure_is_authentication_error() {
        let mut server = Server::new_async().await;
        let _token = server
            .mock("POST", "/oauth/token")
            .with_status(401)
            .with_body(r#"{"error": "invalid_client"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_or_create_connected_account("gmail", "user_123")
            .await
            .unwrap_err();

        match err {
            Error::Connect(ConnectError::Authentication { message }) => {
                assert!(message.contains("invalid_client"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_carries_status() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, 3600, 1).await;
        let _execute = server
            .mock("POST", EXECUTE_TOOL_PATH)
            .with_status(404)
            .with_body("tool not found")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .execute_tool(ToolExecution::new("nope").for_account("ca_1"))
            .await
            .unwrap_err();

        match err {
            Error::Connect(ConnectError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "tool not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_tool_accepts_bare_payload() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, 3600, 1).await;
        let _execute = server
            .mock("POST", EXECUTE_TOOL_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": "ok", "count": 3}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .execute_tool(ToolExecution::new("custom_tool").for_account("ca_1"))
            .await
            .unwrap();

        let data = result.data.unwrap();
        assert_eq!(data["result"], "ok");
        assert_eq!(data["count"], 3);
    }

    #[tokio::test]
    async fn test_undecodable_reply_is_http_error() {
        let mut server = Server::new_async().await;
        let _token = mock_token(&mut server, 3600, 1).await;
        let _link = server
            .mock("POST", AUTHORIZATION_LINK_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_authorization_link("gmail", "user_123")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let config = ResolvedConnectConfig::new(
            "http://127.0.0.1:1".to_string(),
            "skc_test".to_string(),
            "test_secret".to_string(),
        );
        let client = HttpConnectClient::new(config).unwrap();

        let err = client.access_token().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ResolvedConnectConfig::new(
            "ftp://nope".to_string(),
            "id".to_string(),
            "secret".to_string(),
        );
        assert!(HttpConnectClient::new(config).is_err());
    }
}
