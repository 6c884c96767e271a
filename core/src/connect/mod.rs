//! Connector service access
//!
//! A connected account links an end-user identifier to a third-party
//! connection (Gmail, Google Calendar, ...). Tools run against that grant.

pub mod client;
pub mod fixture;
pub mod http;
pub mod types;

pub use client::ConnectClient;
pub use fixture::{ConnectFixture, FixtureConnectClient};
pub use http::HttpConnectClient;
pub use types::{AccountStatus, AuthorizationLink, ConnectedAccount, ToolExecution};
