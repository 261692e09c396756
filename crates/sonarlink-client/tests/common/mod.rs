//! Shared fixtures for session tests.

#![allow(dead_code)]

use std::sync::Arc;

use sonarlink_client::{ConnectionRequest, Session, SessionConfig};
use sonarlink_transport::mock::ScriptedTransport;
use sonarlink_transport::operations::{
    CredentialsResponse, ValidateCredentialsRequest, VersionRequest, VersionResponse,
};
use tokio_util::sync::CancellationToken;

pub type TestSession = Session<Arc<ScriptedTransport>>;

pub fn server_connection() -> ConnectionRequest {
    let uri = url::Url::parse("https://quality.example.com/").unwrap();
    ConnectionRequest::basic(uri, "admin", "admin")
}

pub fn script_handshake(transport: &ScriptedTransport, version: &str) {
    transport
        .push_ok::<ValidateCredentialsRequest>(CredentialsResponse { valid: true })
        .push_ok::<VersionRequest>(VersionResponse {
            version: version.to_string(),
        });
}

pub async fn connected_session(version: &str) -> (TestSession, Arc<ScriptedTransport>) {
    connected_session_with(version, SessionConfig::default()).await
}

pub async fn connected_session_with(
    version: &str,
    config: SessionConfig,
) -> (TestSession, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    script_handshake(&transport, version);

    let session = Session::with_config(Arc::clone(&transport), config);
    session
        .connect(server_connection(), &CancellationToken::new())
        .await
        .expect("handshake should succeed");

    (session, transport)
}
