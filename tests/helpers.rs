// Shared test helpers for sessions pointed at mock servers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use remote_http_testing::{Session, SessionConfig};

/// Creates a network session whose default server is `server_uri`.
#[allow(dead_code)] // Used by other test files
pub fn session_for(server_uri: &str) -> Session {
    Session::new(SessionConfig::default().with_server(server_uri))
        .expect("Failed to build HTTP session")
}

/// Returns a base URL on which nothing is listening.
#[allow(dead_code)] // Used by other test files
pub fn closed_port_url() -> String {
    // Bind then drop a listener so the port is known to be free
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}
