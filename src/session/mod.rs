//! Per-test session state.
//!
//! A [`Session`] owns everything one test case needs: the transport, the
//! last request and response, extra headers, and the temporary server slot.

mod server;
mod state;

pub use server::ServerOverride;
pub use state::Session;
