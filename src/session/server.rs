//! Scoped server override.

use std::ops::{Deref, DerefMut};

use super::Session;
use crate::transport::Transport;

/// Guard returned by [`Session::use_server`].
///
/// While it lives, requests made through it go to the temporary server.
/// Dropping it clears the override, including when the scope is left through
/// `?`, an early return, or a panic. The slot is single: dropping a guard
/// always resets to the configured server, never to an outer override.
pub struct ServerOverride<'a, T: Transport> {
    session: &'a mut Session<T>,
}

impl<'a, T: Transport> ServerOverride<'a, T> {
    pub(super) fn new(session: &'a mut Session<T>, server: String) -> Self {
        log::debug!("Using temporary server {server}");
        session.temporary_server = Some(server);
        Self { session }
    }
}

impl<T: Transport> Deref for ServerOverride<'_, T> {
    type Target = Session<T>;

    fn deref(&self) -> &Self::Target {
        self.session
    }
}

impl<T: Transport> DerefMut for ServerOverride<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session
    }
}

impl<T: Transport> Drop for ServerOverride<'_, T> {
    fn drop(&mut self) {
        if let Some(server) = self.session.temporary_server.take() {
            log::debug!("Temporary server {server} released");
        }
    }
}
