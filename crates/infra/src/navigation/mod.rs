//! Session navigators
//!
//! The gateway asks a [`SessionNavigator`](backoffice_core::SessionNavigator)
//! to move to the login route when a session expires. This crate does not
//! render anything; it forwards the route to whoever owns the screen.

use backoffice_core::SessionNavigator;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Forwards routes over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: UnboundedSender<String>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiver the front end listens on.
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl SessionNavigator for ChannelNavigator {
    fn navigate(&self, route: &str) {
        match self.sender.send(route.to_string()) {
            Ok(()) => debug!(route, "navigation requested"),
            Err(_) => warn!(route, "navigation receiver dropped; route ignored"),
        }
    }
}
