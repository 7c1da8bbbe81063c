//! Auth state adapter for the presentation layer
//!
//! Converts the gateway's current user into a principal usable by
//! authorization checks. Transitions are externally driven: after any
//! auth-mutating call the caller invokes [`AuthStateProvider::notify_changed`],
//! which re-queries the state and broadcasts it to every subscriber. There is
//! no polling and no push subscription to remote auth events.

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::gateway::HouseholdGateway;

/// The authenticated identity consumed by authorization checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The subject-id claim, the user's id
    pub subject: String,

    /// The email claim
    pub email: String,

    /// The display-name claim; falls back to the email
    pub display_name: String,
}

/// Authentication state of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No user is signed in; an identity with no claims
    Anonymous,

    /// A user is signed in
    Authenticated(Principal),
}

impl AuthState {
    /// Whether this state carries an authenticated principal
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The principal, when authenticated
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthState::Authenticated(principal) => Some(principal),
            AuthState::Anonymous => None,
        }
    }
}

type Subscriber = Box<dyn Fn(&AuthState) + Send + Sync>;

/// Publishes the auth state to presentation-layer subscribers
pub struct AuthStateProvider {
    gateway: Arc<HouseholdGateway>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl AuthStateProvider {
    /// Create a provider over a shared gateway
    pub fn new(gateway: Arc<HouseholdGateway>) -> Self {
        Self {
            gateway,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// The current state, recomputed from the gateway's last-known user
    pub fn current_state(&self) -> AuthState {
        match self.gateway.current_user() {
            None => AuthState::Anonymous,
            Some(user) => {
                let email = user.email.unwrap_or_default();
                AuthState::Authenticated(Principal {
                    subject: user.id,
                    display_name: email.clone(),
                    email,
                })
            }
        }
    }

    /// Register a callback invoked on every notified state change
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.subscribers.lock().unwrap().push(Box::new(callback));
    }

    /// Re-query the auth state and broadcast it to all subscribers
    ///
    /// Called by the presentation layer after any auth-mutating operation.
    pub fn notify_changed(&self) {
        let state = self.current_state();
        info!(authenticated = state.is_authenticated(), "auth state changed");

        let subscribers = self.subscribers.lock().unwrap();
        for subscriber in subscribers.iter() {
            subscriber(&state);
        }
    }
}
