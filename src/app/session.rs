//! Identity and focus shared between the input and server activities.

use parking_lot::Mutex;
use std::sync::Arc;

/// Returns true if `target` names a channel rather than a nick.
pub fn is_channel(target: &str) -> bool {
    target.starts_with('#') || target.starts_with('&')
}

/// A consistent copy of the session taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub identity: String,
    pub focus: String,
}

impl SessionView {
    /// Focus is the private console rather than a conversation.
    pub fn at_console(&self) -> bool {
        self.focus == self.identity
    }

    pub fn focus_is_channel(&self) -> bool {
        is_channel(&self.focus)
    }

    /// A message sent to `target` belongs to the focused window.
    pub fn is_addressed_to_focus(&self, target: &str) -> bool {
        (!self.focus_is_channel() && target == self.identity) || self.focus == target
    }
}

/// Cloneable handle to the session. All writes go through
/// [`Session::set_focus`] and [`Session::set_identity`].
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionView>>,
}

impl Session {
    /// A new session focused on its own console.
    pub fn new(identity: impl Into<String>) -> Self {
        let identity = identity.into();
        Self {
            inner: Arc::new(Mutex::new(SessionView {
                focus: identity.clone(),
                identity,
            })),
        }
    }

    pub fn view(&self) -> SessionView {
        self.inner.lock().clone()
    }

    pub fn identity(&self) -> String {
        self.inner.lock().identity.clone()
    }

    pub fn focus(&self) -> String {
        self.inner.lock().focus.clone()
    }

    pub fn set_focus(&self, target: impl Into<String>) {
        self.inner.lock().focus = target.into();
    }

    /// Change nickname. The console window follows the nickname; any other
    /// focus is left alone.
    pub fn set_identity(&self, new_name: impl Into<String>) {
        let new_name = new_name.into();
        let mut view = self.inner.lock();
        if view.focus == view.identity {
            view.focus = new_name.clone();
        }
        view.identity = new_name;
    }

    pub fn is_addressed_to_focus(&self, target: &str) -> bool {
        self.inner.lock().is_addressed_to_focus(target)
    }
}
