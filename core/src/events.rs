//! In-process fan-out of auth events.
//!
//! Gateway implementations own an `AuthEventHub` and emit into it after each
//! state-changing call. Handlers run synchronously in subscription order.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::GatewayError;
use crate::session::{AuthEvent, AuthHandler, AuthSubscription, Session};

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(u64, AuthHandler)>,
}

#[derive(Clone, Default)]
pub struct AuthEventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl AuthEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: AuthHandler) -> HubSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, handler));
        tracing::debug!(id, "auth subscription added");

        HubSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
            released: false,
        }
    }

    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        // Snapshot so handlers may subscribe or unsubscribe while running.
        let handlers: Vec<AuthHandler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        tracing::debug!(%event, listeners = handlers.len(), "emitting auth event");
        for handler in handlers {
            handler(event, session);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

pub struct HubSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
    released: bool,
}

impl AuthSubscription for HubSubscription {
    fn unsubscribe(&mut self) -> Result<(), GatewayError> {
        if self.released {
            return Err(GatewayError::SubscriptionReleased);
        }
        self.released = true;

        let hub = self.hub.upgrade().ok_or(GatewayError::SubscriptionReleased)?;
        hub.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        tracing::debug!(id = self.id, "auth subscription released");
        Ok(())
    }
}
