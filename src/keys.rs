//! Application-wide key listeners.
//!
//! `GlobalKeys` sees every key press before focus-specific handling. A
//! listener stays registered exactly as long as its `Subscription` guard is
//! alive; dropping the guard unregisters it, also while a dispatch is running.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut(&KeyEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    dispatching: bool,
    removed_during_dispatch: Vec<u64>,
}

/// Single-threaded registry of global key listeners
#[derive(Clone, Default)]
pub struct GlobalKeys {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for GlobalKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalKeys")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl GlobalKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&KeyEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        log::debug!("GlobalKeys: listener {} subscribed", id);

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `key` to every listener in subscription order. Returns the
    /// number of listeners that received it.
    pub fn dispatch(&self, key: &KeyEvent) -> usize {
        let mut listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.dispatching = true;
            std::mem::take(&mut registry.listeners)
        };

        for (_, listener) in listeners.iter_mut() {
            listener(key);
        }
        let delivered = listeners.len();

        let mut registry = self.registry.borrow_mut();
        registry.dispatching = false;
        let removed = std::mem::take(&mut registry.removed_during_dispatch);
        listeners.retain(|(id, _)| !removed.contains(id));
        // Listeners subscribed by a handler landed in the emptied registry.
        let added = std::mem::take(&mut registry.listeners);
        listeners.extend(added);
        registry.listeners = listeners;

        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Registration guard returned by [`GlobalKeys::subscribe`]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = registry.try_borrow_mut() else {
            log::warn!("GlobalKeys: registry busy, listener {} not released", self.id);
            return;
        };

        let before = registry.listeners.len();
        let id = self.id;
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        if registry.dispatching && registry.listeners.len() == before {
            registry.removed_during_dispatch.push(id);
        }
        log::debug!("GlobalKeys: listener {} released", id);
    }
}

/// A single key that must be pressed without Alt, Ctrl, Super or Meta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: char,
}

impl Shortcut {
    pub fn new(key: char) -> Self {
        Self { key }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        let blocking =
            KeyModifiers::ALT | KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META;
        event.code == KeyCode::Char(self.key) && !event.modifiers.intersects(blocking)
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self::new('/')
    }
}
