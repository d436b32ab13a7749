//! Change notification used to invalidate fetched data.
//!
//! Each resource kind owns a generation counter. Mutations bump the counter of
//! the resource they touched; readers compare the generation they fetched at
//! with the current one. Counters only grow, so every change is observable.

mod query;

pub use query::Query;

use std::collections::HashMap;

use tokio::sync::watch;

/// Resource kinds that can be invalidated independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Courses,
    Projects,
    Users,
    Profile,
    Dashboard,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Courses,
        Resource::Projects,
        Resource::Users,
        Resource::Profile,
        Resource::Dashboard,
    ];
}

/// One monotonically increasing generation counter
#[derive(Debug)]
pub struct ReloadSignal {
    tx: watch::Sender<u64>,
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn read(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Bump the generation; works with or without subscribers
    pub fn signal_change(&self) {
        self.tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Receiver woken on every change after subscription
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

/// Per-resource reload signals
#[derive(Debug)]
pub struct ReloadBus {
    signals: HashMap<Resource, ReloadSignal>,
}

impl Default for ReloadBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadBus {
    pub fn new() -> Self {
        Self {
            signals: Resource::ALL
                .into_iter()
                .map(|r| (r, ReloadSignal::new()))
                .collect(),
        }
    }

    fn signal(&self, resource: Resource) -> &ReloadSignal {
        // every resource is inserted in `new`
        &self.signals[&resource]
    }

    pub fn generation(&self, resource: Resource) -> u64 {
        self.signal(resource).read()
    }

    pub fn signal_change(&self, resource: Resource) {
        tracing::debug!(?resource, "reload signalled");
        self.signal(resource).signal_change();
    }

    pub fn signal_many(&self, resources: &[Resource]) {
        for resource in resources {
            self.signal_change(*resource);
        }
    }

    pub fn signal_all(&self) {
        self.signal_many(&Resource::ALL);
    }

    pub fn subscribe(&self, resource: Resource) -> watch::Receiver<u64> {
        self.signal(resource).subscribe()
    }
}
