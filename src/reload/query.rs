use std::future::Future;

use super::{ReloadBus, Resource};

/// Cached result of a fetch, refreshed only when its resource was signalled
#[derive(Debug)]
pub struct Query<T> {
    resource: Resource,
    fetched_at: Option<u64>,
    value: Option<T>,
}

impl<T> Query<T> {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            fetched_at: None,
            value: None,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn cached(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_stale(&self, bus: &ReloadBus) -> bool {
        self.value.is_none() || self.fetched_at != Some(bus.generation(self.resource))
    }

    /// Forget the cached value so the next `load` fetches
    pub fn invalidate(&mut self) {
        self.fetched_at = None;
        self.value = None;
    }

    /// Return the cached value, fetching first if the resource changed since the last fetch.
    /// A failed fetch leaves the previous value and staleness in place.
    pub async fn load<F, Fut, E>(&mut self, bus: &ReloadBus, fetch: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let stale = self.is_stale(bus);
        let value = match self.value.take() {
            Some(value) if !stale => value,
            previous => {
                // sampled first so a change during the fetch is not lost
                let generation = bus.generation(self.resource);
                match fetch().await {
                    Ok(value) => {
                        self.fetched_at = Some(generation);
                        value
                    }
                    Err(e) => {
                        self.value = previous;
                        return Err(e);
                    }
                }
            }
        };
        Ok(self.value.insert(value))
    }
}
