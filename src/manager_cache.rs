use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::time::{Duration, Instant};
use log::debug;
use tokio::sync::Mutex;
use crate::manager_forecast::ForecastSource;
use crate::manager_owm::errors::OWMError;
use crate::models::ForecastDataset;

type Slot = Arc<Mutex<Option<(Instant, ForecastDataset)>>>;

/// Caches forecast datasets per city in front of another source.
///
/// Every city has its own slot, and a fetch holds that slot's lock until the provider
/// answers, so concurrent requests for the same city wait for the one fetch in flight
/// instead of starting their own. A slot left empty by a failed fetch is dropped, and
/// adding a slot for a new city drops every idle slot whose dataset has expired.
pub struct ForecastCache<S> {
    source: S,
    ttl: Duration,
    slots: StdMutex<HashMap<String, Slot>>,
}

impl<S: ForecastSource> ForecastCache<S> {
    /// Creates a new cache
    ///
    /// # Arguments
    ///
    /// * 'source' - the source to fetch from on a miss
    /// * 'ttl' - how long a fetched dataset is served before it is fetched again
    pub fn new(source: S, ttl: Duration) -> Self {
        Self { source, ttl, slots: StdMutex::new(HashMap::new()) }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the slot for a city, creating it if needed
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city
    fn slot(&self, city: &str) -> Slot {
        let mut slots = self.slots();
        if !slots.contains_key(city) {
            let before = slots.len();
            slots.retain(|_, slot| is_live(slot, self.ttl));
            if slots.len() < before {
                debug!("evicted {} stale cache slots", before - slots.len());
            }
        }
        slots.entry(city.to_string()).or_default().clone()
    }

    /// Drops the slot for a city if nobody uses it and it holds no fresh dataset
    ///
    /// # Arguments
    ///
    /// * 'city' - name of the city
    fn release(&self, city: &str) {
        let mut slots = self.slots();
        if slots.get(city).is_some_and(|slot| !is_live(slot, self.ttl)) {
            slots.remove(city);
        }
    }

    async fn fetch_into(&self, slot: &Slot, city: &str) -> Result<ForecastDataset, OWMError> {
        let mut cached = slot.lock().await;

        if let Some((fetched_at, dataset)) = cached.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!("cache hit for {}", city);
                return Ok(dataset.clone());
            }
        }

        debug!("cache miss for {}", city);
        let dataset = self.source.fetch(city).await?;
        *cached = Some((Instant::now(), dataset.clone()));

        Ok(dataset)
    }
}

/// A slot is live while a request holds it or while it holds a fresh dataset
///
/// # Arguments
///
/// * 'slot' - the slot, as stored in the map
/// * 'ttl' - dataset time to live
fn is_live(slot: &Slot, ttl: Duration) -> bool {
    if Arc::strong_count(slot) > 1 {
        return true;
    }
    match slot.try_lock() {
        Ok(cached) => cached.as_ref().is_some_and(|(fetched_at, _)| fetched_at.elapsed() < ttl),
        Err(_) => true,
    }
}

impl<S: ForecastSource> ForecastSource for ForecastCache<S> {
    async fn fetch(&self, city: &str) -> Result<ForecastDataset, OWMError> {
        let slot = self.slot(city);
        let result = self.fetch_into(&slot, city).await;

        if result.is_err() {
            drop(slot);
            self.release(city);
        }

        result
    }
}
