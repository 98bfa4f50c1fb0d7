//! Background refresh worker.
//!
//! # Invariants
//! - One aggregation at a time, on one worker thread.
//! - Only the snapshot for the newest request is handed back; older ones are dropped.
//! - Queued requests are coalesced to the newest before computing.

use super::aggregator::AnalyticsAggregator;
use super::snapshot::AnalyticsSnapshot;
use crate::repo::record_store::{RecordStore, RepoResult};
use crate::time::{Calendar, Clock, TimeRange};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

enum Request {
    Compute { generation: u64, range: TimeRange },
    Shutdown,
}

/// Snapshot tagged with the request generation that produced it.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub generation: u64,
    pub snapshot: AnalyticsSnapshot,
}

/// Runs aggregations off the caller's thread.
pub struct AnalyticsWorker {
    requests: Sender<Request>,
    deliveries: Receiver<Delivery>,
    generation: u64,
    last_range: Option<TimeRange>,
    handle: Option<JoinHandle<()>>,
}

impl AnalyticsWorker {
    /// Spawns the worker thread.
    ///
    /// `open_store` runs on the worker thread. When it fails every request is
    /// answered with an all-zero snapshot.
    pub fn spawn<S, F>(open_store: F, calendar: Calendar, clock: Arc<dyn Clock>) -> Self
    where
        S: RecordStore + 'static,
        F: FnOnce() -> RepoResult<S> + Send + 'static,
    {
        let (request_tx, request_rx) = unbounded::<Request>();
        let (delivery_tx, delivery_rx) = unbounded::<Delivery>();

        let handle = std::thread::Builder::new()
            .name("lifelog-analytics".to_string())
            .spawn(move || {
                let aggregator = match open_store() {
                    Ok(store) => Some(AnalyticsAggregator::new(store, calendar, clock)),
                    Err(err) => {
                        error!(
                            "event=analytics_worker module=analytics status=error error_code=store_open_failed error={err}"
                        );
                        None
                    }
                };
                run_loop(aggregator.as_ref(), &request_rx, &delivery_tx);
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(
                    "event=analytics_worker module=analytics status=error error_code=spawn_failed error={err}"
                );
                None
            }
        };

        Self {
            requests: request_tx,
            deliveries: delivery_rx,
            generation: 0,
            last_range: None,
            handle,
        }
    }

    /// Queues a computation for `range` and returns its generation.
    ///
    /// Any result for an earlier generation becomes stale.
    pub fn request(&mut self, range: TimeRange) -> u64 {
        self.generation += 1;
        self.last_range = Some(range);
        if self
            .requests
            .send(Request::Compute {
                generation: self.generation,
                range,
            })
            .is_err()
        {
            error!("event=analytics_worker module=analytics status=error error_code=worker_gone");
        }
        self.generation
    }

    /// Re-requests the last range after a data change.
    ///
    /// Returns `None` when nothing has been requested yet.
    pub fn notify_changed(&mut self) -> Option<u64> {
        let range = self.last_range?;
        Some(self.request(range))
    }

    /// Generation of the newest request.
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Returns the current snapshot if it has arrived, without blocking.
    pub fn try_latest(&self) -> Option<AnalyticsSnapshot> {
        let mut latest = None;
        for delivery in self.deliveries.try_iter() {
            if let Some(snapshot) = self.accept(delivery) {
                latest = Some(snapshot);
            }
        }
        latest
    }

    /// Blocks up to `timeout` for the current snapshot.
    pub fn wait_latest(&self, timeout: Duration) -> Option<AnalyticsSnapshot> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.deliveries.recv_timeout(remaining) {
                Ok(delivery) => {
                    if let Some(snapshot) = self.accept(delivery) {
                        return Some(snapshot);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    fn accept(&self, delivery: Delivery) -> Option<AnalyticsSnapshot> {
        if delivery.generation == self.generation {
            Some(delivery.snapshot)
        } else {
            debug!(
                "event=analytics_delivery module=analytics status=stale generation={} current={}",
                delivery.generation, self.generation
            );
            None
        }
    }
}

impl Drop for AnalyticsWorker {
    fn drop(&mut self) {
        let _ = self.requests.send(Request::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("event=analytics_worker module=analytics status=error error_code=worker_panicked");
            }
        }
    }
}

fn run_loop<S: RecordStore>(
    aggregator: Option<&AnalyticsAggregator<S>>,
    requests: &Receiver<Request>,
    deliveries: &Sender<Delivery>,
) {
    info!("event=analytics_worker module=analytics status=start");
    while let Ok(request) = requests.recv() {
        let mut next = request;
        // Coalesce: only the newest queued request is worth computing.
        for queued in requests.try_iter() {
            if matches!(next, Request::Shutdown) {
                break;
            }
            next = queued;
        }

        let (generation, range) = match next {
            Request::Compute { generation, range } => (generation, range),
            Request::Shutdown => break,
        };

        let snapshot = match aggregator {
            Some(aggregator) => aggregator.compute(range),
            None => AnalyticsSnapshot::empty(range),
        };
        if deliveries.send(Delivery { generation, snapshot }).is_err() {
            break;
        }
    }
    info!("event=analytics_worker module=analytics status=stop");
}
