//! Sift pipeline runtime: drives events through the configured filter chain.
//!
//! `Pipeline::process` is the synchronous path. `spawn` wraps it in a tokio
//! loop fed by a bounded channel for hosts that stream events in.

#![forbid(unsafe_code)]

use metrics::{counter, histogram};
use serde_json::Value;
use sift_core::{Event, FieldAccess};
use sift_filter::Filter;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Field stamped on ingest when the source record carries no timestamp.
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// An ordered filter chain. Holds no mutable state across events; one
/// instance can process distinct events from multiple workers concurrently.
pub struct Pipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl Pipeline {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run one event through every stage in order. Stages never fail; the
    /// event that comes in is the event that goes out.
    pub fn process(&self, event: &mut Event) {
        let started = std::time::Instant::now();
        ensure_timestamp(event);
        for f in &self.filters {
            f.apply(event);
        }
        counter!("pipeline_events", 1u64);
        histogram!("pipeline_process_ms", started.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Stamp `@timestamp` when missing so every record leaving the pipeline is
/// time-addressable. Records that already carry one keep it.
fn ensure_timestamp(event: &mut Event) {
    if event.get_field(TIMESTAMP_FIELD).is_none() {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        event.set_field(TIMESTAMP_FIELD, Value::String(now));
    }
}

/// Spawn the pipeline loop: events pushed into the returned sender come out
/// of the returned receiver processed, in order. The loop drains and stops
/// when the sender side is dropped.
pub fn spawn(cap: usize, pipeline: Pipeline) -> (mpsc::Sender<Event>, mpsc::Receiver<Event>) {
    let (in_tx, mut in_rx) = mpsc::channel::<Event>(cap);
    let (out_tx, out_rx) = mpsc::channel::<Event>(cap);

    tokio::spawn(async move {
        while let Some(mut event) = in_rx.recv().await {
            pipeline.process(&mut event);
            if out_tx.send(event).await.is_err() {
                debug!("output side closed; dropping remaining events");
                break;
            }
        }
        info!("pipeline loop stopped");
    });

    (in_tx, out_rx)
}
