//! Event publication and in-process dispatch
//!
//! Command services hand drained domain events to an [`EventPublisher`]
//! after the aggregate has been saved. [`EventDispatcher`] is the in-process
//! publisher: a handler registry keyed by event type, constructed and passed
//! in explicitly.
//!
//! A failing or panicking handler is logged and counted; it never stops
//! delivery to the remaining handlers.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tracing::{debug, warn};

use roadmap_domain::events::{DomainEvent, RoadmapEvent};

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one domain event
    async fn publish(&self, event: RoadmapEvent);

    /// Publish events in order
    async fn publish_all(&self, events: Vec<RoadmapEvent>) {
        for event in events {
            self.publish(event).await;
        }
    }
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: RoadmapEvent) {}
}

/// In-memory event collector for testing
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<RoadmapEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<RoadmapEvent> {
        self.events.lock().clone()
    }

    /// Event type names in publication order
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.event_type()).collect()
    }

    /// Clear collected events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: RoadmapEvent) {
        self.events.lock().push(event);
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Error returned by an event handler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Subscriber to roadmap events
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Name used in logs and dispatch reports
    fn name(&self) -> &str;

    async fn handle(&self, event: &RoadmapEvent) -> Result<(), HandlerError>;
}

struct FnHandler<F> {
    name: String,
    f: F,
}

#[async_trait]
impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&RoadmapEvent) -> Result<(), HandlerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &RoadmapEvent) -> Result<(), HandlerError> {
        (self.f)(event)
    }
}

/// Wrap a synchronous closure as a handler
pub fn handler_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn EventHandler>
where
    F: Fn(&RoadmapEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(FnHandler {
        name: name.into(),
        f,
    })
}

// ============================================================================
// Dispatcher
// ============================================================================

/// One failed delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub handler: String,
    pub event_type: &'static str,
    pub reason: String,
}

/// Outcome of a dispatch call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: DispatchReport) {
        self.delivered += other.delivered;
        self.failures.extend(other.failures);
    }
}

/// In-process pub/sub registry for roadmap events
#[derive(Default)]
pub struct EventDispatcher {
    by_type: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    wildcard: RwLock<Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event type, e.g. `"ItemStatusChanged"`
    pub fn subscribe(&self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.by_type
            .write()
            .entry(event_type.into())
            .or_default()
            .push(handler);
    }

    /// Register a handler for every event type
    pub fn subscribe_all(&self, handler: Arc<dyn EventHandler>) {
        self.wildcard.write().push(handler);
    }

    /// Handlers that would receive an event of this type
    pub fn handler_count(&self, event_type: &str) -> usize {
        let specific = self.by_type.read().get(event_type).map_or(0, Vec::len);
        specific + self.wildcard.read().len()
    }

    /// Drop every registration
    pub fn reset(&self) {
        self.by_type.write().clear();
        self.wildcard.write().clear();
    }

    /// Deliver one event to its type handlers, then to wildcard handlers
    pub async fn dispatch(&self, event: &RoadmapEvent) -> DispatchReport {
        let event_type = event.event_type();
        let handlers: Vec<Arc<dyn EventHandler>> = {
            let by_type = self.by_type.read();
            let wildcard = self.wildcard.read();
            by_type
                .get(event_type)
                .into_iter()
                .flatten()
                .chain(wildcard.iter())
                .cloned()
                .collect()
        };

        let mut report = DispatchReport::default();
        for handler in handlers {
            let outcome = AssertUnwindSafe(handler.handle(event)).catch_unwind().await;
            let reason = match outcome {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(e)) => e.to_string(),
                Err(panic) => panic_message(panic.as_ref()),
            };
            warn!(
                handler = handler.name(),
                event_type,
                error = %reason,
                "Event handler failed"
            );
            report.failures.push(HandlerFailure {
                handler: handler.name().to_string(),
                event_type,
                reason,
            });
        }

        debug!(event_type, delivered = report.delivered, failed = report.failed(), "Dispatched event");
        report
    }

    /// Deliver events in order
    pub async fn dispatch_all(&self, events: &[RoadmapEvent]) -> DispatchReport {
        let mut report = DispatchReport::default();
        for event in events {
            report.merge(self.dispatch(event).await);
        }
        report
    }
}

#[async_trait]
impl EventPublisher for EventDispatcher {
    async fn publish(&self, event: RoadmapEvent) {
        self.dispatch(&event).await;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
