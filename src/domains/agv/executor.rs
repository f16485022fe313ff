use super::aggregate::{Agv, AgvSnapshot};
use super::events::AgvEvent;
use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::logger::DynLogger;
use crate::domains::orders::{OrderId, OrderStatus, OrderStore};
use crate::domains::path_planning::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Simulated travel time per grid step.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(150);

/// Owns the AGV state and runs at most one traversal at a time.
///
/// Cloning yields another handle to the same vehicle. The state lock is only
/// held for short, non-async sections, so snapshots never wait on a step delay.
#[derive(Clone)]
pub struct AgvExecutor {
    agv: Arc<Mutex<Agv>>,
    orders: Arc<dyn OrderStore>,
    logger: DynLogger,
    step_delay: Duration,
    event_sink: Option<mpsc::Sender<AgvEvent>>,
}

/// Handle to a launched traversal. Dropping it does not stop the run.
#[derive(Debug)]
pub struct TraversalHandle {
    traversal_id: Uuid,
    handle: JoinHandle<()>,
}

impl TraversalHandle {
    pub fn id(&self) -> Uuid {
        self.traversal_id
    }

    /// Wait until the traversal, including the order update, has finished.
    pub async fn wait(self) -> DomainResult<()> {
        self.handle
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("traversal task failed: {}", e)))
    }
}

impl AgvExecutor {
    pub fn new(agv: Agv, orders: Arc<dyn OrderStore>, logger: DynLogger) -> Self {
        Self {
            agv: Arc::new(Mutex::new(agv)),
            orders,
            logger,
            step_delay: DEFAULT_STEP_DELAY,
            event_sink: None,
        }
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Forward every recorded AGV event to `sink`. Events are dropped when the
    /// channel is full.
    pub fn with_event_sink(mut self, sink: mpsc::Sender<AgvEvent>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn snapshot(&self) -> AgvSnapshot {
        self.lock().snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().is_moving()
    }

    /// Start traversing `path` in the background and return immediately.
    ///
    /// The first cell is taken as the current position. When `order_id` is
    /// given, that order is marked completed after the vehicle is idle again.
    /// Fails with `AgvBusy` while another traversal is running and with
    /// `EmptyPath` for an empty path.
    pub fn execute(&self, path: Path, order_id: Option<OrderId>) -> DomainResult<TraversalHandle> {
        let traversal_id = self.admit(&path, order_id)?;
        Ok(self.spawn(traversal_id, path, order_id))
    }

    /// Claim the vehicle for `path` without moving it yet.
    ///
    /// The AGV reports `moving` from here on, so competing requests get
    /// `AgvBusy`. Dropping the reservation without launching it puts the
    /// vehicle back to idle.
    pub fn reserve(&self, path: Path) -> DomainResult<TraversalReservation> {
        let traversal_id = self.admit(&path, None)?;
        Ok(TraversalReservation {
            executor: self.clone(),
            traversal_id,
            path: Some(path),
        })
    }

    fn admit(&self, path: &Path, order_id: Option<OrderId>) -> DomainResult<Uuid> {
        let mut agv = self.lock();
        let traversal_id = agv.begin_traversal(path, order_id)?;
        if path.start() != Some(agv.position) {
            self.logger.warn(&format!(
                "Path starts at {:?} but AGV {} is at {}",
                path.start(),
                agv.id,
                agv.position
            ));
        }
        self.publish(&mut agv);
        Ok(traversal_id)
    }

    fn spawn(&self, traversal_id: Uuid, path: Path, order_id: Option<OrderId>) -> TraversalHandle {
        let executor = self.clone();
        let handle = tokio::spawn(async move {
            executor.run(path, order_id).await;
        });
        TraversalHandle {
            traversal_id,
            handle,
        }
    }

    async fn run(self, path: Path, order_id: Option<OrderId>) {
        let guard = IdleGuard { executor: &self };

        for &cell in path.steps() {
            {
                let mut agv = self.lock();
                if let Err(e) = agv.advance_to(cell) {
                    self.logger.error(&format!("Traversal aborted at {}: {}", cell, e));
                    break;
                }
                self.publish(&mut agv);
            }
            tokio::time::sleep(self.step_delay).await;
        }

        drop(guard);

        if let Some(order_id) = order_id {
            match self
                .orders
                .update_order_status(order_id, OrderStatus::Completed)
                .await
            {
                Ok(true) => self.logger.info(&format!("Order {} completed", order_id)),
                Ok(false) => self
                    .logger
                    .warn(&format!("Order {} not found; nothing marked completed", order_id)),
                Err(e) => self
                    .logger
                    .error(&format!("Failed to complete order {}: {}", order_id, e)),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Agv> {
        self.agv.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, agv: &mut Agv) {
        for event in agv.take_uncommitted_events() {
            match &event {
                AgvEvent::TraversalStarted { from, to, steps, .. } => self
                    .logger
                    .info(&format!("AGV {} moving {} -> {} ({} steps)", agv.id, from, to, steps)),
                AgvEvent::PositionUpdated { position, .. } => {
                    tracing::debug!("AGV {} at {}", agv.id, position)
                }
                AgvEvent::OrderAssigned { order_id, .. } => self
                    .logger
                    .info(&format!("AGV {} carrying order {}", agv.id, order_id)),
                AgvEvent::TraversalFinished { position, .. } => self
                    .logger
                    .info(&format!("AGV {} idle at {}", agv.id, position)),
            }
            if let Some(sink) = &self.event_sink {
                if sink.try_send(event).is_err() {
                    tracing::warn!("AGV event sink full or closed; event dropped");
                }
            }
        }
    }
}

/// A claimed but not yet moving traversal, returned by [`AgvExecutor::reserve`].
#[must_use = "dropping a reservation releases the AGV"]
pub struct TraversalReservation {
    executor: AgvExecutor,
    traversal_id: Uuid,
    path: Option<Path>,
}

impl TraversalReservation {
    pub fn id(&self) -> Uuid {
        self.traversal_id
    }

    /// Start driving the reserved path. `order_id` is attached to the
    /// traversal and completed once the vehicle is idle again.
    pub fn launch(mut self, order_id: Option<OrderId>) -> TraversalHandle {
        let path = self.path.take().unwrap_or_default();
        if let Some(order_id) = order_id {
            let mut agv = self.executor.lock();
            if let Err(e) = agv.assign_order(order_id) {
                self.executor
                    .logger
                    .error(&format!("Failed to attach order {}: {}", order_id, e));
            }
            self.executor.publish(&mut agv);
        }
        self.executor.spawn(self.traversal_id, path, order_id)
    }
}

impl Drop for TraversalReservation {
    fn drop(&mut self) {
        if self.path.is_none() {
            return;
        }
        let mut agv = self.executor.lock();
        if let Err(e) = agv.finish_traversal() {
            self.executor
                .logger
                .error(&format!("Failed to release AGV {}: {}", agv.id, e));
        }
        self.executor
            .logger
            .info(&format!("Traversal {} released before launch", self.traversal_id));
        self.executor.publish(&mut agv);
    }
}

/// Puts the vehicle back to idle when the traversal ends, including when the
/// task unwinds.
struct IdleGuard<'a> {
    executor: &'a AgvExecutor,
}

impl Drop for IdleGuard<'_> {
    fn drop(&mut self) {
        let mut agv = self.executor.lock();
        if let Err(e) = agv.finish_traversal() {
            self.executor
                .logger
                .error(&format!("Failed to reset AGV {}: {}", agv.id, e));
        }
        self.executor.publish(&mut agv);
    }
}
