use super::events::AgvEvent;
use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::grid::Cell;
use crate::domains::orders::OrderId;
use crate::domains::path_planning::Path;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgvStatus {
    Idle,
    Moving,
}

/// Consistent view of the vehicle for polling: `{r, c, status}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgvSnapshot {
    pub r: usize,
    pub c: usize,
    pub status: AgvStatus,
}

impl AgvSnapshot {
    pub fn position(&self) -> Cell {
        Cell::new(self.r, self.c)
    }
}

/// The single simulated vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agv {
    pub id: String,
    pub position: Cell,
    pub status: AgvStatus,
    pub current_traversal: Option<Uuid>,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<AgvEvent>,
}

impl Agv {
    pub fn new(id: impl Into<String>, start: Cell) -> Self {
        Self {
            id: id.into(),
            position: start,
            status: AgvStatus::Idle,
            current_traversal: None,
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> AgvSnapshot {
        AgvSnapshot {
            r: self.position.row,
            c: self.position.col,
            status: self.status,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.status == AgvStatus::Moving
    }

    /// Claim the vehicle for a traversal of `path`. Fails with `AgvBusy`
    /// while another traversal holds it.
    pub fn begin_traversal(&mut self, path: &Path, order_id: Option<OrderId>) -> DomainResult<Uuid> {
        if self.is_moving() {
            return Err(DomainError::AgvBusy);
        }
        let (from, to) = match (path.start(), path.goal()) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(DomainError::EmptyPath),
        };

        let traversal_id = Uuid::new_v4();
        let event = AgvEvent::TraversalStarted {
            agv_id: self.id.clone(),
            traversal_id,
            from,
            to,
            steps: path.steps().len(),
            order_id,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)?;
        Ok(traversal_id)
    }

    pub fn advance_to(&mut self, cell: Cell) -> DomainResult<()> {
        let traversal_id = self.current_traversal.ok_or_else(|| DomainError::InvalidCommand {
            reason: format!("AGV {} is not traversing", self.id),
        })?;
        let event = AgvEvent::PositionUpdated {
            agv_id: self.id.clone(),
            traversal_id,
            position: cell,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)
    }

    /// Attach an order to the running traversal, for traversals admitted
    /// before their order existed.
    pub fn assign_order(&mut self, order_id: OrderId) -> DomainResult<()> {
        let traversal_id = self.current_traversal.ok_or_else(|| DomainError::InvalidCommand {
            reason: format!("AGV {} has no traversal to carry order {}", self.id, order_id),
        })?;
        let event = AgvEvent::OrderAssigned {
            agv_id: self.id.clone(),
            traversal_id,
            order_id,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)
    }

    /// Return to idle. A no-op when no traversal is active.
    pub fn finish_traversal(&mut self) -> DomainResult<()> {
        let Some(traversal_id) = self.current_traversal else {
            return Ok(());
        };
        let event = AgvEvent::TraversalFinished {
            agv_id: self.id.clone(),
            traversal_id,
            position: self.position,
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)
    }
}

impl AggregateRoot for Agv {
    type Event = AgvEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            AgvEvent::TraversalStarted { traversal_id, .. } => {
                self.status = AgvStatus::Moving;
                self.current_traversal = Some(*traversal_id);
            }
            AgvEvent::PositionUpdated { position, .. } => {
                self.position = *position;
            }
            AgvEvent::OrderAssigned { .. } => {}
            AgvEvent::TraversalFinished { .. } => {
                self.status = AgvStatus::Idle;
                self.current_traversal = None;
            }
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
