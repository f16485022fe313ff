use crate::common::DomainEvent;
use crate::domains::grid::Cell;
use crate::domains::orders::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgvEvent {
    TraversalStarted {
        agv_id: String,
        traversal_id: Uuid,
        from: Cell,
        to: Cell,
        steps: usize,
        order_id: Option<OrderId>,
        timestamp: DateTime<Utc>,
    },
    PositionUpdated {
        agv_id: String,
        traversal_id: Uuid,
        position: Cell,
        timestamp: DateTime<Utc>,
    },
    OrderAssigned {
        agv_id: String,
        traversal_id: Uuid,
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },
    TraversalFinished {
        agv_id: String,
        traversal_id: Uuid,
        position: Cell,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for AgvEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AgvEvent::TraversalStarted { .. } => "TraversalStarted",
            AgvEvent::PositionUpdated { .. } => "PositionUpdated",
            AgvEvent::OrderAssigned { .. } => "OrderAssigned",
            AgvEvent::TraversalFinished { .. } => "TraversalFinished",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            AgvEvent::TraversalStarted { agv_id, .. } => agv_id,
            AgvEvent::PositionUpdated { agv_id, .. } => agv_id,
            AgvEvent::OrderAssigned { agv_id, .. } => agv_id,
            AgvEvent::TraversalFinished { agv_id, .. } => agv_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AgvEvent::TraversalStarted { timestamp, .. } => *timestamp,
            AgvEvent::PositionUpdated { timestamp, .. } => *timestamp,
            AgvEvent::OrderAssigned { timestamp, .. } => *timestamp,
            AgvEvent::TraversalFinished { timestamp, .. } => *timestamp,
        }
    }
}
