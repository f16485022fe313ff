use crate::common::DomainError;
use crate::domains::grid::Cell;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type OrderId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(DomainError::InfrastructureError(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

/// A pickup/delivery request. Field names are the persisted schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub pickup_r: usize,
    pub pickup_c: usize,
    pub delivery_r: usize,
    pub delivery_c: usize,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, pickup: Cell, delivery: Cell, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            pickup_r: pickup.row,
            pickup_c: pickup.col,
            delivery_r: delivery.row,
            delivery_c: delivery.col,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    pub fn pickup(&self) -> Cell {
        Cell::new(self.pickup_r, self.pickup_c)
    }

    pub fn delivery(&self) -> Cell {
        Cell::new(self.delivery_r, self.delivery_c)
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}
