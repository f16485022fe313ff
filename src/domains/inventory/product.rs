use serde::{Deserialize, Serialize};
use std::fmt;

pub type ProductId = i64;

/// Physical storage location. Unique across the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RackSlot {
    pub zone: String,
    pub rack: String,
    pub row_loc: i64,
    pub col_loc: i64,
}

impl RackSlot {
    pub fn new(zone: impl Into<String>, rack: impl Into<String>, row_loc: i64, col_loc: i64) -> Self {
        Self {
            zone: zone.into(),
            rack: rack.into(),
            row_loc,
            col_loc,
        }
    }
}

impl fmt::Display for RackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({},{})", self.zone, self.rack, self.row_loc, self.col_loc)
    }
}

/// A product about to be placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_name: String,
    pub quantity: i64,
    pub slot: RackSlot,
}

impl NewProduct {
    pub fn new(product_name: impl Into<String>, quantity: i64, slot: RackSlot) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            slot,
        }
    }
}

/// A stored product. Field names are the persisted schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub zone: String,
    pub rack: String,
    pub row_loc: i64,
    pub col_loc: i64,
}

impl InventoryItem {
    pub fn from_new(id: ProductId, product: NewProduct) -> Self {
        Self {
            id,
            product_name: product.product_name,
            quantity: product.quantity,
            zone: product.slot.zone,
            rack: product.slot.rack,
            row_loc: product.slot.row_loc,
            col_loc: product.slot.col_loc,
        }
    }

    pub fn slot(&self) -> RackSlot {
        RackSlot::new(self.zone.clone(), self.rack.clone(), self.row_loc, self.col_loc)
    }
}
