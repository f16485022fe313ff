// Request bodies as the boundary receives them: every field optional,
// coordinates as raw signed pairs. Validation happens in WarehouseService.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start: Option<Vec<i64>>,
    pub goal: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub pickup: Option<Vec<i64>>,
    pub delivery: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub path: Option<Vec<Vec<i64>>>,
    pub order_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddProductRequest {
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
    pub zone: Option<String>,
    pub rack: Option<String>,
    pub row_loc: Option<i64>,
    pub col_loc: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i64>,
}
