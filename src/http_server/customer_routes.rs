//! Customer HTTP Routes
//!
//! | Method | Path                | Store call      |
//! |--------|---------------------|-----------------|
//! | GET    | `/customer`         | `find_all`      |
//! | POST   | `/customer`         | `insert`        |
//! | PUT    | `/customer`         | `update_by_id`  |
//! | PATCH  | `/customer`         | `update_by_id`  |
//! | GET    | `/customer/:id`     | `find_by_id`    |
//! | DELETE | `/customer/:id`     | `delete_by_id`  |
//!
//! PUT and PATCH take the id inside the body and behave identically: both
//! replace only the fields that are supplied.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::errors::{ApiError, ApiResult};
use super::extract::JsonBody;
use crate::model::{Customer, CustomerId, CustomerPatch, NewCustomer};
use crate::store::SharedStore;

// ==================
// Shared State
// ==================

/// Customer state shared across handlers
pub struct CustomerState {
    pub store: SharedStore,
}

impl CustomerState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

// ==================
// Request Types
// ==================

/// Body of PUT/PATCH: the target id plus the fields to replace
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: CustomerPatch,
}

// ==================
// Customer Routes
// ==================

/// Create customer routes
pub fn customer_routes(state: Arc<CustomerState>) -> Router {
    Router::new()
        .route(
            "/customer",
            get(list_customers_handler)
                .post(create_customer_handler)
                .put(update_customer_handler)
                .patch(update_customer_handler),
        )
        .route(
            "/customer/:id",
            get(get_customer_handler).delete(delete_customer_handler),
        )
        .with_state(state)
}

/// An id that does not parse cannot match any stored customer
fn parse_id(raw: &str) -> ApiResult<CustomerId> {
    raw.parse().map_err(|_| {
        debug!(id = raw, "unparseable customer id");
        ApiError::NotFound
    })
}

// ==================
// Handlers
// ==================

async fn list_customers_handler(
    State(state): State<Arc<CustomerState>>,
) -> ApiResult<Json<Vec<Customer>>> {
    let customers = state
        .store
        .find_all()
        .map_err(ApiError::store("Error fetching customers"))?;

    debug!(count = customers.len(), "listed customers");
    Ok(Json(customers))
}

async fn get_customer_handler(
    State(state): State<Arc<CustomerState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    let id = parse_id(&id)?;
    state
        .store
        .find_by_id(&id)
        .map_err(ApiError::store("Error fetching customer"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_customer_handler(
    State(state): State<Arc<CustomerState>>,
    JsonBody(new): JsonBody<NewCustomer>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let customer = state
        .store
        .insert(new)
        .map_err(ApiError::store("Error creating customer"))?;

    debug!(id = %customer.id, "created customer");
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update_customer_handler(
    State(state): State<Arc<CustomerState>>,
    JsonBody(request): JsonBody<UpdateCustomerRequest>,
) -> ApiResult<Json<Customer>> {
    let id = parse_id(request.id.as_deref().ok_or(ApiError::NotFound)?)?;
    let customer = state
        .store
        .update_by_id(&id, request.fields)
        .map_err(ApiError::store("Error updating customer"))?
        .ok_or(ApiError::NotFound)?;

    debug!(id = %customer.id, "updated customer");
    Ok(Json(customer))
}

async fn delete_customer_handler(
    State(state): State<Arc<CustomerState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    let id = parse_id(&id)?;
    let customer = state
        .store
        .delete_by_id(&id)
        .map_err(ApiError::store("Error deleting customer"))?
        .ok_or(ApiError::NotFound)?;

    debug!(id = %customer.id, "deleted customer");
    Ok(Json(customer))
}
