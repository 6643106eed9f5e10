//! # Customer Data Model
//!
//! The single entity managed by customerdb, plus the payload types the
//! store accepts for creation and partial replacement.

mod customer;
mod id;
mod lenient;

pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use id::{CustomerId, InvalidCustomerId};
