//! SDK data documents
//!
//! Typed views of the JSON documents an SDK ships per service:
//! - `resources-1.json`: resource definitions ([`ResourceModelDocument`])
//! - `service-2.json`: operations and shapes ([`ServiceModel`])
//! - `waiters-2.json`: waiter configurations ([`WaiterModel`])
//!
//! Object keys keep their declaration order.

mod resource_document;
mod service_model;
mod waiter_model;

pub use resource_document::*;
pub use service_model::*;
pub use waiter_model::*;
