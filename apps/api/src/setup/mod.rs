// Setup: collects the merchant context that personalises every generated reply.
// Validation lives in collector.rs; persistence behind the ConfigStore trait in store.rs.

pub mod collector;
pub mod handlers;
pub mod models;
pub mod store;
