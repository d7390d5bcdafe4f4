//! REST backends for a live platform.
//!
//! - [`RestClient`] - blocking JSON client with basic auth and default headers
//! - [`RestCatalog`] - SDC front end and onboarding APIs
//! - [`RestInventory`] - AAI
//! - [`RestOrchestrator`] - SO

pub mod catalog;
pub mod http;
pub mod inventory;
pub mod orchestrator;

pub use catalog::RestCatalog;
pub use http::RestClient;
pub use inventory::RestInventory;
pub use orchestrator::RestOrchestrator;
