//! Users backend library modules.
//!
//! Hexagonal layout: `domain` holds the model, validation and the user
//! service; `inbound::http` adapts Actix requests onto the domain ports;
//! `outbound::persistence` implements the repository ports with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
