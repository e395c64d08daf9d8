//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `model.rs`: request/response DTOs
//! - `service.rs`: business logic over the [`UserStore`](bims_auth::UserStore)
//! - `controller.rs`: HTTP handlers
//! - `router.rs`: Axum router configuration

pub mod auth;
pub mod dashboard;
pub mod users;
