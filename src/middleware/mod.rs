//! Request extractors and middleware for authentication and role checks.
//!
//! - [`auth`]: [`auth::AuthUser`], the bearer-token extractor every protected
//!   handler takes.
//! - [`role`]: [`role::require_admin`] for whole routers and
//!   [`role::RequireAdmin`] for individual admin-only handlers.
//!
//! ```ignore
//! let router = Router::new()
//!     .route("/", get(list_students))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

pub mod auth;
pub mod role;
