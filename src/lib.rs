//! # Taxdesk API
//!
//! A REST API built with Rust and Axum that serves a catalog of tax types
//! behind token-based authentication and role-based route gating.
//!
//! ## Request pipeline
//!
//! ```text
//! logging → CORS → authentication gate → authorization policy → handler
//!                        │                        │
//!                        └──── 401 {"error": …} ──┘
//! ```
//!
//! - The **authentication gate** ([`middleware::auth`]) looks for
//!   `Authorization: Bearer <token>`. Without one the request continues
//!   anonymously. A token that fails verification ends the request with 401.
//!   A valid token attaches a [`Principal`](taxdesk_auth::Principal) to the
//!   request extensions.
//! - The **authorization policy** ([`middleware::policy`]) matches the method
//!   and path against an ordered rule table and either lets the request
//!   through or answers 401.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli.rs            # Command-line arguments (serve, create-admin)
//! ├── middleware/       # Gate, policy, unauthorized responder, extractors
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Login (credential check + token issuance)
//! │   ├── users/        # Registration and user listing
//! │   └── tax_types/    # Tax type catalog and tax calculation
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing subscriber and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Router assembly
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module has a `model.rs`, `repository.rs` (where it owns
//! storage), `service.rs`, `controller.rs`, and `router.rs`.
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET_KEY=change-me          # required; the server will not start without it
//! SERVER_ADDR=0.0.0.0:3000
//! DATABASE_URL=postgres://...       # optional; in-memory storage when unset
//! METRICS_ADDR=0.0.0.0:9100         # optional Prometheus listener
//! ALLOWED_ORIGINS=http://localhost:5173
//! OBSERVABILITY_ENABLED=true        # `false` or `0` turns off HTTP and auth metrics
//! RUST_LOG=taxdesk=debug            # or LOG_LEVEL=debug for this crate only
//! ```

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use taxdesk_auth;
pub use taxdesk_config;
pub use taxdesk_core;
pub use taxdesk_db;
