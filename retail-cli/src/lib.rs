//! Retail management CLI
//!
//! CRUD over products, customers, orders, and payments against an embedded
//! store, plus simple aggregate reporting.
//!
//! # Module structure
//!
//! ```text
//! retail-cli/src/
//! ├── core/       # configuration, service wiring
//! ├── utils/      # errors, logging
//! ├── db/         # store handle, models, repositories
//! ├── services/   # business rules per entity
//! └── cli/        # argument parsing and dispatch
//! ```
//!
//! Control flow is CLI → service → repository → store. Multi-step flows
//! (order placement, cancellation) issue independent sequential store calls;
//! there is no transaction spanning them.

pub mod cli;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use cli::Cli;
pub use core::{AppState, Config};
pub use db::DbService;
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult};
