//! Upstream version retrieval for monitored projects
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Checker   │────▶│  Registry   │────▶│   Backend   │
//! │  (record)   │     │ (tag→impl)  │     │  (pagure)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │    Store    │                         │ HttpClient  │
//! │  (SQLite)   │                         │  (reqwest)  │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`backend`]: Backend trait implemented once per hosting service
//! - [`backends`]: Concrete backends (Pagure)
//! - [`registry`]: Lookup of backends by the project's backend tag
//! - [`http`]: Conditional GET abstraction and its reqwest implementation
//! - [`ordering`]: Version-aware comparison used to pick the current version
//! - [`store`]: Project persistence over SQLite
//! - [`checker`]: Records new upstream versions of stored projects
//! - [`error`]: Error types for backends, storage and checks

pub mod backend;
pub mod backends;
pub mod checker;
pub mod error;
pub mod http;
pub mod ordering;
pub mod registry;
pub mod store;
