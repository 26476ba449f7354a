//! Backend implementations for hosting services

pub mod pagure;

pub use pagure::PagureBackend;
