//! Linkvault: a personal bookmark manager client.
//!
//! Bookmarks and categories are kept in a local state container that
//! reconciles every change with a remote REST API, falling back to local
//! state when the API is unavailable.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
