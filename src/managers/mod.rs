// Linkvault state managers
// The reconciliation engine, its state container, the fallback policy and the visibility filter.

pub mod bookmark_manager;
pub mod filter;
pub mod reconcile;
pub mod state;
