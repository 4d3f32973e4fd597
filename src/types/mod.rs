// Linkvault shared type definitions
// Entities, API wire types, configuration and error enums.

pub mod api;
pub mod bookmark;
pub mod category;
pub mod errors;
pub mod settings;
