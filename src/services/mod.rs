// Linkvault services
// Collaborators of the reconciliation engine: remote API client, auth tokens, settings, URL helpers.

pub mod api_service;
pub mod auth;
pub mod link_utils;
pub mod settings_engine;
