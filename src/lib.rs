//! Library crate for pong-front, exposing the game list controller and its HTTP collaborator.

/// Game API abstraction and its HTTP implementation.
pub mod api;
/// Client configuration loading.
pub mod config;
/// List controller reconciling the local list with the API.
pub mod controller;
/// Wire types exchanged with the backend.
pub mod dto;
/// Controller error taxonomy.
pub mod error;
/// Local list storage and change feed.
pub mod state;
