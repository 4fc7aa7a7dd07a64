//! unisock push relay library.
//! This crate exposes internal modules for integration testing.
//! The binary entry point is in main.rs.

pub mod config;
pub mod connection;
pub mod gateway;
pub mod registry;
pub mod routes;
pub mod session;
pub mod state;
pub mod ws;
