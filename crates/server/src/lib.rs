//! Minimart server library.
//!
//! This crate provides the server functionality as a library,
//! allowing it to be tested and reused (the CLI borrows the pool
//! helper and the embedded migrator).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
