//! SHELF application library
//!
//! Two independent CRUD services, books and recipes, each backed by its own
//! SQLite file and served by the SHELF kernel.

pub mod app;
pub mod modules;

pub use modules::SERVICES;
