//! RichNotes library
//!
//! This library exposes the core functionality of the notes service for
//! integration testing and embedding.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod http;
pub mod services;
pub mod views;
