//! cheat-finder - terminal client for the cheat-finder analysis server
//!
//! Walks through four screens: connect to a server, pick an analysis tool,
//! create or load a database, then browse and export the resulting snippets.

pub mod action;
pub mod app;
pub mod cli;
pub mod component;
pub mod components;
pub mod config;
pub mod model;
pub mod services;
pub mod tui;
