//! # Storage Module
//!
//! Data persistence for the consent form application. A single SQLite
//! database holds the `submissions` table; the rest of the backend only
//! talks to [`DbConnection`].

pub mod db;

pub use db::DbConnection;
