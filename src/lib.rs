pub mod auth;
pub mod cli;
pub mod config;
pub mod gmail;
pub mod reconcile;
pub mod resolve;
pub mod sync;
