pub mod config;
pub mod error_convert;
pub mod health;
pub mod openapi;
pub mod rest;
pub mod state;
pub mod telemetry;

// Case tracker domain modules
pub mod calendar;
pub mod calendar_sync;
pub mod fixtures;
pub mod query;
pub mod registry;
pub mod service;
pub mod store;
pub mod timeline;
