//! The dcimcli client library.
//!
//! This crate provides the core functionality for the dcimcli client: a small
//! integration client against a DCIM monitoring/asset-management REST API. It
//! authenticates with an OAuth2 client-credentials grant, retrieves asset and
//! sensor data, and renders the results as console tables, JSON, or CSV files.
//!
//! # Modules
//!
//! - `api`: Asset, business entity, and sensor API operations
//! - `auth`: OAuth2 client-credentials token exchange
//! - `commands`: CLI command parsing
//! - `configuration`: Credential and instance configuration
//! - `export`: Timestamped CSV file sink
//! - `format`: Output formatting (table, CSV, JSON)
//! - `http`: Authenticated HTTP request handling
//! - `input`: Asset ID input file parsing
//! - `model`: Wire and record types for assets and sensors

pub mod api;
pub mod auth;
pub mod commands;
pub mod configuration;
pub mod export;
pub mod format;
pub mod http;
pub mod input;
pub mod model;
