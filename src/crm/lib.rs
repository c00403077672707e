//! # crm Architecture
//!
//! crm is a small customer-record manager. Like most tools of this kind it is
//! a library with a command-line client on top, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, prints                        │
//! │  - Implements the View trait for the terminal               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Controller (controller.rs)                            │
//! │  - Editing / pending-delete / filter / theme state          │
//! │  - One command per user action, then a full re-render       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult with messages          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record Store (records.rs) + line codec (codec.rs)          │
//! │  - Ordered in-memory customers mirrored to one text blob    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `controller.rs` inward nothing writes to stdout or stderr and nothing
//! exits the process. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## Module Overview
//!
//! - [`controller`]: The view controller and the [`controller::View`] trait
//! - [`commands`]: Business logic for each user action
//! - [`records`]: The record store
//! - [`codec`]: The pipe-delimited line format
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`model`]: Core data types (`Customer`, `CustomerFields`, `Theme`)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod codec;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod init;
pub mod model;
pub mod records;
pub mod store;
