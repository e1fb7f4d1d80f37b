//! # Core Application Logic
//!
//! The chat controller. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • reply texts          │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all controller state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`reply`]: Fixed user-facing texts and backend result mapping
//! - [`config`]: Config file loading and override resolution

pub mod action;
pub mod config;
pub mod reply;
pub mod state;
