//! Render panels over observable collections.
//!
//! # Responsibility
//! - Turn collection snapshots into text cards for display.
//! - React to change notifications with a full clear-and-re-render.
//!
//! # Invariants
//! - Panels observe through the manager's subscribe interface only; they
//!   never hold a mutable reference into the model.

pub mod food_panel;
