//! Committed vs staged state
//!
//! Dialogs in the dashboard never edit authoritative state directly. They
//! take a [`Staged`] snapshot, mutate it in isolation, and either apply it
//! to the committed value in one assignment or discard it.
//!
//! ```text
//!   committed ──begin──▶ Staged { baseline, working }
//!                              │ stage() edits working
//!              ┌───────────────┴───────────────┐
//!           apply(): committed = working    discard(): baseline back
//! ```
//!
//! [`StateCell`] abstracts where a piece of controller state lives: inside
//! the controller ([`OwnedCell`]) or in a store owned by an ancestor
//! ([`SharedCell`]).

mod cell;
mod staged;

pub use cell::{OwnedCell, SharedCell, StateCell, cell_or_owned};
pub use staged::Staged;
