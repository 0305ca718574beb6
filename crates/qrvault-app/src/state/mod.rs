//! # Application State Machines
//!
//! One state type per workflow, instead of a single god-object:
//!
//! | State             | Workflow                                     |
//! |-------------------|----------------------------------------------|
//! | `GeneratorState`  | type selection → form → QR display + actions |
//! | `ScannerState`    | permission, frame pipeline, history writes   |
//! | `HistoryState`    | history screen (live list, delete, clear)    |
//! | `FavoritesState`  | favorites screen (live list, unstar, notes)  |
//!
//! The UI shell owns each one behind its own lock, so screens only touch
//! the state they need.

pub mod favorites;
pub mod generator;
pub mod history;
pub mod scanner;

pub use favorites::FavoritesState;
pub use generator::{FormData, GeneratorScreen, GeneratorState};
pub use history::{HistoryEntry, HistoryState};
pub use scanner::{Permission, ScannerState};
