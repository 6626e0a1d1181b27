// Library root
// -----------
// This crate exposes a small library surface for the book catalog CLI. The
// binary (`main.rs`) wires these modules together into the interactive menu.
//
// Module responsibilities:
// - `catalog`: The book record and the pure collection operations (add,
//   remove, find, update, list, progress). No I/O.
// - `store`: Reads and writes the JSON storage file.
// - `session`: The context object each menu action receives. Owns the
//   catalog and its store and persists after every mutation.
// - `ui`: Terminal prompts and the menu loop. Delegates to `session`.
// - `logging`: File logging bootstrap.
//
// Keeping the operations free of prompts makes them testable without a
// terminal, and lets the UI be replaced without touching the data logic.
pub mod catalog;
pub mod logging;
pub mod session;
pub mod store;
pub mod ui;
