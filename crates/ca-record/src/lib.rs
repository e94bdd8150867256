//! `ca-record`: capture a session for later analysis.
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`record`]   | `SessionRecord`, `ResetRecord`, `InterventionRecord`        |
//! | [`recorder`] | `SessionRecorder`: a `DriverObserver` that fills a record   |
//!
//! Records are plain `serde` data.  Where they go (a file, a database, an
//! upload) is up to the caller.

pub mod record;
pub mod recorder;


pub use record::{InterventionRecord, ResetRecord, SessionRecord};
pub use recorder::SessionRecorder;
