//! Daemon domain module

mod session;

pub use session::{DaemonSession, DaemonState, InvalidStateTransition};
