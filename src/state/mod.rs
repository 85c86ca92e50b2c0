//! Screen state machine

pub mod reducer;

pub use reducer::{Action, FetchReason, InFlight, ListState, LoadStatus, RequestId, reduce};
