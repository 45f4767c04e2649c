//! Use cases.

pub mod events;
pub mod hooks;
pub mod sync;
pub mod upserts;
