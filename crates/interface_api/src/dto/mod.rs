//! Response bodies
//!
//! Field names are camelCase on the wire. Non-finite numbers serialize as
//! `null`.

pub mod bills;
pub mod compare;
