//! Request handlers

pub mod bills;
pub mod compare;
pub mod health;
