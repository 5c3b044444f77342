//! Email handlers

pub mod send;
