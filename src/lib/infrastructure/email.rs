//! Email provider adapters

pub mod sendgrid;
