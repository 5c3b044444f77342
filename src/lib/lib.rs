#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Accepts HTML emails over HTTP, validates them and relays them to a transactional email
//! provider.

pub mod domain;
pub mod infrastructure;
