//! Domain layer: value objects, ports and services

pub mod communication;
