#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod costs;
pub mod engine;
pub mod equipment;
pub mod export;
pub mod field;
pub mod fmt;
pub mod prelude;
pub mod quantity;
pub mod ranking;
pub mod session;
pub mod tables;
pub mod usage;
