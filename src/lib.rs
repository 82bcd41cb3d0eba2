pub mod app;
pub mod common;
pub mod core;
pub mod inventory;
pub mod scan;
pub mod validate;

include!(concat!(env!("OUT_DIR"), "/version.rs"));
