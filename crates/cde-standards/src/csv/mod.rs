#![deny(unsafe_code)]

pub mod cde;
pub mod list;
