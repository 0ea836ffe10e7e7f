#[macro_use]
extern crate pest_derive;

pub mod access;
pub mod cli;
pub mod error;
pub mod object;
pub mod parser;
pub mod session;
