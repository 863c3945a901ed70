//! IRC protocol layer: line parsing, numeric classification, command building,
//! and the server connection.

pub mod commands;
pub mod connection;
pub mod message;
pub mod numeric;
