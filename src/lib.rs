pub mod alphabet;
pub mod api;
pub mod cipher;
pub mod config;
pub mod error;
pub mod key;
pub mod optimizer;
pub mod scorer;
// cmd and reports are modules of the binary crate (main).
