pub use client::*;
pub use error::*;
pub use types::*;

mod client;
mod error;
mod types;
