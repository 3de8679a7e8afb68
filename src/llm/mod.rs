pub mod client;
pub mod summary;

pub use client::*;
pub use summary::*;
