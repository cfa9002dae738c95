//! Mathematical helper functions.

pub mod special;

pub use special::{erf, erfc};
