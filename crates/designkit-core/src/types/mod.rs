//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Arc<Mutex<T>>` and callbacks.
//! - [`id`]: The [`ObjectId`] identity newtype for scene objects.

pub mod aliases;
pub mod id;

pub use aliases::*;
pub use id::ObjectId;
