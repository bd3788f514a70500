//! Type aliases for commonly used complex types.
//!
//! Gives names to the shared-ownership and callback shapes used across the
//! DesignKit crates, so the remote bridge and the editor session agree on
//! one spelling.

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-task sharing.
///
/// Never hold the guard across an `.await`.
///
/// # Example
/// ```rust,ignore
/// let editor: ThreadSafe<Editor> = thread_safe(editor);
/// editor.lock().bring_forward();
/// ```
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A simple callback with no parameters or return value.
pub type Callback = Box<dyn Fn() + Send + Sync>;

/// A callback that receives a single parameter.
pub type DataCallback<T> = Box<dyn Fn(T) + Send + Sync>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
