//! PID file store: stateless operations over a filesystem path.
//!
//! # Error policy
//! - `create`, `terminate`, `read_pid` and `acquire` propagate classified errors
//! - `exists`, `remove` and `is_running` never fail; they fold errors into a bool
//!
//! # Races
//! Only exclusive create (`create(path, false)`) is atomic. `exists`
//! (stat then read) and `terminate` (read then signal) are best-effort against
//! concurrent modification of the same path by another process.

mod acquire;
mod io;
mod signal;
mod verify;

pub use acquire::acquire;
pub use io::{create, create_with_hooks, read_pid, remove};
pub use signal::terminate;
pub use verify::{exists, is_running};
