//! Preview server process supervision
//!
//! - [`liveness`]: signal-zero probe telling running, gone, and foreign pids apart
//! - [`Supervisor`]: owns at most one preview server child and its lifecycle

mod error;
mod launcher;
mod liveness;
mod supervisor;

pub use error::{is_already_exited, ProcessError};
pub use launcher::{
    preview_url, CommandLauncher, HugoLauncher, ServerLauncher, DEFAULT_SERVER_BINARY,
    DEFAULT_SERVER_PORT,
};
pub use liveness::{is_alive, is_pid_alive};
pub use supervisor::{ProcessHandle, ServerState, StateObserver, Supervisor, SupervisorPhase};
