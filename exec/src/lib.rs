//! Process plumbing shared by the rcshim shims.
//!
//! The shims never interpret what a forwarded tool prints. They build an
//! [`Invocation`], hand it to a [`Runner`] and look at most at the exit
//! status. Tests swap in a [`RecordingRunner`]; `RCSHIM_DRY_RUN` swaps in
//! a [`DryRunner`].

pub mod error;
pub mod invocation;
pub mod logging;
pub mod runner;

pub use error::{Error, Result};
pub use invocation::Invocation;
pub use runner::{
    select_runner, DryRunner, ExitStatus, FailureTally, RecordingRunner, Runner, SystemRunner,
};
