//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled                       |
//! |-----------|----------------------------------------|
//! | `run`     | `Run`                                  |
//! | `project` | `List`, `Validate`, `Status`, `Reset`  |

pub mod project;
pub mod run;

pub use project::{cmd_list, cmd_reset, cmd_status, cmd_validate};
pub use run::cmd_run;
