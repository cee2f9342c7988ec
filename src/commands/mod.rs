//! Command implementations
//!
//! Each command returns a serde-serializable result struct so the CLI can
//! print it either human-readable or as JSON; the `print_*` companions
//! handle the console form.

mod init;
mod pipeline;
mod status;

pub use init::{cmd_init, InitOptions};
pub use pipeline::{
    cmd_classify, cmd_normalize, cmd_rollup, cmd_run, print_classify_stats,
    print_normalize_stats, print_rollup_stats, print_run_stats, RunStats,
};
pub use status::{cmd_status, print_status, StatusInfo, TableCount};
