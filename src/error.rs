use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum VbxError {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("could not find VBoxManage at {}", path.display())]
    #[diagnostic(help("set `vboxmanage` in vbx.toml to the executable's location"))]
    ExecutableNotFound { path: PathBuf },

    #[error("failed to execute VBoxManage")]
    Execution {
        #[source]
        source: std::io::Error,
    },

    #[error("VBoxManage {command} failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("VM {name} does not exist")]
    VmNotFound { name: String },

    #[error("VM {name} is already running")]
    VmAlreadyRunning { name: String },

    #[error("VM {name} is not running")]
    VmNotRunning { name: String },

    #[error("malformed VM list output: {message}")]
    #[diagnostic(help("VBoxManage's output format may have changed; re-run with --verbose"))]
    ParseVmList { message: String },

    #[error("failed to stop {failed} of {total} VMs")]
    StopAllFailed { failed: usize, total: usize },
}

impl VbxError {
    /// Process exit code for this error: `CommandFailed` propagates the
    /// external tool's code, everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            VbxError::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
