//! Subprocess wrapper around the VBoxManage executable.
//!
//! Every VM operation goes through [`VboxManage::invoke`]: run the tool with
//! an argument list, capture both streams and the exit status, and hand back
//! stdout on success. Calls are awaited one at a time; there is no overlap,
//! no retry and no timeout.

use std::path::PathBuf;

use crate::error::VbxError;
use crate::vm::{self, VmRecord};

pub struct VboxManage {
    path: PathBuf,
}

impl VboxManage {
    /// Wrap the executable at `path`, verifying up front that it exists so
    /// a bad config fails before any command logic runs.
    pub fn new(path: PathBuf) -> Result<Self, VbxError> {
        if !path.is_file() {
            return Err(VbxError::ExecutableNotFound { path });
        }
        Ok(VboxManage { path })
    }

    /// Run VBoxManage with `args`, returning its stdout.
    pub async fn invoke(&self, args: &[&str]) -> Result<String, VbxError> {
        tracing::debug!(?args, "invoking VBoxManage");

        let output = tokio::process::Command::new(&self.path)
            .args(args)
            .output()
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => VbxError::ExecutableNotFound {
                    path: self.path.clone(),
                },
                _ => VbxError::Execution { source },
            })?;

        if !output.status.success() {
            return Err(VbxError::CommandFailed {
                command: args.first().copied().unwrap_or("").to_string(),
                code: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Bare VM names from brief `list vms` output.
    pub async fn list_vm_names(&self, sorted: bool) -> Result<Vec<String>, VbxError> {
        let output = self.invoke(&list_args(sorted, false)).await?;
        Ok(vm::parse_brief(&output))
    }

    /// Full records from detailed `list vms -l` output.
    pub async fn list_vm_records(&self, sorted: bool) -> Result<Vec<VmRecord>, VbxError> {
        let output = self.invoke(&list_args(sorted, true)).await?;
        vm::parse_detailed(&output)
    }

    /// Raw `showvminfo` text for one VM.
    pub async fn vm_info(&self, name: &str) -> Result<String, VbxError> {
        self.invoke(&["showvminfo", name]).await
    }
}

fn list_args(sorted: bool, detailed: bool) -> Vec<&'static str> {
    let mut args = vec!["list", "vms"];
    if detailed {
        args.push("-l");
    }
    if sorted {
        args.push("-s");
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_brief_unsorted() {
        assert_eq!(list_args(false, false), vec!["list", "vms"]);
    }

    #[test]
    fn list_args_detailed_sorted() {
        assert_eq!(list_args(true, true), vec!["list", "vms", "-l", "-s"]);
    }
}
