//! The four user-facing commands: start, stop, stop-all, list.
//!
//! Each command is a self-contained sequence of VBoxManage calls. VM-level
//! operations return a typed result; only `main` decides exit codes, which
//! lets `stop_all` keep going past one VM's failure.

use crate::error::VbxError;
use crate::manage::VboxManage;

/// Start a VM, optionally without an attached display window.
pub async fn start(vbox: &VboxManage, name: &str, headless: bool) -> Result<(), VbxError> {
    ensure_exists(vbox, name).await?;

    let info = vbox.vm_info(name).await?;
    if info.contains("running") {
        return Err(VbxError::VmAlreadyRunning {
            name: name.to_string(),
        });
    }

    if headless {
        println!("Starting VM {name} in headless mode...");
        print!("{}", vbox.invoke(&["startvm", name, "--type", "headless"]).await?);
    } else {
        println!("Starting VM {name}...");
        print!("{}", vbox.invoke(&["startvm", name]).await?);
    }

    Ok(())
}

/// Stop a VM: graceful ACPI power button, or immediate power-off with `force`.
pub async fn stop(vbox: &VboxManage, name: &str, force: bool) -> Result<(), VbxError> {
    ensure_exists(vbox, name).await?;

    let info = vbox.vm_info(name).await?;
    if !info.contains("running") {
        return Err(VbxError::VmNotRunning {
            name: name.to_string(),
        });
    }

    power_down(vbox, name, force).await
}

/// Stop every running VM, continuing past individual failures. Returns an
/// error if any VM failed, so the process still exits non-zero.
pub async fn stop_all(vbox: &VboxManage, force: bool) -> Result<(), VbxError> {
    let names = vbox.list_vm_names(false).await?;

    let mut attempted = 0;
    let mut failed = 0;

    for name in &names {
        let running = match vbox.vm_info(name).await {
            Ok(info) => info.contains("running"),
            Err(err) => {
                eprintln!("could not check VM {name}: {err}");
                failed += 1;
                attempted += 1;
                continue;
            }
        };
        if !running {
            continue;
        }

        attempted += 1;
        if let Err(err) = power_down(vbox, name, force).await {
            eprintln!("failed to stop VM {name}: {err}");
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(VbxError::StopAllFailed {
            failed,
            total: attempted,
        });
    }
    Ok(())
}

/// Print the VM list, one line per VM, in the order VBoxManage returned it.
pub async fn list(vbox: &VboxManage, sorted: bool, detailed: bool) -> Result<(), VbxError> {
    if detailed {
        for record in vbox.list_vm_records(sorted).await? {
            println!("{record}");
        }
    } else {
        for name in vbox.list_vm_names(sorted).await? {
            println!("{name}");
        }
    }
    Ok(())
}

async fn ensure_exists(vbox: &VboxManage, name: &str) -> Result<(), VbxError> {
    let names = vbox.list_vm_names(false).await?;
    if !names.iter().any(|n| n == name) {
        return Err(VbxError::VmNotFound {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Issue the actual stop request: `poweroff` under force, `acpipowerbutton`
/// otherwise. Exactly one of the two per call.
async fn power_down(vbox: &VboxManage, name: &str, force: bool) -> Result<(), VbxError> {
    if force {
        println!("Forcing VM {name} to stop...");
        print!("{}", vbox.invoke(&["controlvm", name, "poweroff"]).await?);
    } else {
        println!("Stopping VM {name}...");
        print!("{}", vbox.invoke(&["controlvm", name, "acpipowerbutton"]).await?);
    }
    Ok(())
}
