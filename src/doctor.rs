//! Host requirement checks
//!
//! `doctor` looks for the external tools a sandbox workflow needs and
//! prints how to install the missing ones. It never fails the process.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::Printer;

/// An external tool and how to get it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub binary: &'static str,
    pub purpose: &'static str,
    pub guidance: &'static str,
}

/// Tools checked by `doctor`
pub const REQUIREMENTS: &[Requirement] = &[
    Requirement {
        binary: "docker",
        purpose: "runs the sandbox containers",
        guidance: "Install Docker from https://docs.docker.com/get-docker/ and make sure the daemon is running.",
    },
    Requirement {
        binary: "code",
        purpose: "opens sandboxes with --open-vscode",
        guidance: "Install VS Code and run 'Shell Command: Install 'code' command in PATH' from the command palette.",
    },
];

/// Result of checking one requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub requirement: Requirement,
    /// Where the binary was found, `None` when missing
    pub path: Option<PathBuf>,
}

impl ToolCheck {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Look up every requirement on PATH
pub fn check_requirements(requirements: &[Requirement]) -> Vec<ToolCheck> {
    requirements
        .iter()
        .map(|requirement| ToolCheck {
            requirement: *requirement,
            path: which::which(requirement.binary).ok(),
        })
        .collect()
}

/// Check the default requirements and print a report
pub fn run_doctor(printer: &mut Printer) -> Result<Vec<ToolCheck>> {
    let checks = check_requirements(REQUIREMENTS);
    report(printer, &checks)?;
    Ok(checks)
}

pub fn report(printer: &mut Printer, checks: &[ToolCheck]) -> Result<()> {
    printer.header("Checking system requirements")?;

    for check in checks {
        let req = &check.requirement;
        match &check.path {
            Some(path) => printer.success(&format!(
                "[ok] {} found at {} ({})",
                req.binary,
                path.display(),
                req.purpose
            ))?,
            None => {
                printer.alert(&format!("[missing] {} ({})", req.binary, req.purpose))?;
                printer.line(&format!("    {}", req.guidance))?;
            }
        }
    }

    let missing = checks.iter().filter(|c| !c.found()).count();
    if missing == 0 {
        printer.success("\nAll requirements are installed.")?;
    } else {
        printer.alert(&format!("\n{} requirement(s) missing.", missing))?;
    }
    Ok(())
}
