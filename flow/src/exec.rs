//! External process invocation and build directory scoping.

use simple_error::bail;
use std::env::{current_dir, set_current_dir};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs::create_dir_all;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Non-zero exit status from an invoked external tool. The tool's own
/// output is left in the build directory for inspection, not parsed.
#[derive(Debug)]
pub struct ToolError {
    pub tool: String,
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "non-zero {} status", self.tool)
    }
}

impl Error for ToolError {}

/// Seam for external process invocation. `argv[0]` is the program; no
/// element is subject to shell interpretation.
pub trait Runner {
    fn run(&mut self, tool: &str, argv: &[String]) -> Result<(), Box<dyn Error>>;
}

/// Runs tools as real subprocesses in the current directory, blocking
/// until they exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, tool: &str, argv: &[String]) -> Result<(), Box<dyn Error>> {
        let Some((prog, args)) = argv.split_first() else {
            bail!("empty argv for {}", tool);
        };
        let mut cmd = Command::new(prog);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        let status = cmd.status()?;
        if !status.success() {
            return Err(Box::new(ToolError {
                tool: tool.to_string(),
            }));
        }
        Ok(())
    }
}

/// Scoped build directory: created if absent and entered on
/// construction; the previous working directory is restored when the
/// guard drops, on success and failure alike.
pub struct BuildDir {
    prev: PathBuf,
}

impl BuildDir {
    pub fn enter(dir: &Path) -> io::Result<Self> {
        create_dir_all(dir)?;
        let prev = current_dir()?;
        set_current_dir(dir)?;
        Ok(BuildDir { prev })
    }
}

impl Drop for BuildDir {
    fn drop(&mut self) {
        // Nothing much to do if it fails.
        let _ = set_current_dir(&self.prev);
    }
}
