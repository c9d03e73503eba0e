use crate::{Error, Result};
use std::process::{Command, Stdio};

/// Starts the browser for a synthesized argument vector
pub trait ProcessLauncher {
    fn launch(&self, argv: &[String]) -> Result<()>;
}

/// Fire-and-forget launch
///
/// The child starts a new session with null stdio and is not waited on, so
/// it outlives the launcher and the terminal it was started from. Success means the process was spawned.
pub struct DetachedLauncher;

/// Launch and wait for the browser to exit
///
/// A non-zero exit status is reported as [`Error::ChildFailed`].
pub struct BlockingLauncher;

fn build_command(argv: &[String]) -> Result<(&str, Command)> {
    let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;

    let mut command = Command::new(program);
    command.args(args);
    Ok((program.as_str(), command))
}

impl ProcessLauncher for DetachedLauncher {
    fn launch(&self, argv: &[String]) -> Result<()> {
        let (program, mut command) = build_command(argv)?;

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // SAFETY: setsid is async-signal-safe and touches no parent state
            unsafe {
                command.pre_exec(|| {
                    if libc::setsid() == -1 {
                        return Err(std::io::Error::last_os_error());
                    }
                    Ok(())
                });
            }
        }

        let child = command.spawn().map_err(|source| Error::Spawn {
            executable: program.to_string(),
            source,
        })?;

        tracing::debug!("Started `{}` detached with pid {}", program, child.id());
        Ok(())
    }
}

impl ProcessLauncher for BlockingLauncher {
    fn launch(&self, argv: &[String]) -> Result<()> {
        let (program, mut command) = build_command(argv)?;

        let status = command.status().map_err(|source| Error::Spawn {
            executable: program.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(Error::ChildFailed {
                executable: program.to_string(),
                status,
            });
        }

        tracing::debug!("`{}` exited cleanly", program);
        Ok(())
    }
}
