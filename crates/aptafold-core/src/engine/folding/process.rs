use super::backend::FoldingBackend;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::FoldConfig;
use crate::engine::error::FoldError;
use std::ffi::OsString;
use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Folds sequences by launching RNAfold as a child process.
///
/// The executable is spawned directly, without an intermediate shell, and the sequence
/// is written to its standard input followed by a newline. Sequence text therefore never
/// appears on a command line and cannot be interpreted as shell syntax, whatever it
/// contains. Every invocation is bounded by the configured timeout and is killed as soon
/// as the cancellation token is set.
#[derive(Debug, Clone)]
pub struct RnaFoldProcess {
    config: FoldConfig,
}

impl RnaFoldProcess {
    pub fn new(config: FoldConfig) -> Self {
        Self { config }
    }

    /// Command-line arguments passed to every invocation.
    pub fn arguments(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("--noPS")];
        if let Some(t) = self.config.temperature {
            args.push(OsString::from(format!("--temp={}", t)));
        }
        if let Some(path) = &self.config.parameter_file {
            let mut arg = OsString::from("--paramFile=");
            arg.push(path.as_os_str());
            args.push(arg);
        }
        args.extend(self.config.extra_args.iter().map(OsString::from));
        args
    }

    fn spawn(&self) -> Result<Child, FoldError> {
        let mut command = Command::new(&self.config.executable);
        command
            .args(self.arguments())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Own process group: a terminal Ctrl-C reaches us, not the child.
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut command, 0);
        command
            .spawn()
            .map_err(|source| FoldError::Spawn {
                executable: self.config.executable.display().to_string(),
                source,
            })
    }
}

impl FoldingBackend for RnaFoldProcess {
    fn execute(&self, sequence: &str, cancel: &CancellationToken) -> Result<String, FoldError> {
        if sequence.is_empty() {
            return Err(FoldError::EmptySequence);
        }
        if cancel.is_cancelled() {
            return Err(FoldError::Cancelled);
        }

        let mut child = self.spawn()?;
        trace!(pid = child.id(), "Spawned folding process.");

        let input = format!("{}\n", sequence);
        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> io::Result<()> {
            match stdin {
                Some(mut pipe) => pipe.write_all(input.as_bytes()),
                None => Ok(()),
            }
        });
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = wait_with_deadline(&mut child, self.config.timeout, cancel)?;

        match join(writer)? {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("Folding process closed its input early.");
            }
            Err(e) => return Err(FoldError::Io(e)),
            Ok(()) => {}
        }
        let stdout = join(stdout)??;
        let stderr = join(stderr)??;

        if !status.success() {
            return Err(FoldError::NonZeroExit {
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(stdout)
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = source {
            pipe.read_to_end(&mut buffer)?;
        }
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    })
}

fn join<T>(handle: JoinHandle<T>) -> Result<T, FoldError> {
    handle
        .join()
        .map_err(|_| FoldError::Io(io::Error::other("pipe worker thread panicked")))
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<ExitStatus, FoldError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if cancel.is_cancelled() {
            terminate(child);
            return Err(FoldError::Cancelled);
        }
        if Instant::now() >= deadline {
            terminate(child);
            return Err(FoldError::Timeout { timeout });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn terminate(child: &mut Child) {
    #[cfg(unix)]
    kill_process_group(child);
    if let Err(e) = child.kill() {
        debug!(error = %e, "Failed to kill folding process; it may have already exited.");
    }
    if let Err(e) = child.wait() {
        debug!(error = %e, "Failed to reap folding process.");
    }
}

/// Kills every process in the child's group, so helpers a wrapper script started die
/// with it. The group id equals the child's pid because of `process_group(0)` at spawn.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: killpg only sends a signal. The child is not reaped yet, so its pid
    // cannot have been reused for another group.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } != 0 {
        debug!(
            error = %io::Error::last_os_error(),
            "Failed to kill folding process group; it may have already exited."
        );
    }
}
