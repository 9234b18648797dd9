use std::fs;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::commands::provision::prompt_yes_no;
use crate::commands::{admin, user};
use crate::context::AdminContext;
use crate::output::{report, report_err};

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);
const SERVER_POLL_ATTEMPTS: usize = 10;
const SERVER_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum E2eError {
    #[error("api server is already running at {0}")]
    AlreadyRunning(String),

    #[error("user declined to delete existing directory {}", .0.display())]
    Declined(PathBuf),

    #[error("preparing {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("e2e_server_command is empty")]
    NoServerCommand,

    #[error("running {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Whether anything accepts a TCP connection at `addr` (`host:port`).
pub fn server_listening(addr: &str) -> bool {
    let Ok(mut addrs) = addr.to_socket_addrs() else {
        return false;
    };
    addrs.any(|sock| TcpStream::connect_timeout(&sock, CONNECT_TIMEOUT).is_ok())
}

/// The run starts its own server, so one already listening is an error.
pub fn ensure_server_offline(addr: &str) -> Result<(), E2eError> {
    if server_listening(addr) {
        return Err(E2eError::AlreadyRunning(addr.to_string()));
    }
    Ok(())
}

/// Poll `addr` until it accepts a connection. Returns false once the
/// attempts run out.
pub fn wait_for_server(addr: &str, attempts: usize, interval: Duration) -> bool {
    for attempt in 1..=attempts {
        if server_listening(addr) {
            tracing::debug!(attempt, "server is up");
            return true;
        }
        thread::sleep(interval);
    }
    false
}

/// Create `dir` fresh. An existing directory is deleted only if `confirm`
/// agrees.
pub fn prepare_directory<F>(dir: &Path, confirm: F) -> Result<(), E2eError>
where
    F: FnOnce(&Path) -> bool,
{
    let wrap = |source| E2eError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    if dir.exists() {
        if !confirm(dir) {
            return Err(E2eError::Declined(dir.to_path_buf()));
        }
        fs::remove_dir_all(dir).map_err(wrap)?;
        tracing::info!(dir = %dir.display(), "deleted existing e2e directory");
    }
    fs::create_dir(dir).map_err(wrap)
}

/// Directory `git clone` creates for `url`: the last path segment without
/// a `.git` suffix.
pub fn repo_dir_name(url: &str) -> &str {
    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last)
}

fn run_to_completion(cmd: &mut Command) -> Result<(), E2eError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let status = cmd.status().map_err(|source| E2eError::Spawn {
        program: program.clone(),
        source,
    })?;
    if !status.success() {
        return Err(E2eError::Failed { program, status });
    }
    Ok(())
}

fn run(ctx: &AdminContext) -> Result<(), E2eError> {
    let config = &ctx.config;
    let addr = config.e2e_server_addr.as_str();
    ensure_server_offline(addr)?;

    let dir = PathBuf::from(&config.e2e_dir);
    prepare_directory(&dir, |d| {
        prompt_yes_no(&format!(
            "Directory {} already exists. Do you want to delete it? (y/n): ",
            d.display()
        ))
    })?;
    report(&format!("new directory created: {}", dir.display()));

    run_to_completion(
        Command::new("git")
            .args(["clone", "-q", config.e2e_repo_url.as_str()])
            .current_dir(&dir),
    )?;

    let (program, args) = config
        .e2e_server_command
        .split_first()
        .ok_or(E2eError::NoServerCommand)?;
    let mut server = Command::new(program)
        .args(args)
        .current_dir(dir.join(repo_dir_name(&config.e2e_repo_url)))
        .spawn()
        .map_err(|source| E2eError::Spawn {
            program: program.clone(),
            source,
        })?;
    tracing::info!(pid = server.id(), "started api server");
    report(&format!("api server subprocess has pid {}", server.id()));

    if !wait_for_server(addr, SERVER_POLL_ATTEMPTS, SERVER_POLL_INTERVAL) {
        report_err(&format!("{addr} still not accepting connections, testing anyway"));
    }

    user::signup(ctx);
    if !admin::request_shutdown(ctx) {
        // Nothing else will stop it.
        if let Err(e) = server.kill() {
            tracing::warn!("killing api server: {e}");
        }
    }

    let status = server.wait().map_err(|source| E2eError::Spawn {
        program: program.clone(),
        source,
    })?;
    tracing::info!(%status, "api server exited");
    Ok(())
}

pub fn run_e2e_local(ctx: &AdminContext) {
    match run(ctx) {
        Ok(()) => report("e2e run finished"),
        Err(e) => report_err(&format!("running e2e locally: {e}")),
    }
}
