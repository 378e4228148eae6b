#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillResult {
    Success(u32, &'static str),
    Failed(u32, String),
}

impl KillResult {
    pub fn status_message(&self) -> String {
        match self {
            KillResult::Success(pid, signal) => format!("Sent {signal} to PID {pid}"),
            KillResult::Failed(pid, reason) => format!("Failed to kill PID {pid}: {reason}"),
        }
    }
}

/// Requests termination of a process.
pub trait Terminator {
    fn terminate(&mut self, pid: u32) -> KillResult;
}

impl<T: Terminator + ?Sized> Terminator for Box<T> {
    fn terminate(&mut self, pid: u32) -> KillResult {
        (**self).terminate(pid)
    }
}

/// Sends SIGTERM (or the platform's closest equivalent).
#[derive(Debug, Default)]
pub struct SignalTerminator;

impl Terminator for SignalTerminator {
    fn terminate(&mut self, pid: u32) -> KillResult {
        let result = send_term(pid);
        if let KillResult::Failed(_, reason) = &result {
            tracing::warn!(pid, %reason, "termination request failed");
        } else {
            tracing::info!(pid, "sent termination request");
        }
        result
    }
}

#[cfg(unix)]
fn send_term(pid: u32) -> KillResult {
    // pid 0 and negative pids address process groups, never a single process
    let raw = match libc::pid_t::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        _ => return KillResult::Failed(pid, "invalid PID".to_string()),
    };
    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(raw, libc::SIGTERM) };
    if rc == 0 {
        KillResult::Success(pid, "SIGTERM")
    } else {
        KillResult::Failed(pid, std::io::Error::last_os_error().to_string())
    }
}

#[cfg(not(unix))]
fn send_term(pid: u32) -> KillResult {
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

    let sysinfo_pid = Pid::from_u32(pid);
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[sysinfo_pid]),
        true,
        ProcessRefreshKind::nothing(),
    );
    let Some(process) = sys.process(sysinfo_pid) else {
        return KillResult::Failed(pid, "no such process".to_string());
    };
    match process.kill_with(Signal::Term) {
        Some(true) => KillResult::Success(pid, "SIGTERM"),
        Some(false) => KillResult::Failed(pid, "permission denied?".to_string()),
        // Signal not supported on this platform, fall back to kill()
        None if process.kill() => KillResult::Success(pid, "SIGTERM"),
        None => KillResult::Failed(pid, "permission denied?".to_string()),
    }
}
