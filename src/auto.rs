use crate::config::AutoConfig;
use crate::device::ProfileProvider;
use crate::error::{Error, Result};
use crate::profile::AbstractProfile;
use crate::thermal::{TemperatureSource, Temperatures};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub const LOCK_FILE: &str = "/run/acer-thermal/auto.lock";

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn request_stop(_: nix::libc::c_int) {
    STOP_REQUESTED.store(true, Ordering::Relaxed);
}

/// Route SIGINT and SIGTERM to [`STOP_REQUESTED`] so the loop ends and the
/// lock guard is dropped.
fn install_stop_handler() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(request_stop),
        SaFlags::empty(),
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: the handler only stores to an atomic.
        unsafe { sigaction(signal, &action) }
            .map_err(|e| Error::Signal(format!("failed to install {} handler: {}", signal, e)))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A threshold was crossed; switch to the boost profile.
    Boost,
    /// Both sensors fell under hysteresis; switch back.
    Restore,
}

/// Temperature-driven profile switching with hysteresis.
#[derive(Debug)]
pub struct AutoTurbo {
    config: AutoConfig,
    boosted: bool,
}

impl AutoTurbo {
    pub fn new(config: AutoConfig) -> Self {
        Self {
            config,
            boosted: false,
        }
    }

    pub fn boosted(&self) -> bool {
        self.boosted
    }

    /// Missing readings never trigger a boost and never hold one.
    pub fn next_transition(&self, temps: Temperatures) -> Option<Transition> {
        let at_or_above = |t: Option<i32>, limit: i32| t.is_some_and(|t| t >= limit);
        let below = |t: Option<i32>, limit: i32| t.is_none_or(|t| t < limit);

        let hot = at_or_above(temps.cpu, self.config.cpu_threshold)
            || at_or_above(temps.gpu, self.config.gpu_threshold);
        let cool = below(temps.cpu, self.config.cpu_hysteresis)
            && below(temps.gpu, self.config.gpu_hysteresis);

        if hot && !self.boosted {
            Some(Transition::Boost)
        } else if !hot && cool && self.boosted {
            Some(Transition::Restore)
        } else {
            None
        }
    }

    /// Evaluate one sample and apply the resulting switch, if any. State only
    /// changes once the firmware accepted the new profile.
    pub fn tick(
        &mut self,
        provider: &dyn ProfileProvider,
        temps: Temperatures,
    ) -> Result<Option<Transition>> {
        let Some(transition) = self.next_transition(temps) else {
            return Ok(None);
        };

        let target = match transition {
            Transition::Boost => self.config.boost_profile,
            Transition::Restore => self.config.desired_profile,
        };
        match transition {
            Transition::Boost => tracing::info!(
                cpu = ?temps.cpu,
                gpu = ?temps.gpu,
                profile = %target,
                "temperature high, boosting"
            ),
            Transition::Restore => tracing::info!(
                cpu = ?temps.cpu,
                gpu = ?temps.gpu,
                profile = %target,
                "temperature ok, restoring"
            ),
        }

        provider.set(target)?;
        self.boosted = transition == Transition::Boost;
        Ok(Some(transition))
    }

    /// Sample, switch, sleep. Runs until `stop` is set, a firmware error, or
    /// for `max_ticks` iterations when given.
    pub fn run_loop(
        &mut self,
        provider: &dyn ProfileProvider,
        source: &dyn TemperatureSource,
        stop: &AtomicBool,
        max_ticks: Option<usize>,
    ) -> Result<()> {
        let interval = Duration::from_secs(self.config.interval_secs);
        let mut ticks = 0usize;
        loop {
            if stop.load(Ordering::Relaxed) {
                tracing::info!("stop requested");
                return Ok(());
            }
            let temps = source.sample();
            tracing::trace!(cpu = ?temps.cpu, gpu = ?temps.gpu, "sample");
            self.tick(provider, temps)?;

            ticks += 1;
            if max_ticks.is_some_and(|max| ticks >= max) {
                return Ok(());
            }
            std::thread::sleep(interval);
        }
    }
}

/// Lock guard that removes the lock file on drop.
pub struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Take the daemon lock. Returns None if another daemon holds it. Only a
/// lock naming a dead PID is reclaimed; an empty or unreadable one belongs
/// to a daemon that has not written its PID yet.
pub fn acquire_lock(path: &Path) -> Result<Option<LockGuard>> {
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        fs::create_dir_all(dir)
            .map_err(|e| Error::Lock(format!("failed to create {}: {}", dir.display(), e)))?;
    }

    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => {
            use std::io::Write;
            let _ = write!(&file, "{}", std::process::id());
            Ok(Some(LockGuard {
                path: path.to_path_buf(),
            }))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            if let Ok(contents) = fs::read_to_string(path)
                && let Ok(pid) = contents.trim().parse::<u32>()
                && !Path::new(&format!("/proc/{}", pid)).exists()
            {
                tracing::warn!(path = %path.display(), pid, "removing stale lock");
                fs::remove_file(path).map_err(|e| {
                    Error::Lock(format!("failed to remove {}: {}", path.display(), e))
                })?;
                return acquire_lock(path);
            }
            Ok(None)
        }
        Err(e) => Err(Error::Lock(format!(
            "failed to create {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Run the daemon until the firmware rejects a switch.
pub fn run(
    provider: &dyn ProfileProvider,
    source: &dyn TemperatureSource,
    config: AutoConfig,
) -> Result<()> {
    let _lock = acquire_lock(Path::new(LOCK_FILE))?
        .ok_or_else(|| Error::Lock("another auto-turbo daemon is running".to_string()))?;
    install_stop_handler()?;

    tracing::info!(
        cpu_threshold = config.cpu_threshold,
        gpu_threshold = config.gpu_threshold,
        desired = %config.desired_profile,
        "auto-turbo started"
    );

    AutoTurbo::new(config).run_loop(provider, source, &STOP_REQUESTED, None)
}
