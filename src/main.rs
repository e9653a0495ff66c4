use acer_thermal::cli::{Cli, Command, FanBoostAction, ProfileAction};
use acer_thermal::config::Config;
use acer_thermal::detect::HardwareInfo;
use acer_thermal::device::{ProfileProvider, ThermalDevice};
use acer_thermal::error::ErrorKind;
use acer_thermal::profile::AbstractProfile;
use acer_thermal::sysfs::SysfsRoot;
use acer_thermal::thermal::SystemTemperatures;
use acer_thermal::wmi::acpi_call::AcpiCallTransport;
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// 1 for I/O and firmware failures, 2 for rejected input, 3 when the
/// interface or value is unsupported, 4 for undecodable responses.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<acer_thermal::error::Error>().map(|e| e.kind()) {
        Some(ErrorKind::InvalidInput) => 2,
        Some(ErrorKind::NotSupported) => 3,
        Some(ErrorKind::Decode) => 4,
        Some(ErrorKind::Io) | None => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = acer_thermal::config::load(cli.config.as_ref());

    match cli.command {
        Command::Profile { action } => cmd_profile(action, &config, cli.json)?,
        Command::FanBoost { action } => cmd_fan_boost(action, &config, cli.json)?,
        Command::Status => cmd_status(&config, cli.json)?,
        Command::Auto { profile } => cmd_auto(profile, config)?,
        Command::Completions { shell } => acer_thermal::cli::print_completions(shell),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "acer_thermal=debug"
    } else {
        "acer_thermal=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

fn require_root(operation: &str) -> Result<()> {
    if !is_root() {
        anyhow::bail!("Must run as root: sudo acer-thermal {}", operation);
    }
    Ok(())
}

fn open_device(config: &Config, operation: &str) -> Result<ThermalDevice<AcpiCallTransport>> {
    require_root(operation)?;
    let sysfs = SysfsRoot::system();
    Ok(ThermalDevice::open(&sysfs, &config.firmware)?)
}

fn cmd_profile(action: ProfileAction, config: &Config, json: bool) -> Result<()> {
    match action {
        ProfileAction::Get => {
            let device = open_device(config, "profile get")?;
            acer_thermal::output::print_profile(device.get()?, json);
        }
        ProfileAction::Set { profile } => {
            let device = open_device(config, "profile set")?;
            device.set(profile)?;
            tracing::info!(%profile, "profile set");
        }
        ProfileAction::List => {
            let device = open_device(config, "profile list")?;
            let current = device.get()?;
            acer_thermal::output::print_choices(&device.probe(), Some(current), json);
        }
    }
    Ok(())
}

fn cmd_fan_boost(action: FanBoostAction, config: &Config, json: bool) -> Result<()> {
    match action {
        FanBoostAction::Get => {
            let device = open_device(config, "fan-boost get")?;
            acer_thermal::output::print_fan_boost(device.fan_boost()?, json);
        }
        FanBoostAction::Set { value } => {
            // Reject bad input before touching the firmware or asking for root.
            let value = acer_thermal::fan_boost::parse_attribute(&value)?;
            let device = open_device(config, "fan-boost set")?;
            device.set_fan_boost(value)?;
            tracing::info!(value, "fan boost set");
        }
    }
    Ok(())
}

fn cmd_status(config: &Config, json: bool) -> Result<()> {
    let sysfs = SysfsRoot::system();
    let hw = HardwareInfo::detect(&sysfs, &config.firmware.acpi_call_path);

    // Hardware detection works unprivileged; only the firmware section needs root.
    let firmware = if hw.supported() && is_root() {
        let device = ThermalDevice::open(&sysfs, &config.firmware)?;
        Some(acer_thermal::status::read_firmware(&device))
    } else {
        None
    };

    let report = acer_thermal::status::report(hw, firmware);
    if json {
        acer_thermal::output::print_status_json(&report);
    } else {
        acer_thermal::output::print_status(&report);
    }
    Ok(())
}

fn cmd_auto(profile: Option<AbstractProfile>, config: Config) -> Result<()> {
    let device = open_device(&config, "auto")?;
    let mut auto = config.auto;
    if let Some(profile) = profile {
        auto.desired_profile = profile;
    }
    let source = SystemTemperatures::new(SysfsRoot::system(), auto.gpu_temperature);
    acer_thermal::auto::run(&device, &source, auto)?;
    Ok(())
}
