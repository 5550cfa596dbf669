use clap::Parser;
use imu::{AnyImu, Capabilities, Imu, ImuConfig, ImuKind, RegisterBus};
use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Polls one IMU and prints its readings.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML config file. Takes precedence over --kind and --bus.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Adapter to open when no config file is given.
    #[arg(short, long, default_value = "fake")]
    kind: ImuKind,

    /// I2C character device.
    #[arg(short, long, default_value = imu::config::DEFAULT_I2C_BUS)]
    bus: String,

    /// Polling rate in Hz.
    #[arg(short, long, default_value_t = 50.0)]
    rate: f64,

    /// Number of readings to take, 0 for no limit.
    #[arg(short = 'n', long, default_value_t = 0)]
    count: u64,
}

/// Time between readings at `rate` Hz.
fn poll_period(rate: f64) -> Result<Duration, String> {
    if rate.is_nan() || rate <= 0.0 {
        return Err(format!("rate must be positive, got {}", rate));
    }
    Duration::try_from_secs_f64(1.0 / rate).map_err(|e| format!("unusable rate {}: {}", rate, e))
}

fn poll<B: RegisterBus>(mut imu: AnyImu<B>, args: &Args) -> Result<(), Box<dyn Error>> {
    imu.start_sensor()?;
    info!("{} running, capabilities {:?}", imu.kind(), imu.capabilities());

    let composite = imu.capabilities().contains(Capabilities::COMPOSITE);
    let period = poll_period(args.rate)?;
    let mut taken = 0u64;

    while args.count == 0 || taken < args.count {
        let tick = Instant::now();

        if composite {
            match imu.get_data() {
                Ok(msg) => println!("{}", msg),
                Err(e) => warn!("Failed to read IMU: {}", e),
            }
        } else {
            match (imu.read_accelerometer(), imu.read_gyroscope()) {
                (Ok(accel), Ok(gyro)) => println!("accel: {}  gyro: {}", accel, gyro),
                (Err(e), _) | (_, Err(e)) => warn!("Failed to read IMU: {}", e),
            }
        }
        taken += 1;

        if let Some(remaining) = period.checked_sub(tick.elapsed()) {
            thread::sleep(remaining);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    poll_period(args.rate)?;

    let config = match &args.config {
        Some(path) => ImuConfig::load(path)?,
        None => {
            let mut config = ImuConfig::new(args.kind);
            config.i2c_bus = args.bus.clone();
            config
        }
    };
    info!("Opening {} on {}", config.kind, config.i2c_bus);

    #[cfg(target_os = "linux")]
    let opened = imu::open_linux(&config);
    #[cfg(not(target_os = "linux"))]
    let opened = imu::open(&config, |_| {
        Err::<imu::RegisterMap, _>("I2C is only available on Linux")
    });

    let imu = opened.map_err(|e| {
        error!("Failed to open IMU: {}", e);
        e
    })?;
    poll(imu, &args)
}
