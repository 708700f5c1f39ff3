//! hostpulse binary: CLI, logging and wiring for the exporter.

use clap::{Args, Parser, Subcommand};
use hostpulse::{
    metrics::exposition, start_web_server, MetricRegistry, Sampler, SamplerConfig, WebConfig,
    DEFAULT_INTERVAL_MS, DEFAULT_WEB_PORT,
};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "hostpulse")]
#[command(about = "hostpulse - host CPU metrics exporter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Samples host CPU utilization and serves it in the Prometheus text exposition format")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Sampling interval in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval: u64,

    /// Metric name prefix ("node" produces node_cpu_usage_percent)
    #[arg(long, default_value = "")]
    prefix: String,

    /// Disable per-core CPU series
    #[arg(long)]
    no_per_core: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the exporter (default)
    Serve(ServeArgs),

    /// Take a single sample, print the exposition document and exit
    Render,

    /// Show host information
    Info(InfoArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => {
            serve_command(&cli, args).await?;
        }
        Some(Commands::Render) => {
            render_command(&cli).await?;
        }
        Some(Commands::Info(args)) => {
            info_command(args)?;
        }
        None => {
            // Default to serve command
            serve_command(&cli, &ServeArgs { no_cors: false }).await?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn print_banner() {
    println!("hostpulse - host CPU metrics exporter");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn sampler_config(cli: &Cli) -> SamplerConfig {
    SamplerConfig::default()
        .with_interval_ms(cli.interval)
        .with_metric_prefix(&cli.prefix)
        .with_per_core(!cli.no_per_core)
}

async fn serve_command(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    let min_interval = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL.as_millis() as u64;
    if cli.interval < min_interval {
        anyhow::bail!(
            "sampling interval must be at least {}ms for meaningful CPU deltas",
            min_interval
        );
    }

    print_banner();
    info!("Starting hostpulse exporter...");

    let registry = Arc::new(MetricRegistry::new());
    let sampler = Sampler::new(sampler_config(cli), registry.clone());
    tokio::spawn(sampler.run());
    info!("Started sampling with {}ms interval", cli.interval);

    let web_config = WebConfig::new(&cli.host, cli.port).with_cors(!args.no_cors);

    info!("Web server configuration:");
    info!("  - Bind address: {}:{}", cli.host, cli.port);
    info!("  - CORS enabled: {}", !args.no_cors);
    info!("  - Sampling interval: {}ms", cli.interval);
    info!(
        "  - Per-core CPU series: {}",
        if cli.no_per_core { "disabled" } else { "enabled" }
    );

    start_web_server(web_config, registry).await?;

    Ok(())
}

async fn render_command(cli: &Cli) -> anyhow::Result<()> {
    let registry = Arc::new(MetricRegistry::new());
    let mut sampler = Sampler::new(sampler_config(cli), registry.clone());

    // The first cycle seeds sysinfo's CPU accounting; the second one
    // produces real deltas.
    sampler.sample_once().await;
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    sampler.sample_once().await;

    print!("{}", exposition::render(&registry.snapshot()));

    Ok(())
}

fn info_command(args: &InfoArgs) -> anyhow::Result<()> {
    use sysinfo::System;

    let mut system = System::new_all();
    system.refresh_all();

    let hostname = System::host_name().unwrap_or_else(|| "unknown".to_string());
    let os_name = System::name().unwrap_or_else(|| "unknown".to_string());
    let os_version = System::os_version().unwrap_or_else(|| "unknown".to_string());
    let kernel_version = System::kernel_version().unwrap_or_else(|| "unknown".to_string());
    let uptime_seconds = System::uptime();
    let cpu_model = system
        .cpus()
        .first()
        .map(|cpu| cpu.brand().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let cpu_cores = system.cpus().len();
    let memory_total_bytes = system.total_memory();

    match args.format.as_str() {
        "json" => {
            let info = serde_json::json!({
                "hostname": hostname,
                "os_name": os_name,
                "os_version": os_version,
                "kernel_version": kernel_version,
                "uptime_seconds": uptime_seconds,
                "cpu_model": cpu_model,
                "cpu_cores": cpu_cores,
                "memory_total_bytes": memory_total_bytes,
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        "pretty" => {
            print_banner();
            println!("Host:");
            println!("  Hostname: {}", hostname);
            println!("  OS: {} {}", os_name, os_version);
            println!("  Kernel: {}", kernel_version);
            println!("  Uptime: {} seconds", uptime_seconds);
            println!();
            println!("Hardware:");
            println!("  CPU: {} ({} cores)", cpu_model, cpu_cores);
            println!(
                "  Memory: {:.1} GB total",
                memory_total_bytes as f64 / 1024.0 / 1024.0 / 1024.0
            );
        }
        _ => {
            error!("Unsupported format: {}. Use 'json' or 'pretty'", args.format);
            std::process::exit(1);
        }
    }

    Ok(())
}
