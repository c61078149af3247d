use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{info, error, warn};
use std::sync::Arc;
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use services::create_host_bridge;

#[derive(Parser, Debug)]
#[command(name = "opendock")]
#[command(about = "Фронтенд панели задач: закреплённые приложения, открытые окна, фокус")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "opendock.toml")]
    config: String,

    /// Режим сухого запуска (эмуляция хоста вместо stdin/stdout)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск OpenDock v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - хост эмулируется");
    }

    let bridge = create_host_bridge(config.clone(), args.dry_run)?;
    let mut bridge_handle = tokio::spawn(async move { bridge.run().await });

    info!("Мост с хостом запущен");

    // Ожидание сигнала завершения или окончания работы моста
    tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
            }
            bridge_handle.abort();
        }
        joined = &mut bridge_handle => {
            match joined {
                Ok(Ok(())) => info!("Мост с хостом завершил работу"),
                Ok(Err(e)) => error!("Ошибка в мосте с хостом: {}", e),
                Err(e) => {
                    let err = crate::dock_error!(bridge, "задача моста аварийно завершилась: {}", e);
                    error!("{}", err);
                    return Err(err.into());
                }
            }
        }
    }

    info!("OpenDock завершил работу");
    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // stdout занят протоколом моста, логи идут в stderr
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "pretty" => registry.with(fmt_layer.pretty()).init(),
        _ => registry.with(fmt_layer.compact()).init(),
    }

    Ok(())
}
