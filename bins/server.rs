use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env first so RUST_LOG and LOG_FORMAT apply
    dotenv().ok();
    let format = std::env::var("LOG_FORMAT").ok();
    common::utils::logging::init_logging_from(format.as_deref());
    info!(service = "memkv", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "memkv",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "memkv", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "memkv", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "memkv",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        addr = %cfg.server.bind_addr(),
        "memkv starting"
    );

    // Returns after the shutdown signal once in-flight requests are done
    match rt.block_on(server::run_with_config(cfg)) {
        Ok(()) => {
            info!(service = "memkv", event = "stop", %service_id, pid, "memkv stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "memkv", event = "run_failed", error = %e, "memkv exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
