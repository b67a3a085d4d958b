use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{start_server, LogBook};

pub fn run() -> Result<(), Box<dyn Error>> {
    let config = ConfigService::load()?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .try_init();

    let logs = Arc::new(LogBook::new(config.max_log_entries));

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(&config, logs.clone())?;
        logs.add(
            "INFO",
            "System",
            &format!(
                "Sweeper HTTP server started on {}:{}",
                config.host, config.port
            ),
        );
        server.await
    })?;

    Ok(())
}
