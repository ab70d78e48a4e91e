use std::process::ExitCode;

/// Grace period after a shutdown signal before force-exiting (seconds).
const SHUTDOWN_GRACE_SECS: u64 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // The REPL polls `is_shutdown_requested()` between lines; blocked stdin
    // reads are cut short by the forced exit below.
    tokio::spawn(async {
        shutdown_signal().await;
        ceh_coach::request_shutdown();
        eprintln!("\nReceived shutdown signal, exiting...");

        tokio::time::sleep(std::time::Duration::from_secs(SHUTDOWN_GRACE_SECS)).await;
        std::process::exit(130);
    });

    match ceh_coach::cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(ceh_coach::errors::get_exit_code(&e))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(_) => {
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
