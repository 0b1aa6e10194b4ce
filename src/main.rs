mod app;

use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> color_eyre::Result<()> {
    std::panic::set_hook(Box::new(panic_hook));
    init_tracing()?;

    let mut app = app::App::default();
    if let Err(e) = app.run().await {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing() -> color_eyre::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("progressbar_ui=warn".parse()?),
        )
        .init();
    Ok(())
}

fn panic_hook(info: &std::panic::PanicHookInfo) {
    eprintln!("{}: {}", "Panic".red().bold(), info);
    std::process::exit(1);
}
