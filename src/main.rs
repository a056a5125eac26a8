use anyhow::Context;

use passport_guide::cli;
use passport_guide::config::GuideConfig;
use passport_guide::guide::GuideSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = GuideConfig::from_env().context("reading GUIDE_* configuration")?;

    eprintln!("🛂 Passport Guide v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Steps: {}", config.stepper_variant);
    eprintln!("   Fees: {}", config.fee_variant);
    if config.persist {
        eprintln!("   State: {}", config.db_path.display());
    } else {
        eprintln!("   State: not saved");
    }
    eprintln!("   Type 'help' for commands, 'quit' to exit.\n");

    let mut guide = GuideSession::from_config(&config)
        .await
        .context("starting guide session")?;

    println!("{}", cli::render_steps(&guide));
    cli::run(&mut guide).await;

    Ok(())
}
