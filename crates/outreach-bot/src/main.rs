use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use outreach_channels::{
    stubs::{CommunitySitesChannel, FacebookChannel},
    ChannelSet,
};
use outreach_core::BotConfig;
use outreach_email::EmailChannel;
use outreach_scheduler::{CampaignEngine, CycleReport};

#[derive(Parser)]
#[command(
    name = "outreach",
    about = "Respectful scheduled outreach to senior communities"
)]
struct Args {
    /// Path to the JSON config file (falls back to $OUTREACH_CONFIG, then ./config.json).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "outreach_bot=info,outreach_core=info,outreach_channels=info,\
                 outreach_email=info,outreach_scheduler=info"
                    .into()
            }),
        )
        .init();

    let args = Args::parse();

    // config path: --config flag > OUTREACH_CONFIG env > ./config.json
    let config_path = args
        .config
        .or_else(|| std::env::var("OUTREACH_CONFIG").ok());
    let config = BotConfig::load(config_path.as_deref())?;
    config.validate()?;

    print_banner(&config);

    let mut channels = ChannelSet::new();
    channels.register(Box::new(FacebookChannel::new(
        config.platforms.facebook.enabled,
    )));
    channels.register(Box::new(EmailChannel::new(&config)));
    channels.register(Box::new(CommunitySitesChannel::new(
        config.platforms.community_sites.enabled,
    )));

    let mut engine = CampaignEngine::new(Arc::new(config), channels);

    match read_choice()?.as_str() {
        "1" => {
            let report = engine.run_cycle().await;
            print_report(&report);
        }
        "2" => {
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, stopping the posting loop");
                    let _ = shutdown_tx.send(true);
                }
            });
            engine.run(shutdown_rx).await;
        }
        _ => println!("Goodbye!"),
    }

    Ok(())
}

fn print_banner(config: &BotConfig) {
    println!("🤖 Senior Outreach Bot");
    println!("This bot is designed to respectfully reach senior communities");
    println!("{}", "=".repeat(50));
    println!("Business: {}", config.business_name);
    println!("Message: {}", config.target_message);
    println!(
        "Posting every: {} hours",
        config.posting_schedule.frequency_hours
    );
    println!("{}", "=".repeat(50));
}

fn read_choice() -> anyhow::Result<String> {
    print!(
        "Choose an option:\n\
         1. Run one advertising cycle\n\
         2. Start scheduled posting\n\
         3. Exit\n\
         Enter choice (1-3): "
    );
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_report(report: &CycleReport) {
    match report {
        CycleReport::Skipped => {
            println!("Not an optimal outreach time right now; nothing was sent.");
        }
        CycleReport::Completed(outcomes) => {
            if outcomes.is_empty() {
                println!("No channels are enabled in the config.");
            }
            for outcome in outcomes {
                match &outcome.result {
                    Ok(result) => println!(
                        "{}: {}/{} delivered",
                        outcome.channel, result.succeeded, result.attempted
                    ),
                    Err(e) => println!("{}: failed ({e})", outcome.channel),
                }
            }
        }
    }
}
