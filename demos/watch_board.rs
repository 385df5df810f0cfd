use std::sync::Arc;

use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use warnament_board::render::leaderboard::LeaderboardFilter;
use warnament_board::{
    BoardConfig, Leaderboard, Poller, PublicEvents, SheetsClient, Sink, Synchronizer, Target,
    TracingNotifier,
};

/// Prints every container update instead of patching a page.
struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&self, target: Target, markup: &str) {
        println!("--- #{target} ---\n{markup}");
    }
}

#[tokio::main]
async fn main() -> warnament_board::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BoardConfig::from_env()?;
    let store = Arc::new(SheetsClient::from_config(&config));
    let sink = Arc::new(StdoutSink);
    let notifier = Arc::new(TracingNotifier);

    let events = Arc::new(Synchronizer::new(
        PublicEvents::new(store.clone()),
        sink.clone(),
        notifier.clone(),
        config.language,
    ));
    let leaderboard = Arc::new(Synchronizer::new(
        Leaderboard::new(store.clone()),
        sink,
        notifier,
        config.language,
    ));

    let handle = Poller::new(events, config.poll_interval).start();
    leaderboard.select_filter(LeaderboardFilter::AllTime).await?;

    sleep(config.poll_interval * 6).await;
    handle.cancel();
    Ok(())
}
