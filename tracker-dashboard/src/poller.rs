use crate::client::{ApiClient, ClientError};
use chrono::{DateTime, Utc};
use shared_http::api::{PriceResponse, SentimentResponse, WisdomResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn};

/// Everything the dashboard shows, replaced as a whole after each good round.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub price: PriceResponse,
    pub sentiment: SentimentResponse,
    pub wisdom: WisdomResponse,
    pub last_update: DateTime<Utc>,
}

type StateSender = Arc<watch::Sender<Option<DashboardState>>>;

/// Polls the three data endpoints on a fixed timer.
pub struct DashboardPoller {
    client: Arc<ApiClient>,
    interval: Duration,
    state: StateSender,
}

impl DashboardPoller {
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            client: Arc::new(client),
            interval,
            state: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardState>> {
        self.state.subscribe()
    }

    /// Run one round: all three endpoints concurrently, then swap the state.
    /// On any failure the previous state stays in place.
    pub async fn poll_once(&self) -> Result<(), ClientError> {
        poll_round(&self.client, &self.state).await
    }

    /// Start the timer. The first round fires immediately; the loop stops
    /// when the returned handle is shut down or dropped.
    pub fn start(self) -> PollerHandle {
        let cancel = CancellationToken::new();
        let state = self.state.subscribe();
        let task = tokio::spawn(run(self, cancel.clone()));

        PollerHandle {
            state,
            task,
            _guard: cancel.drop_guard(),
        }
    }
}

async fn run(poller: DashboardPoller, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(poller.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Dashboard poller stopped");
                break;
            }
            _ = ticker.tick() => {
                // Rounds are not serialized: a slow one can overlap the next
                let client = poller.client.clone();
                let state = poller.state.clone();
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        result = poll_round(&client, &state) => {
                            if let Err(e) = result {
                                warn!("Dashboard refresh failed, keeping previous data: {}", e);
                            }
                        }
                    }
                });
            }
        }
    }
}

async fn poll_round(client: &ApiClient, state: &StateSender) -> Result<(), ClientError> {
    let (price, sentiment, wisdom) =
        tokio::try_join!(client.price(), client.sentiment(), client.wisdom())?;

    state.send_replace(Some(DashboardState {
        price,
        sentiment,
        wisdom,
        last_update: Utc::now(),
    }));
    Ok(())
}

/// Owner of a running poller. Dropping it cancels the timer.
pub struct PollerHandle {
    state: watch::Receiver<Option<DashboardState>>,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl PollerHandle {
    /// Latest state, `None` until the first round succeeds.
    pub fn current(&self) -> Option<DashboardState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardState>> {
        self.state.clone()
    }

    /// Cancel the timer and wait for the loop to exit. In-flight rounds are
    /// cancelled, not awaited.
    pub async fn shutdown(self) {
        let PollerHandle {
            task,
            _guard: guard,
            ..
        } = self;
        drop(guard);
        if let Err(e) = task.await {
            warn!("Dashboard poller task ended abnormally: {}", e);
        }
    }
}
