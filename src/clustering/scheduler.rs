use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{Datelike, Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tokio::time::{interval, Duration};

use crate::clustering::model::ClusterModel;
use crate::clustering::provider::UserGardenProvider;
use crate::clustering::training::TrainingPipeline;
use crate::notifications::PushNotifier;
use crate::optimizer::CancellationToken;

/// When the two periodic jobs fire, in local-server time. Mirrors the
/// `MONTHLY_RETRAIN_DAY`/`MONTHLY_RETRAIN_HOUR`/`WEEKLY_RECOMMENDATIONS_DAY`/
/// `WEEKLY_RECOMMENDATIONS_HOUR` settings the original scheduler reads.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleSettings {
    pub monthly_retrain_day: u32,
    pub monthly_retrain_hour: u32,
    pub weekly_broadcast_weekday: chrono::Weekday,
    pub weekly_broadcast_hour: u32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            monthly_retrain_day: 1,
            monthly_retrain_hour: 2,
            weekly_broadcast_weekday: chrono::Weekday::Mon,
            weekly_broadcast_hour: 9,
        }
    }
}

const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Polls once a minute and fires the monthly retrain / weekly broadcast jobs
/// when the clock crosses their configured slot, guarding each with a mutex
/// so a slow run can't overlap itself on the next tick. A from-scratch
/// replacement for the original's `AsyncIOScheduler` + `CronTrigger`, since
/// this crate's stack has no APScheduler analogue — built on the `tokio`
/// timer the rest of the ambient stack already depends on.
pub struct PeriodicScheduler<P: UserGardenProvider> {
    settings: ScheduleSettings,
    provider: Arc<P>,
    training: TrainingPipeline<P>,
    live_model: Arc<ArcSwap<ClusterModel>>,
    notifier: Arc<dyn PushNotifier>,
    retrain_guard: Mutex<()>,
    broadcast_guard: Mutex<()>,
}

impl<P: UserGardenProvider + 'static> PeriodicScheduler<P> {
    pub fn new(
        settings: ScheduleSettings,
        provider: Arc<P>,
        training: TrainingPipeline<P>,
        live_model: Arc<ArcSwap<ClusterModel>>,
        notifier: Arc<dyn PushNotifier>,
    ) -> Self {
        Self {
            settings,
            provider,
            training,
            live_model,
            notifier,
            retrain_guard: Mutex::new(()),
            broadcast_guard: Mutex::new(()),
        }
    }

    /// Runs forever, ticking once a minute. Intended to be spawned as a
    /// dedicated task; cancel by dropping its `JoinHandle`.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            let now = Utc::now();
            if now.day() == self.settings.monthly_retrain_day && now.hour() == self.settings.monthly_retrain_hour && now.minute() == 0 {
                self.clone().fire_retrain();
            }
            if now.weekday() == self.settings.weekly_broadcast_weekday && now.hour() == self.settings.weekly_broadcast_hour && now.minute() == 0 {
                self.clone().fire_broadcast();
            }
        }
    }

    fn fire_retrain(self: Arc<Self>) {
        tokio::spawn(async move {
            let Ok(_guard) = self.retrain_guard.try_lock() else {
                log::warn!("monthly retrain job still running, skipping this tick");
                return;
            };
            log::info!("running monthly retrain job");
            let mut rng = StdRng::from_entropy();
            match self.training.run(&self.live_model, &mut rng, &CancellationToken::new()) {
                Ok(report) => log::info!(
                    "retrain completed: k={} n_samples={} silhouette={:.3}",
                    report.k,
                    report.n_samples,
                    report.silhouette_score
                ),
                Err(err) => log::warn!("retrain job failed: {err}"),
            }
        });
    }

    /// Iterates every fitted cluster and, within each, every user carrying a
    /// push token, ranking and pushing one recommendation per recipient —
    /// the weekly broadcast job of §4.8, built on the same cluster-scoped
    /// notification path `ClusterAdmin::notify_cluster` exposes as an
    /// on-demand admin operation.
    fn fire_broadcast(self: Arc<Self>) {
        tokio::spawn(async move {
            let Ok(_guard) = self.broadcast_guard.try_lock() else {
                log::warn!("weekly broadcast job still running, skipping this tick");
                return;
            };
            log::info!("running weekly recommendations broadcast");
            let model = self.live_model.load();
            let k = model.k;
            for cluster_id in 0..k as u32 {
                match crate::clustering::admin::notify_cluster(&*self.provider, &model, &*self.notifier, cluster_id) {
                    Ok(report) => log::info!(
                        "cluster {cluster_id} broadcast: notified={} skipped={}",
                        report.notified,
                        report.skipped_no_candidates
                    ),
                    Err(err) => log::warn!("cluster {cluster_id} broadcast failed: {err}"),
                }
            }
        });
    }
}
