// Scheduler - Periodic driver advancing one engine at a fixed cadence
use crate::application::simulation::SimulationEngine;
use crate::domain::series::SeriesBuffer;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Owns at most one ticking task. The task is aborted when the scheduler is
/// dropped, so no exit path can leak a timer mutating a discarded buffer.
#[derive(Debug)]
pub struct Scheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start ticking `engine`. Any previous task is stopped and awaited first.
    ///
    /// `on_tick` sees the window after every advance; returning
    /// `ControlFlow::Break` ends the task.
    pub async fn start<F>(&mut self, mut engine: SimulationEngine, mut on_tick: F)
    where
        F: FnMut(&SeriesBuffer) -> ControlFlow<()> + Send + 'static,
    {
        self.stop().await;

        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let series = engine.tick();
                tracing::debug!("Tick {} at {}", series.last().tick, series.last().ts);
                if on_tick(series).is_break() {
                    tracing::debug!("Tick consumer gone, scheduler exiting");
                    break;
                }
            }
        }));
    }

    /// Cancel the task and wait for it to finish. Stopping an idle scheduler
    /// is a no-op.
    pub async fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        handle.abort();
        match handle.await {
            Err(e) if e.is_panic() => tracing::warn!("Scheduler task panicked: {}", e),
            _ => {}
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulation::SimulationSettings;
    use crate::domain::vehicle::VehicleProfile;
    use std::sync::{Arc, Mutex};

    fn engine() -> SimulationEngine {
        SimulationEngine::bootstrap(VehicleProfile::default(), &SimulationSettings::default(), 0)
    }

    type Ticks = Arc<Mutex<Vec<u64>>>;

    fn recorder() -> (Ticks, impl FnMut(&SeriesBuffer) -> ControlFlow<()> + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |series: &SeriesBuffer| {
            sink.lock().unwrap().push(series.last().tick);
            ControlFlow::Continue(())
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period_in_order() {
        let mut scheduler = Scheduler::new(Duration::from_secs(8));
        let (seen, on_tick) = recorder();
        scheduler.start(engine(), on_tick).await;

        tokio::time::sleep(Duration::from_secs(8 * 5 + 1)).await;
        scheduler.stop().await;

        assert_eq!(*seen.lock().unwrap(), vec![60, 61, 62, 63, 64]);
        assert!(!scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent_and_final() {
        let mut scheduler = Scheduler::new(Duration::from_secs(1));
        let (seen, on_tick) = recorder();
        scheduler.start(engine(), on_tick).await;
        assert!(scheduler.is_running());

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        scheduler.stop().await;
        scheduler.stop().await;
        let count = seen.lock().unwrap().len();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(seen.lock().unwrap().len(), count);
        assert_eq!(count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_task() {
        let mut scheduler = Scheduler::new(Duration::from_secs(1));
        let (first, on_first) = recorder();
        let (second, on_second) = recorder();

        scheduler.start(engine(), on_first).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        scheduler.start(engine(), on_second).await;
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        scheduler.stop().await;

        assert_eq!(*first.lock().unwrap(), vec![60]);
        assert_eq!(*second.lock().unwrap(), vec![60, 61, 62]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_ends_task() {
        let mut scheduler = Scheduler::new(Duration::from_secs(1));
        scheduler
            .start(engine(), |_: &SeriesBuffer| ControlFlow::Break(()))
            .await;

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert!(!scheduler.is_running());
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let (seen, on_tick) = recorder();
        {
            let mut scheduler = Scheduler::new(Duration::from_secs(1));
            scheduler.start(engine(), on_tick).await;
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
