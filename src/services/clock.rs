/// Wall-clock ticker for the home scene user panel.
///
/// Ticks run on their own thread (current-thread tokio runtime) so the
/// cadence follows real time, not frame time. `ClockTicker` is the disposer:
/// stopping happens exactly once, on `stop()` or on drop.
use crate::constants::{CLOCK_FORMAT, CLOCK_TICK_INTERVAL_MILLIS};
use chrono::NaiveTime;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Source of the local wall-clock time
pub trait TimeSource: Send + Sync + 'static {
    fn now(&self) -> NaiveTime;
}

/// System local time
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Called after every tick (the app passes `ctx.request_repaint`)
pub type RepaintWaker = Arc<dyn Fn() + Send + Sync>;

/// One formatted `HH:MM:SS` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTick(String);

impl ClockTick {
    pub fn at(time: NaiveTime) -> Self {
        Self(format_clock(time))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 24-hour, zero-padded
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Tick loop: one tick immediately, then one per `period` until `stop` fires
/// (or its sender is dropped) or the sink is closed. Late ticks are skipped.
pub async fn run_ticker(
    source: Arc<dyn TimeSource>,
    period: Duration,
    sink: mpsc::UnboundedSender<ClockTick>,
    waker: Option<RepaintWaker>,
    mut stop: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = interval.tick() => {
                if sink.send(ClockTick::at(source.now())).is_err() {
                    break;
                }
                if let Some(wake) = &waker {
                    wake();
                }
            }
        }
    }
}

pub struct ClockTicker {
    stop_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
    rx: mpsc::UnboundedReceiver<ClockTick>,
    latest: Option<ClockTick>,
}

impl ClockTicker {
    /// Start ticking every second against the local clock
    pub fn start_local(waker: Option<RepaintWaker>) -> std::io::Result<Self> {
        Self::start(
            Arc::new(LocalClock),
            Duration::from_millis(CLOCK_TICK_INTERVAL_MILLIS),
            waker,
        )
    }

    pub fn start(
        source: Arc<dyn TimeSource>,
        period: Duration,
        waker: Option<RepaintWaker>,
    ) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        let thread = std::thread::Builder::new()
            .name("clock-ticker".to_string())
            .spawn(move || {
                let rt = match crate::utils::error_handling::create_runtime() {
                    Ok(r) => r,
                    Err(e) => {
                        log::error!("[Clock] {}", e);
                        return;
                    }
                };
                rt.block_on(run_ticker(source, period, tx, waker, stop_rx));
            })?;

        log::debug!("[Clock] Ticker started ({:?} period)", period);

        Ok(Self {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
            rx,
            latest: None,
        })
    }

    /// Drain pending ticks, returning the most recent value seen so far
    pub fn poll(&mut self) -> Option<&ClockTick> {
        while let Ok(tick) = self.rx.try_recv() {
            self.latest = Some(tick);
        }
        self.latest.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    /// Cancel the timer and wait for its thread; later calls are no-ops
    pub fn stop(&mut self) {
        let Some(stop_tx) = self.stop_tx.take() else {
            return;
        };
        let _ = stop_tx.send(());

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("[Clock] Ticker thread panicked");
            }
        }
        log::debug!("[Clock] Ticker stopped");
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    /// Clock that advances with tokio's (pausable) time
    struct FakeClock {
        base: NaiveTime,
        origin: tokio::time::Instant,
    }

    impl TimeSource for FakeClock {
        fn now(&self) -> NaiveTime {
            let elapsed = TimeDelta::from_std(self.origin.elapsed()).unwrap();
            self.base + elapsed
        }
    }

    struct FixedClock(NaiveTime);

    impl TimeSource for FixedClock {
        fn now(&self) -> NaiveTime {
            self.0
        }
    }

    fn is_hh_mm_ss(value: &str) -> bool {
        let bytes = value.as_bytes();
        bytes.len() == 8
            && bytes[2] == b':'
            && bytes[5] == b':'
            && [0, 1, 3, 4, 6, 7].iter().all(|&i| bytes[i].is_ascii_digit())
            && value[0..2].parse::<u32>().map(|h| h < 24).unwrap_or(false)
    }

    #[test]
    fn formats_24_hour_zero_padded() {
        let t = NaiveTime::from_hms_opt(7, 5, 9).unwrap();
        assert_eq!(format_clock(t), "07:05:09");
        let t = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(ClockTick::at(t).as_str(), "23:59:00");
    }

    #[tokio::test(start_paused = true)]
    async fn three_seconds_produce_three_changes_then_silence() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let source = Arc::new(FakeClock {
            base: NaiveTime::from_hms_opt(23, 59, 58).unwrap(),
            origin: tokio::time::Instant::now(),
        });

        let task = tokio::spawn(run_ticker(
            source,
            Duration::from_secs(1),
            tx,
            None,
            stop_rx,
        ));

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }

        // Initial value plus one per elapsed second
        assert_eq!(ticks.len(), 4);
        let changes = ticks.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(changes, 3);
        assert!(ticks.iter().all(|t| is_hh_mm_ss(t.as_str())));
        assert_eq!(ticks[0].as_str(), "23:59:58");
        assert_eq!(ticks[3].as_str(), "00:00:01");

        stop_tx.send(()).unwrap();
        task.await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_stop_sender_ends_the_loop() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let source = Arc::new(FixedClock(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));

        let task = tokio::spawn(run_ticker(source, Duration::from_secs(1), tx, None, stop_rx));
        drop(stop_tx);
        task.await.unwrap();
    }

    #[test]
    fn ticker_thread_delivers_and_stops_once() {
        let fixed = NaiveTime::from_hms_opt(9, 30, 15).unwrap();
        let wakes = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let waker: RepaintWaker = Arc::new(move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        let mut ticker = ClockTicker::start(
            Arc::new(FixedClock(fixed)),
            Duration::from_millis(20),
            Some(waker),
        )
        .unwrap();
        assert!(ticker.is_running());

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while ticker.poll().is_none() && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(ticker.poll().map(ClockTick::as_str), Some("09:30:15"));

        ticker.stop();
        assert!(!ticker.is_running());
        let wakes_at_stop = wakes.load(std::sync::atomic::Ordering::SeqCst);
        assert!(wakes_at_stop >= 1);

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(wakes.load(std::sync::atomic::Ordering::SeqCst), wakes_at_stop);

        // Second stop is a no-op
        ticker.stop();
    }
}
