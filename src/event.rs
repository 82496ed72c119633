use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, interval_at};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Regular poll tick at the configured refresh interval.
    Tick,
    /// Low-frequency re-assertion of the non-system limit hook.
    LimitTick,
    Resize,
}

/// Poll timer whose period can be swapped out mid-flight through a watch
/// channel. A rate change discards the pending deadline and the next tick
/// fires one full new period later; the caller forces its own out-of-cadence
/// sample at the moment of the change.
struct PollTimer {
    interval: Interval,
    rate_rx: watch::Receiver<Duration>,
}

impl PollTimer {
    fn new(rate: Duration, rate_rx: watch::Receiver<Duration>) -> Self {
        PollTimer {
            interval: interval_at(Instant::now() + rate, rate),
            rate_rx,
        }
    }

    /// Completes at the next tick of the current period. Cancel-safe: timer
    /// state lives in the struct, not the future.
    async fn tick(&mut self) {
        loop {
            tokio::select! {
                _ = self.interval.tick() => return,
                changed = self.rate_rx.changed() => {
                    if changed.is_err() {
                        // Sender gone; keep the current cadence
                        self.interval.tick().await;
                        return;
                    }
                    let rate = *self.rate_rx.borrow_and_update();
                    self.interval = interval_at(Instant::now() + rate, rate);
                }
            }
        }
    }
}

/// Multiplexes terminal input with the two timers on the single-threaded
/// runtime.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tick_tx: watch::Sender<Duration>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, limit_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let (tick_tx, tick_rx) = watch::channel(tick_rate);

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut poll_timer = PollTimer::new(tick_rate, tick_rx);
            let mut limit_interval = interval_at(Instant::now() + limit_rate, limit_rate);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    _ = poll_timer.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    _ = limit_interval.tick() => {
                        if tx.send(Event::LimitTick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            rx,
            tick_tx,
            _task: task,
        }
    }

    /// Cancels the running poll timer and reinstalls it at `tick_rate`.
    pub fn set_tick_rate(&self, tick_rate: Duration) {
        let _ = self.tick_tx.send(tick_rate);
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
