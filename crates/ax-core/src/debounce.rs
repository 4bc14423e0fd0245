use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

/// Smooths high-frequency input (keystrokes into the filter boxes) before it
/// reaches the filter stage.
///
/// The settled value updates to the latest input only after `delay` has
/// elapsed with no further changes; every intermediate value during the quiet
/// period is discarded, not queued. A pending delay is invalidated by a newer
/// input, and dropping the `Debouncer` cancels (never fires) whatever is
/// pending, so an unmounted consumer is never updated.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, mut rx) = mpsc::unbounded_channel::<T>();
        let (out_tx, output) = watch::channel(initial);

        tokio::spawn(async move {
            'outer: while let Some(mut latest) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            // Newer input: restart the quiet period.
                            Some(value) => latest = value,
                            // Consumer dropped mid-quiet-period: cancel.
                            None => break 'outer,
                        },
                        () = sleep(delay) => {
                            let _ = out_tx.send(latest);
                            break;
                        }
                    }
                }
            }
        });

        Self { input, output }
    }

    /// Feed the latest raw input value.
    pub fn set(&self, value: T) {
        let _ = self.input.send(value);
    }

    /// The most recent settled value.
    pub fn settled(&self) -> T {
        self.output.borrow().clone()
    }

    /// Watch settled values; awaiting `changed()` observes each settle.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::yield_now;
    use tokio::time::advance;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn only_the_latest_of_rapid_inputs_is_observed() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        let mut out = debouncer.subscribe();

        debouncer.set("a".into());
        yield_now().await;
        advance(Duration::from_millis(100)).await;

        debouncer.set("b".into());
        yield_now().await;
        advance(Duration::from_millis(100)).await;

        debouncer.set("c".into());
        yield_now().await;

        // Still inside the quiet period: nothing published yet.
        assert!(!out.has_changed().unwrap());
        assert_eq!(debouncer.settled(), "");

        advance(DELAY).await;
        yield_now().await;

        out.changed().await.unwrap();
        assert_eq!(*out.borrow_and_update(), "c");
        // "a" and "b" were discarded, never queued behind "c".
        assert!(!out.has_changed().unwrap());
        assert_eq!(debouncer.settled(), "c");
    }

    #[tokio::test(start_paused = true)]
    async fn value_settles_after_one_quiet_period() {
        let debouncer = Debouncer::new(0u32, DELAY);

        debouncer.set(7);
        yield_now().await;
        advance(DELAY).await;
        yield_now().await;

        assert_eq!(debouncer.settled(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_gate_cancels_a_pending_delay() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        let out = debouncer.subscribe();

        debouncer.set("pending".into());
        yield_now().await;

        drop(debouncer);
        yield_now().await;
        advance(Duration::from_secs(10)).await;
        yield_now().await;

        // The pending delay never fired.
        assert_eq!(*out.borrow(), "");
    }
}
