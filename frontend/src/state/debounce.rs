//! Trailing-edge debounce over a `watch` channel.

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle};

/// Publishes the latest input once it has been quiet for `delay`.
///
/// Each `set` restarts the quiet period, so a burst of inputs yields a single
/// output. The background task stops when the value is dropped.
pub struct Debounced<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, mut pending) = watch::channel(initial.clone());
        let (settled, output) = watch::channel(initial);

        let task = tokio::spawn(async move {
            while pending.changed().await.is_ok() {
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => break,
                        changed = pending.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }
                let value = pending.borrow_and_update().clone();
                settled.send_if_modified(|current| {
                    if *current == value {
                        return false;
                    }
                    *current = value;
                    true
                });
            }
        });

        Self { input, output, task }
    }

    /// Records a new input. Repeating the latest input does not restart the delay.
    pub fn set(&self, value: T) {
        self.input.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    pub fn latest_input(&self) -> T {
        self.input.borrow().clone()
    }

    /// The last settled value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
