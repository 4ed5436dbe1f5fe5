use std::time::Duration;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::sleep;

/// Quiet period after the last keystroke before a query is dispatched.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Forwards the most recent value from `input` to `output` once `delay` has
/// passed without a newer one arriving.
///
/// A newer value restarts the window and the superseded value is dropped.
/// When `input` closes, a still-pending value is flushed immediately and the
/// task ends.
pub async fn debounce(mut input: Receiver<String>, output: Sender<String>, delay: Duration) {
    let mut pending: Option<String> = None;

    loop {
        match pending.take() {
            None => match input.recv().await {
                Some(value) => pending = Some(value),
                None => return,
            },
            Some(value) => {
                tokio::select! {
                    newer = input.recv() => match newer {
                        Some(newer) => pending = Some(newer),
                        None => {
                            let _ = output.send(value).await;
                            return;
                        }
                    },
                    _ = sleep(delay) => {
                        if output.send(value).await.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn spawn_debouncer() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
        let (input_tx, input_rx) = mpsc::channel(8);
        let (output_tx, output_rx) = mpsc::channel(8);
        tokio::spawn(debounce(input_rx, output_tx, DEBOUNCE_DELAY));
        (input_tx, output_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_only_the_last_value_after_quiet_period() {
        let (input, mut output) = spawn_debouncer();

        input.send("n".to_string()).await.unwrap();
        input.send("ni".to_string()).await.unwrap();
        input.send("nirvana".to_string()).await.unwrap();

        assert_eq!(output.recv().await.unwrap(), "nirvana");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_value_restarts_the_window() {
        let (input, mut output) = spawn_debouncer();

        input.send("first".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        input.send("second".to_string()).await.unwrap();

        assert_eq!(output.recv().await.unwrap(), "second");
        drop(input);
        assert_eq!(output.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_value_is_flushed_when_input_closes() {
        let (input, mut output) = spawn_debouncer();

        input.send("final".to_string()).await.unwrap();
        drop(input);

        assert_eq!(output.recv().await.unwrap(), "final");
        assert_eq!(output.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_successive_quiet_values() {
        let (input, mut output) = spawn_debouncer();

        input.send("one".to_string()).await.unwrap();
        assert_eq!(output.recv().await.unwrap(), "one");

        input.send("two".to_string()).await.unwrap();
        assert_eq!(output.recv().await.unwrap(), "two");
    }
}
