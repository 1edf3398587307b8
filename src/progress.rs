use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// API応答待ちのスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// 処理の完了を待ってからスピナーを消す（失敗時も消してから結果を返す）
pub async fn finish_after<F: Future>(bar: &ProgressBar, future: F) -> F::Output {
    let output = future.await;
    bar.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spinner_cleared_when_operation_fails() {
        let bar = ProgressBar::hidden();
        let result: Result<(), &str> = finish_after(&bar, async { Err("rejected") }).await;
        assert_eq!(result, Err("rejected"));
        assert!(bar.is_finished());
    }

    #[tokio::test]
    async fn test_spinner_passes_output_through() {
        let bar = ProgressBar::hidden();
        assert_eq!(finish_after(&bar, async { 42 }).await, 42);
        assert!(bar.is_finished());
    }
}
