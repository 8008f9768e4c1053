//! Progress display for package verification, download, and extraction.

use std::cell::Cell;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psvpack_core::{format_rate, format_size};
use psvpack_lib::InstallProgress;

/// Single progress line driven by [`InstallProgress`] events.
pub(crate) struct InstallBar {
    bar: ProgressBar,
    download_started: Cell<Option<Instant>>,
}

fn bytes_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "  {msg:12} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({binary_bytes_per_sec}, {eta})",
    )
    .expect("static pattern")
    .progress_chars("=> ")
}

fn spinner_style(template: &'static str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .expect("static pattern")
        .tick_chars("/-\\|")
}

impl InstallBar {
    /// When `quiet` is true, nothing is drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::hidden();
        if !quiet {
            bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        Self {
            bar,
            download_started: Cell::new(None),
        }
    }

    pub(crate) fn handle(&self, event: InstallProgress) {
        match event {
            InstallProgress::Verifying {
                bytes_done,
                bytes_total,
            } => {
                if bytes_done == 0 || self.bar.length() != Some(bytes_total) {
                    self.restart(bytes_style(), Some(bytes_total), "verifying");
                }
                self.bar.set_position(bytes_done);
            }
            InstallProgress::DownloadStarted { total_bytes } => {
                let style = if total_bytes.is_some() {
                    bytes_style()
                } else {
                    spinner_style("  {spinner:.cyan} {msg} {bytes}")
                };
                self.restart(style, total_bytes, "downloading");
                self.download_started.set(Some(Instant::now()));
            }
            InstallProgress::Downloading { bytes_done, .. } => {
                self.bar.set_position(bytes_done);
            }
            InstallProgress::DownloadFinished { bytes } => {
                self.bar.finish_and_clear();
                let elapsed = self
                    .download_started
                    .take()
                    .map(|t| t.elapsed())
                    .unwrap_or_default();
                log::info!(
                    "  {} Downloaded {}{}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    format_size(bytes),
                    rate_suffix(bytes, elapsed),
                );
            }
            InstallProgress::Extracting => {
                self.restart(spinner_style("  {spinner:.cyan} {msg}"), None, "extracting");
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
        }
    }

    fn restart(&self, style: ProgressStyle, length: Option<u64>, msg: &'static str) {
        self.bar.reset();
        self.bar.disable_steady_tick();
        self.bar.set_style(style);
        if let Some(n) = length {
            self.bar.set_length(n);
        }
        self.bar.set_message(msg);
    }

    /// Clear whatever is on the line.
    pub(crate) fn finish(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

fn rate_suffix(bytes: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 0.001 {
        return String::new();
    }
    format!(
        " in {:.1}s ({})",
        secs,
        format_rate(bytes as f64 / secs, false)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_suffix() {
        assert_eq!(rate_suffix(100, Duration::ZERO), "");
        assert_eq!(
            rate_suffix(2 * 1024 * 1024, Duration::from_secs(1)),
            " in 1.0s (2.0 MiB/s)"
        );
    }

    #[test]
    fn test_hidden_bar_accepts_events() {
        let bar = InstallBar::new(true);
        bar.handle(InstallProgress::verifying(0, 10));
        bar.handle(InstallProgress::verifying(10, 10));
        bar.handle(InstallProgress::DownloadStarted {
            total_bytes: Some(10),
        });
        bar.handle(InstallProgress::downloading(10, Some(10)));
        bar.handle(InstallProgress::DownloadFinished { bytes: 10 });
        bar.handle(InstallProgress::Extracting);
        bar.finish();
    }
}
