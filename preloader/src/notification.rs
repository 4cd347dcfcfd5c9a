// Notifications from the main application to the preloader
//
// The main application reports progress through a PreloaderHandle, which is
// Send so worker threads can use it. Notifications are handled on the GLib
// main context by the preloader's listener.

use tokio::sync::mpsc;

use crate::flavor::Flavor;
use crate::i18n::{keys, Catalog};

/// Above this fraction the remaining work is reported as indeterminate.
pub const INDETERMINATE_THRESHOLD: f64 = 0.99;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    BeforeLoad,
    BeforeInit,
    BeforeStart,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    /// Initialisation progress in `[0, 1]`.
    Progress(f64),
    /// The main application moved to another phase; the splash goes away.
    StateChange(Phase),
    /// Initialisation failed; shown to the user before the splash closes.
    Error {
        location: String,
        cause: String,
        details: String,
    },
}

/// Callbacks into the main application.
pub trait Notifier {
    /// Startup checks and first-run configuration are done. `handle` is the
    /// channel for progress from here on.
    fn on_configuration_succeeded(&self, handle: PreloaderHandle);

    /// The splash has been dismissed.
    fn on_preloading_succeeded(&self);

    /// An `Error` notification was shown and the splash closed.
    fn on_preloading_failed(&self) {}
}

#[derive(Clone, Debug)]
pub struct PreloaderHandle {
    tx: mpsc::UnboundedSender<Notification>,
}

impl PreloaderHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns false once the preloader stopped listening.
    pub fn notify(&self, notification: Notification) -> bool {
        self.tx.send(notification).is_ok()
    }

    pub fn progress(&self, fraction: f64) -> bool {
        self.notify(Notification::Progress(fraction))
    }

    pub fn state_change(&self, phase: Phase) -> bool {
        self.notify(Notification::StateChange(phase))
    }

    pub fn error(
        &self,
        location: impl Into<String>,
        cause: impl Into<String>,
        details: impl Into<String>,
    ) -> bool {
        self.notify(Notification::Error {
            location: location.into(),
            cause: cause.into(),
            details: details.into(),
        })
    }
}

/// What the splash shows for a progress value.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressDisplay {
    /// `None` pulses the bar.
    pub fraction: Option<f64>,
    pub status: String,
}

pub fn progress_display(value: f64, flavor: Flavor, catalog: &Catalog) -> ProgressDisplay {
    if value < INDETERMINATE_THRESHOLD {
        ProgressDisplay {
            fraction: Some(value),
            status: flavor.retoken(&catalog.text(keys::PROCESSING_INPUT)),
        }
    } else {
        ProgressDisplay {
            fraction: None,
            status: catalog.text(keys::FORMATTING_DATA),
        }
    }
}

pub fn error_message(location: &str, cause: &str, details: &str) -> String {
    format!("{location}:\n\n{cause}\n\n{details}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_below_threshold_is_measured() {
        let catalog = Catalog::builtin();
        let display = progress_display(0.5, Flavor::Mame, &catalog);
        assert_eq!(display.fraction, Some(0.5));
        assert_eq!(display.status, "Processing MAME input…");
    }

    #[test]
    fn progress_status_follows_flavor() {
        let catalog = Catalog::builtin();
        let display = progress_display(0.1, Flavor::Mess, &catalog);
        assert_eq!(display.status, "Processing MESS input…");
    }

    #[test]
    fn progress_near_completion_is_indeterminate() {
        let catalog = Catalog::builtin();
        for value in [0.99, 1.0] {
            let display = progress_display(value, Flavor::Mess, &catalog);
            assert_eq!(display.fraction, None);
            assert_eq!(display.status, "Formatting data…");
        }
    }

    #[test]
    fn error_layout() {
        assert_eq!(
            error_message("Loader", "IoError", "disk full"),
            "Loader:\n\nIoError\n\ndisk full"
        );
    }

    #[test]
    fn handle_reports_closed_listener() {
        let (handle, mut rx) = PreloaderHandle::channel();
        assert!(handle.progress(0.25));
        assert!(handle.state_change(Phase::BeforeStart));
        assert_eq!(rx.try_recv(), Ok(Notification::Progress(0.25)));
        assert_eq!(
            rx.try_recv(),
            Ok(Notification::StateChange(Phase::BeforeStart))
        );
        drop(rx);
        assert!(!handle.error("here", "why", "what"));
    }
}
