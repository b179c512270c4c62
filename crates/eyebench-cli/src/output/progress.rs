//! Terminal progress bar bridging the collection pipeline's progress events
//! onto indicatif.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

use eyebench_core::{ProgressEvent, ProgressSink};

/// Renders collection progress as a terminal bar, or stays silent when
/// disabled (quiet mode, non-tty output).
pub struct ProgressReporter {
    enabled: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: Mutex::new(None),
        }
    }

    fn bar_for(&self, total: Option<usize>) -> ProgressBar {
        let mut guard = self.bar.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard
            .get_or_insert_with(|| {
                let bar = match total {
                    Some(total) => ProgressBar::new(total as u64),
                    None => ProgressBar::new_spinner(),
                };
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
                );
                bar
            })
            .clone()
    }
}

impl ProgressSink for ProgressReporter {
    fn on_event(&self, event: ProgressEvent) {
        if !self.enabled {
            return;
        }
        match event {
            ProgressEvent::Started { name, index, total } => {
                let bar = self.bar_for(total);
                bar.set_position(index as u64);
                bar.set_message(name);
            }
            ProgressEvent::Committed { .. } => {
                let bar = self.bar_for(None);
                bar.inc(1);
            }
            ProgressEvent::Skipped { name, reason } => {
                let bar = self.bar_for(None);
                bar.println(format!("skipped {name}: {reason}"));
                bar.inc(1);
            }
            ProgressEvent::Finished { committed, skipped } => {
                let bar = self.bar_for(None);
                bar.finish_with_message(format!("{committed} committed, {skipped} skipped"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_ignores_events() {
        let reporter = ProgressReporter::new(false);
        reporter.on_event(ProgressEvent::Started {
            name: String::from("a.jpg"),
            index: 0,
            total: Some(1),
        });
        reporter.on_event(ProgressEvent::Finished {
            committed: 1,
            skipped: 0,
        });
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_bar_created_on_first_event() {
        let reporter = ProgressReporter::new(true);
        reporter.on_event(ProgressEvent::Started {
            name: String::from("a.jpg"),
            index: 0,
            total: Some(3),
        });
        let guard = reporter.bar.lock().unwrap();
        let bar = guard.as_ref().unwrap();
        assert_eq!(bar.length(), Some(3));
    }

    #[test]
    fn test_bar_position_follows_image_index() {
        let reporter = ProgressReporter::new(true);
        reporter.on_event(ProgressEvent::Started {
            name: String::from("c.jpg"),
            index: 2,
            total: Some(5),
        });
        let guard = reporter.bar.lock().unwrap();
        assert_eq!(guard.as_ref().unwrap().position(), 2);
    }
}
