//! Purpose: Headless presentation controller that routes input events to the store.
//! Exports: `Shell`, `ShellEvent`, `Outcome`, `Pose`, `Viewer`, `Column`.
//! Role: Owns the store, the widget's pose and label, the click detector, and the one viewer.
//! Invariants: Input is trimmed and empty input never reaches the store.
//! Invariants: Transient state only changes inside `handle`; callers supply the time.

mod clicks;
mod label;
mod viewer;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::core::clock::{Clock, LocalClock};
use crate::core::error::Error;
use crate::core::store::{ExportSummary, Store};

pub use clicks::ClickCounter;
pub use label::TransientLabel;
pub use viewer::{Column, EXPORT_FAILED_LABEL, EXPORT_LABEL, EXPORT_OK_LABEL, Viewer};

pub const IDLE_LABEL: &str = "Drag text onto me~\nor copy and press Ctrl+V to feed";
pub const FED_LABEL: &str = "Inspiration eaten!";
pub const CLICK_WINDOW: Duration = Duration::from_secs(1);
pub const CLICKS_TO_OPEN: u32 = 3;
pub const FED_FLASH: Duration = Duration::from_millis(1500);
pub const EXPORT_FLASH: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pose {
    Idle,
    Eating,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShellEvent {
    DragEnter { has_text: bool },
    DragLeave,
    Drop(String),
    Paste(String),
    ManualEntry(String),
    Click,
    OpenViewer,
    Export(PathBuf),
    Tick,
}

#[derive(Debug)]
pub enum Outcome {
    Ignored,
    DragAccepted,
    Fed { content: String },
    Rejected,
    Clicked { count: u32 },
    ViewerOpened { rows: usize },
    Exported(ExportSummary),
    ExportFailed(Error),
}

pub struct Shell<C = LocalClock> {
    store: Store<C>,
    pose: Pose,
    pose_until: Option<Instant>,
    label: TransientLabel,
    clicks: ClickCounter,
    viewer: Option<Viewer>,
}

impl<C: Clock> Shell<C> {
    /// Initializes the store; failure here is fatal to the caller.
    pub fn open(store: Store<C>) -> Result<Self, Error> {
        store.initialize()?;
        Ok(Self {
            store,
            pose: Pose::Idle,
            pose_until: None,
            label: TransientLabel::new(IDLE_LABEL),
            clicks: ClickCounter::new(CLICK_WINDOW, CLICKS_TO_OPEN),
            viewer: None,
        })
    }

    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn label(&self) -> &str {
        self.label.text()
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    /// Store failures on feed or viewer load propagate as `Err`; export
    /// failures come back as `Outcome::ExportFailed`.
    pub fn handle(&mut self, event: ShellEvent, now: Instant) -> Result<Outcome, Error> {
        self.expire(now);
        match event {
            ShellEvent::DragEnter { has_text } => {
                if !has_text {
                    return Ok(Outcome::Ignored);
                }
                self.set_pose(Pose::Eating, None);
                Ok(Outcome::DragAccepted)
            }
            ShellEvent::DragLeave => {
                self.set_pose(Pose::Idle, None);
                Ok(Outcome::Ignored)
            }
            ShellEvent::Drop(text) => {
                let outcome = self.feed(&text, now);
                self.set_pose(Pose::Idle, None);
                outcome
            }
            ShellEvent::Paste(text) | ShellEvent::ManualEntry(text) => self.feed(&text, now),
            ShellEvent::Click => {
                if self.clicks.register(now) {
                    return self.open_viewer();
                }
                Ok(Outcome::Clicked {
                    count: self.clicks.count(),
                })
            }
            ShellEvent::OpenViewer => self.open_viewer(),
            ShellEvent::Export(path) => Ok(self.export(path, now)),
            ShellEvent::Tick => Ok(Outcome::Ignored),
        }
    }

    fn feed(&mut self, text: &str, now: Instant) -> Result<Outcome, Error> {
        let content = text.trim();
        if content.is_empty() {
            tracing::debug!("empty input discarded");
            return Ok(Outcome::Rejected);
        }
        self.store.append(content)?;
        self.label.flash(FED_LABEL, now, FED_FLASH);
        self.set_pose(Pose::Eating, Some(now + FED_FLASH));
        Ok(Outcome::Fed {
            content: content.to_string(),
        })
    }

    fn open_viewer(&mut self) -> Result<Outcome, Error> {
        let rows = self.store.list_all()?;
        let count = rows.len();
        self.viewer = Some(Viewer::new(rows));
        self.clicks.reset();
        tracing::debug!(rows = count, "viewer opened");
        Ok(Outcome::ViewerOpened { rows: count })
    }

    fn export(&mut self, path: PathBuf, now: Instant) -> Outcome {
        let result = self.store.export_all(&path);
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.flash_export(result.is_ok(), now, EXPORT_FLASH);
        }
        match result {
            Ok(summary) => Outcome::Exported(summary),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "export failed");
                Outcome::ExportFailed(err)
            }
        }
    }

    fn set_pose(&mut self, pose: Pose, until: Option<Instant>) {
        self.pose = pose;
        self.pose_until = until;
    }

    fn expire(&mut self, now: Instant) {
        self.label.tick(now);
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.tick(now);
        }
        if self.pose_until.is_some_and(|until| now >= until) {
            self.set_pose(Pose::Idle, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EXPORT_FAILED_LABEL, EXPORT_LABEL, EXPORT_OK_LABEL, FED_FLASH, FED_LABEL, IDLE_LABEL,
        Outcome, Pose, Shell, ShellEvent,
    };
    use crate::config::StoreConfig;
    use crate::core::error::ErrorKind;
    use crate::core::store::Store;
    use std::time::{Duration, Instant};

    fn shell_in(dir: &tempfile::TempDir) -> Shell {
        let store = Store::new(&StoreConfig::new(dir.path().join("inspirations.db")));
        Shell::open(store).expect("open shell")
    }

    fn stored(shell: &Shell) -> Vec<String> {
        shell
            .store()
            .list_all()
            .expect("list")
            .into_iter()
            .map(|r| r.content)
            .collect()
    }

    #[test]
    fn blank_input_is_rejected_before_the_store() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let now = Instant::now();
        for event in [
            ShellEvent::Paste(String::new()),
            ShellEvent::ManualEntry("   ".to_string()),
            ShellEvent::Drop("\n\t".to_string()),
        ] {
            let outcome = shell.handle(event, now).expect("handle");
            assert!(matches!(outcome, Outcome::Rejected));
        }
        assert!(stored(&shell).is_empty());
        assert_eq!(shell.label(), IDLE_LABEL);
    }

    #[test]
    fn feeding_trims_and_stores() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let outcome = shell
            .handle(ShellEvent::Paste("  spark  \n".to_string()), Instant::now())
            .expect("handle");
        match outcome {
            Outcome::Fed { content } => assert_eq!(content, "spark"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(stored(&shell), ["spark"]);
    }

    #[test]
    fn fed_flash_reverts_after_deadline() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let start = Instant::now();
        shell
            .handle(ShellEvent::ManualEntry("idea".to_string()), start)
            .expect("feed");
        assert_eq!(shell.label(), FED_LABEL);
        assert_eq!(shell.pose(), Pose::Eating);

        shell
            .handle(ShellEvent::Tick, start + FED_FLASH - Duration::from_millis(1))
            .expect("tick");
        assert_eq!(shell.pose(), Pose::Eating);

        shell.handle(ShellEvent::Tick, start + FED_FLASH).expect("tick");
        assert_eq!(shell.label(), IDLE_LABEL);
        assert_eq!(shell.pose(), Pose::Idle);
    }

    #[test]
    fn drag_cycle_sets_and_clears_pose() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let now = Instant::now();

        let outcome = shell
            .handle(ShellEvent::DragEnter { has_text: false }, now)
            .expect("enter");
        assert!(matches!(outcome, Outcome::Ignored));
        assert_eq!(shell.pose(), Pose::Idle);

        shell
            .handle(ShellEvent::DragEnter { has_text: true }, now)
            .expect("enter");
        assert_eq!(shell.pose(), Pose::Eating);
        shell.handle(ShellEvent::DragLeave, now).expect("leave");
        assert_eq!(shell.pose(), Pose::Idle);

        shell
            .handle(ShellEvent::DragEnter { has_text: true }, now)
            .expect("enter");
        let outcome = shell
            .handle(ShellEvent::Drop("dropped".to_string()), now)
            .expect("drop");
        assert!(matches!(outcome, Outcome::Fed { .. }));
        assert_eq!(shell.pose(), Pose::Idle);
        assert_eq!(shell.label(), FED_LABEL);
    }

    #[test]
    fn triple_click_opens_viewer_with_newest_first() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let start = Instant::now();
        shell
            .handle(ShellEvent::ManualEntry("one".to_string()), start)
            .expect("feed");
        shell
            .handle(ShellEvent::ManualEntry("two".to_string()), start)
            .expect("feed");

        let first = shell.handle(ShellEvent::Click, start).expect("click");
        assert!(matches!(first, Outcome::Clicked { count: 1 }));
        shell
            .handle(ShellEvent::Click, start + Duration::from_millis(100))
            .expect("click");
        let third = shell
            .handle(ShellEvent::Click, start + Duration::from_millis(200))
            .expect("click");
        assert!(matches!(third, Outcome::ViewerOpened { rows: 2 }));

        let viewer = shell.viewer().expect("viewer");
        let contents: Vec<&str> = viewer.rows().iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, ["two", "one"]);
    }

    #[test]
    fn reopening_viewer_replaces_snapshot() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let now = Instant::now();
        shell.handle(ShellEvent::OpenViewer, now).expect("open");
        assert!(shell.viewer().expect("viewer").is_empty());

        shell
            .handle(ShellEvent::Paste("later".to_string()), now)
            .expect("feed");
        assert!(shell.viewer().expect("viewer").is_empty());

        shell.handle(ShellEvent::OpenViewer, now).expect("reopen");
        assert_eq!(shell.viewer().expect("viewer").len(), 1);

        shell.close_viewer();
        assert!(shell.viewer().is_none());
    }

    #[test]
    fn export_outcomes_flash_viewer_label() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut shell = shell_in(&temp);
        let now = Instant::now();
        shell
            .handle(ShellEvent::Paste("exported".to_string()), now)
            .expect("feed");
        shell.handle(ShellEvent::OpenViewer, now).expect("open");

        let good = temp.path().join("out.txt");
        let outcome = shell
            .handle(ShellEvent::Export(good.clone()), now)
            .expect("export");
        match outcome {
            Outcome::Exported(summary) => assert_eq!(summary.records, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(shell.viewer().expect("viewer").export_label(), EXPORT_OK_LABEL);

        let bad = temp.path().join("nope").join("out.txt");
        let outcome = shell
            .handle(ShellEvent::Export(bad), now)
            .expect("export");
        match outcome {
            Outcome::ExportFailed(err) => assert_eq!(err.kind(), ErrorKind::Export),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            shell.viewer().expect("viewer").export_label(),
            EXPORT_FAILED_LABEL
        );

        shell
            .handle(ShellEvent::Tick, now + Duration::from_secs(2))
            .expect("tick");
        assert_eq!(shell.viewer().expect("viewer").export_label(), EXPORT_LABEL);
    }

    #[test]
    fn open_fails_when_storage_is_unavailable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = Store::new(&StoreConfig::new(
            temp.path().join("absent").join("inspirations.db"),
        ));
        let err = Shell::open(store).err().expect("should fail");
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }
}
