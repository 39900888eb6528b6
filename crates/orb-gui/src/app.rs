//! Application state for the orb window.
//!
//! Everything here is independent of the window, so the submission flow and
//! the export actions can be driven from tests with explicit timestamps.

use std::time::Duration;

use orb_core::share::{self, DirectoryDownloads, NoShare, ShareLinks, ShareOutcome};
use orb_core::{OrbConfig, Session, SubmitError, TableOracle};
use orb_render::artifact::TITLE;
use orb_render::{AnimationDriver, Artifact, FrameRenderer, FrameStats, build_artifact};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

/// Shared application state.
pub struct AppState {
    /// The interaction session.
    pub session: Session,
    /// Owns the orb surface and draws it every frame.
    pub driver: AnimationDriver,
    /// Text in the name field.
    pub name: String,
    /// Confirmation shown under the share buttons.
    pub status_line: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    oracle: TableOracle,
    rng: StdRng,
    downloads: DirectoryDownloads,
}

impl AppState {
    /// Create an idle app whose orb surface is `size` logical pixels square.
    pub fn new(config: OrbConfig, size: f32, scale: f32) -> Self {
        let renderer = FrameRenderer::new(config.reduced_motion, config.effects);
        let downloads = DirectoryDownloads::new(&config.download_dir);
        Self {
            driver: AnimationDriver::new(size, size, scale, renderer),
            oracle: TableOracle::new(config.seed),
            rng: StdRng::seed_from_u64(config.seed),
            session: Session::new(config),
            name: String::new(),
            status_line: None,
            should_quit: false,
            downloads,
        }
    }

    /// Submit the current name. Ignored while the orb is thinking.
    pub fn submit(&mut self, now: Duration) {
        match self.session.submit(&self.name, now, &mut self.rng) {
            Ok(submission) => {
                self.status_line = None;
                debug!(name = %submission.name, "submitted");
                self.name = submission.name;
            }
            Err(SubmitError::Busy) => {}
            Err(e) => debug!(error = %e, "submission rejected"),
        }
    }

    /// Reveal a due prediction and draw the next frame.
    pub fn tick(&mut self, now: Duration) -> FrameStats {
        self.session.poll(now, &mut self.oracle);
        self.driver.tick(now, self.session.state_mut(), &mut self.rng)
    }

    /// Resize the orb surface when the on-screen square changed.
    ///
    /// Returns whether a resize happened.
    pub fn fit_orb(&mut self, size: f32, scale: f32) -> bool {
        let surface = self.driver.surface();
        let (current, _) = surface.logical_size();
        if (current - size).abs() < 0.5 && (surface.scale() - scale).abs() < 0.01 {
            return false;
        }
        self.driver.resize(size, size, scale);
        true
    }

    /// Save the prediction card into the download directory.
    pub fn export(&mut self) {
        let outcome = match self.artifact() {
            Ok(file) => share::download(&mut self.downloads, &file),
            Err(e) => {
                warn!(error = %e, "artifact build failed");
                ShareOutcome::Notice(share::NOTICE_BUILD_FAILED.to_string())
            }
        };
        self.settle(outcome);
    }

    /// Share the prediction card; the desktop has no share sheet, so this
    /// ends in a download.
    pub fn share(&mut self) {
        let text = self
            .session
            .prediction()
            .map(|p| p.text.clone())
            .unwrap_or_default();
        let artifact = self.artifact();
        let outcome =
            share::share_or_download(&mut NoShare, &mut self.downloads, artifact, TITLE, &text);
        self.settle(outcome);
    }

    /// Telegram share link for the current prediction.
    pub fn telegram_link(&self) -> Option<String> {
        let prediction = self.session.prediction()?;
        let config = self.session.config();
        match ShareLinks::build(&prediction.text, &config.page_url, config.share_text_budget) {
            Ok(links) => Some(links.telegram),
            Err(e) => {
                warn!(error = %e, "cannot build share links");
                None
            }
        }
    }

    /// Record that a link went to the clipboard.
    pub fn link_copied(&mut self) {
        self.status_line = Some("Ссылка скопирована".to_string());
    }

    fn artifact(&self) -> orb_render::RenderResult<orb_core::share::ArtifactFile> {
        build_artifact(self.driver.surface(), self.session.prediction()).map(Artifact::into_file)
    }

    fn settle(&mut self, outcome: ShareOutcome) {
        match outcome {
            ShareOutcome::Downloaded(path) => {
                info!(path = %path.display(), "card saved");
                self.session.set_error(None);
                self.status_line = Some(format!("Сохранено: {}", path.display()));
            }
            ShareOutcome::Shared => {
                self.session.set_error(None);
                self.status_line = Some("Отправлено".to_string());
            }
            ShareOutcome::Notice(msg) => {
                self.status_line = None;
                self.session.set_error(Some(msg));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::Status;
    use tempfile::TempDir;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn app(dir: &TempDir) -> AppState {
        let config = OrbConfig::default()
            .with_seed(7)
            .with_download_dir(dir.path());
        AppState::new(config, 48.0, 1.0)
    }

    #[test]
    fn prediction_arrives_after_delay() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.name = "  Мира ".to_string();

        app.submit(secs(1.0));
        assert_eq!(app.session.status(), Status::Thinking);
        assert!(!app.session.button_enabled());

        app.tick(secs(1.1));
        assert_eq!(app.session.status(), Status::Thinking);

        app.tick(secs(10.0));
        assert_eq!(app.session.status(), Status::Result);
        assert!(app.session.card_visible());
        assert_eq!(app.session.state().time, 10.0);
    }

    #[test]
    fn submit_writes_clean_name_back() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.name = "  Анна   Мария!!7 ".to_string();
        app.submit(secs(0.0));
        assert_eq!(app.name, "Анна Мария");

        app.tick(secs(10.0));
        app.name = "???".to_string();
        app.submit(secs(11.0));
        assert_eq!(app.name, "???");
    }

    #[test]
    fn second_submit_while_thinking_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.name = "Ivo".to_string();
        app.submit(secs(0.0));
        let ready = app.session.pending().unwrap().ready_at;

        app.name = "Someone else".to_string();
        app.submit(secs(0.5));
        assert_eq!(app.session.pending().unwrap().ready_at, ready);
    }

    #[test]
    fn empty_name_shows_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.name = "!!!".to_string();
        app.submit(secs(0.0));
        assert_eq!(app.session.status(), Status::Idle);
        assert!(app.session.error().is_some());
    }

    #[test]
    fn export_writes_card() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.name = "Ivo".to_string();
        app.submit(secs(0.0));
        app.tick(secs(10.0));

        app.export();
        let id = &app.session.prediction().unwrap().id;
        let path = dir.path().join(share::artifact_file_name(id));
        assert!(path.exists());
        assert!(app.status_line.as_deref().unwrap().starts_with("Сохранено"));
        assert!(app.session.error().is_none());
    }

    #[test]
    fn share_falls_back_to_download() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.name = "Ivo".to_string();
        app.submit(secs(0.0));
        app.tick(secs(10.0));

        app.share();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn export_without_prediction_shows_notice() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.export();
        assert_eq!(app.session.error(), Some(share::NOTICE_BUILD_FAILED));
        assert!(app.status_line.is_none());
    }

    #[test]
    fn telegram_link_needs_prediction() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(app.telegram_link().is_none());

        app.name = "Ivo".to_string();
        app.submit(secs(0.0));
        app.tick(secs(10.0));
        let link = app.telegram_link().unwrap();
        assert!(link.starts_with("https://t.me/share/url?"));
    }

    #[test]
    fn fit_orb_only_resizes_on_change() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert!(!app.fit_orb(48.0, 1.0));
        assert!(app.fit_orb(96.0, 2.0));
        assert_eq!(app.driver.surface().device_size(), (192, 192));
    }
}
