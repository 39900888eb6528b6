//! Share links and the share-or-download fallback chain.
//!
//! Platform share support is probed, never assumed. Anything that goes wrong
//! ends in a file download or a short notice; no error escapes to the caller.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::error::ShareError;

/// Notice shown when the artifact could not be built for sharing.
pub const NOTICE_BUILD_FAILED: &str = "Не удалось собрать артефакт для шаринга.";
/// Notice shown when the user cancels the share sheet.
pub const NOTICE_CANCELLED: &str = "Шаринг отменен или недоступен.";

const TELEGRAM_BASE: &str = "https://t.me/share/url";
const TWITTER_BASE: &str = "https://twitter.com/intent/tweet";
const VK_BASE: &str = "https://vk.com/share.php";

/// File name of an exported artifact.
pub fn artifact_file_name(id: &str) -> String {
    format!("mystic-orb-{id}.png")
}

/// Cut `text` to at most `budget` characters, marking the cut with `…`.
pub fn truncate_for_share(text: &str, budget: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let kept: String = text.chars().take(budget.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Prefilled share URLs for the three social targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    /// Telegram share URL.
    pub telegram: String,
    /// X (Twitter) intent URL.
    pub twitter: String,
    /// VK share URL.
    pub vk: String,
}

impl ShareLinks {
    /// Build the links for a prediction text and the canonical page URL.
    pub fn build(text: &str, page_url: &str, budget: usize) -> Result<Self, url::ParseError> {
        let snippet = truncate_for_share(text, budget);
        let telegram = Url::parse_with_params(
            TELEGRAM_BASE,
            &[("url", page_url), ("text", snippet.as_str())],
        )?;
        let twitter = Url::parse_with_params(
            TWITTER_BASE,
            &[("text", snippet.as_str()), ("url", page_url)],
        )?;
        let vk = Url::parse_with_params(VK_BASE, &[("url", page_url), ("title", snippet.as_str())])?;

        Ok(Self {
            telegram: telegram.into(),
            twitter: twitter.into(),
            vk: vk.into(),
        })
    }

    /// Labelled links in display order.
    pub fn labelled(&self) -> [(&'static str, &str); 3] {
        [
            ("Telegram", self.telegram.as_str()),
            ("X", self.twitter.as_str()),
            ("VK", self.vk.as_str()),
        ]
    }
}

/// An encoded artifact ready to be shared or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    /// Suggested file name.
    pub file_name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`.
    pub mime: &'static str,
}

/// A host share facility.
pub trait SharePlatform {
    /// Whether the host can share files at all.
    fn can_share(&self) -> bool;

    /// Whether this particular file can be shared.
    fn can_share_file(&self, _file: &ArtifactFile) -> bool {
        self.can_share()
    }

    /// Hand the file to the host share sheet.
    fn share(&mut self, file: &ArtifactFile, title: &str, text: &str) -> Result<(), ShareError>;
}

/// Platform without any share facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShare;

impl SharePlatform for NoShare {
    fn can_share(&self) -> bool {
        false
    }

    fn share(&mut self, _file: &ArtifactFile, _title: &str, _text: &str) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}

/// The file-download fallback.
pub trait Downloads {
    /// Persist the file and return where it went.
    fn save(&mut self, file: &ArtifactFile) -> io::Result<PathBuf>;
}

/// Downloads written into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    /// Save into `dir`, creating it on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Downloads for DirectoryDownloads {
    fn save(&mut self, file: &ArtifactFile) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.file_name);
        fs::write(&path, &file.bytes)?;
        Ok(path)
    }
}

/// How a share or export request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The host share sheet accepted the file.
    Shared,
    /// The file was downloaded instead.
    Downloaded(PathBuf),
    /// Nothing was delivered; show this notice.
    Notice(String),
}

impl ShareOutcome {
    /// Notice text for the inline message slot, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Notice(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Save the artifact through the download fallback.
pub fn download<D: Downloads + ?Sized>(downloads: &mut D, file: &ArtifactFile) -> ShareOutcome {
    match downloads.save(file) {
        Ok(path) => {
            info!(path = %path.display(), "artifact downloaded");
            ShareOutcome::Downloaded(path)
        }
        Err(e) => {
            warn!(error = %e, "artifact download failed");
            ShareOutcome::Notice(format!("Не удалось сохранить артефакт: {e}"))
        }
    }
}

/// Share the artifact when the platform can, download it otherwise.
///
/// Unsupported platforms and failed share calls fall back to a download; a
/// cancelled share yields a notice; an artifact that failed to build yields
/// the build-failure notice.
pub fn share_or_download<P, D, E>(
    platform: &mut P,
    downloads: &mut D,
    artifact: Result<ArtifactFile, E>,
    title: &str,
    text: &str,
) -> ShareOutcome
where
    P: SharePlatform + ?Sized,
    D: Downloads + ?Sized,
    E: fmt::Display,
{
    let file = match artifact {
        Ok(file) => file,
        Err(e) => {
            warn!(error = %e, "artifact build failed");
            return ShareOutcome::Notice(NOTICE_BUILD_FAILED.to_string());
        }
    };

    if !platform.can_share() || !platform.can_share_file(&file) {
        return download(downloads, &file);
    }

    match platform.share(&file, title, text) {
        Ok(()) => ShareOutcome::Shared,
        Err(ShareError::Cancelled) => ShareOutcome::Notice(NOTICE_CANCELLED.to_string()),
        Err(e) => {
            warn!(error = %e, "share failed, falling back to download");
            download(downloads, &file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FakePlatform {
        result: Result<(), ShareError>,
        calls: usize,
    }

    impl SharePlatform for FakePlatform {
        fn can_share(&self) -> bool {
            true
        }

        fn share(&mut self, _file: &ArtifactFile, _title: &str, _text: &str) -> Result<(), ShareError> {
            self.calls += 1;
            self.result.clone()
        }
    }

    fn file() -> ArtifactFile {
        ArtifactFile {
            file_name: artifact_file_name("abc123"),
            bytes: vec![1, 2, 3],
            mime: "image/png",
        }
    }

    #[test]
    fn file_name_uses_id() {
        assert_eq!(artifact_file_name("7f3a"), "mystic-orb-7f3a.png");
    }

    #[test]
    fn truncation_respects_budget() {
        assert_eq!(truncate_for_share("short", 10), "short");
        let cut = truncate_for_share("Звёзды шепчут тебе", 8);
        assert_eq!(cut, "Звёзды…");
        assert!(cut.chars().count() <= 8);
    }

    #[test]
    fn links_are_url_encoded() {
        let links = ShareLinks::build("Шар видит путь", "https://orb.example/", 100).unwrap();
        assert!(links.telegram.starts_with("https://t.me/share/url?url=https%3A%2F%2Forb.example%2F"));
        assert!(links.twitter.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(links.vk.starts_with("https://vk.com/share.php?url="));
        for (_, link) in links.labelled() {
            assert!(!link.contains(' '));
            assert!(!link.contains('Ш'));
        }
    }

    #[test]
    fn links_snapshot() {
        let links = ShareLinks::build("a b", "https://x.io/", 10).unwrap();
        insta::assert_snapshot!(links.telegram, @"https://t.me/share/url?url=https%3A%2F%2Fx.io%2F&text=a+b");
    }

    #[test]
    fn unsupported_platform_downloads() {
        let dir = TempDir::new().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path().join("out"));
        let outcome =
            share_or_download(&mut NoShare, &mut downloads, Ok::<_, String>(file()), "t", "x");
        let expected = dir.path().join("out").join("mystic-orb-abc123.png");
        assert_eq!(outcome, ShareOutcome::Downloaded(expected.clone()));
        assert_eq!(fs::read(expected).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_share_is_a_notice() {
        let dir = TempDir::new().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut platform = FakePlatform {
            result: Err(ShareError::Cancelled),
            calls: 0,
        };
        let outcome =
            share_or_download(&mut platform, &mut downloads, Ok::<_, String>(file()), "t", "x");
        assert_eq!(outcome.notice(), Some(NOTICE_CANCELLED));
        assert_eq!(platform.calls, 1);
    }

    #[test]
    fn failed_share_falls_back_to_download() {
        let dir = TempDir::new().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut platform = FakePlatform {
            result: Err(ShareError::Failed("denied".into())),
            calls: 0,
        };
        let outcome =
            share_or_download(&mut platform, &mut downloads, Ok::<_, String>(file()), "t", "x");
        assert!(matches!(outcome, ShareOutcome::Downloaded(_)));
    }

    #[test]
    fn successful_share() {
        let dir = TempDir::new().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let mut platform = FakePlatform {
            result: Ok(()),
            calls: 0,
        };
        let outcome =
            share_or_download(&mut platform, &mut downloads, Ok::<_, String>(file()), "t", "x");
        assert_eq!(outcome, ShareOutcome::Shared);
    }

    #[test]
    fn build_failure_is_a_notice() {
        let dir = TempDir::new().unwrap();
        let mut downloads = DirectoryDownloads::new(dir.path());
        let outcome = share_or_download(
            &mut NoShare,
            &mut downloads,
            Err::<ArtifactFile, _>("encoder exploded"),
            "t",
            "x",
        );
        assert_eq!(outcome.notice(), Some(NOTICE_BUILD_FAILED));
    }
}
