//! Media acquisition: image downloads and video keyframes.
//!
//! Acquisition never fails a run. An item that cannot be fetched keeps its
//! remote URL and is passed through unchanged.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::fetch::USER_AGENT;
use crate::result::{MediaItem, MediaKind};
use crate::url_utils::path_extension;
use crate::Result;

const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Fetches media into a local assets directory.
///
/// Returned paths are relative to the output directory (`media/...`).
pub trait MediaFetcher {
    /// Download an image, returning its relative path.
    fn fetch_image(&self, url: &str) -> Option<String>;

    /// Capture a keyframe of a video, returning its relative path.
    fn snapshot_video(&self, url: &str) -> Option<String>;
}

/// Downloads images over HTTP and grabs video frames with `ffmpeg`.
#[derive(Debug, Clone)]
pub struct HttpMediaFetcher {
    client: Client,
    assets_dir: PathBuf,
    assets_dir_name: String,
    ffmpeg: String,
    timeout: Duration,
}

/// Interval between checks on a running `ffmpeg`.
const FFMPEG_POLL: Duration = Duration::from_millis(50);

impl HttpMediaFetcher {
    /// Fetcher writing into `assets_dir`, whose last component names the
    /// prefix of returned paths. The directory is created if missing.
    pub fn new(assets_dir: &Path, timeout: Duration) -> Result<Self> {
        fs::create_dir_all(assets_dir)?;

        let client = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;
        let assets_dir_name = assets_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            client,
            assets_dir: assets_dir.to_path_buf(),
            assets_dir_name,
            ffmpeg: "ffmpeg".to_string(),
            timeout,
        })
    }

    /// Use a different `ffmpeg` executable.
    #[must_use]
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<String>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    fn relative(&self, filename: &str) -> String {
        if self.assets_dir_name.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{filename}", self.assets_dir_name)
        }
    }

    /// Run `ffmpeg` on `url`, killing it once the media timeout has passed.
    fn run_ffmpeg(&self, url: &str, path: &Path) -> Result<bool> {
        let mut child = Command::new(&self.ffmpeg)
            .args(ffmpeg_args(url, self.timeout))
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status.success());
            }
            if Instant::now() >= deadline {
                warn!(url, timeout = ?self.timeout, "ffmpeg timed out");
                // Already exited if kill fails; reap either way.
                let _ = child.kill();
                child.wait()?;
                return Ok(false);
            }
            thread::sleep(FFMPEG_POLL);
        }
    }

    fn download(&self, url: &str, path: &Path) -> Result<()> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        fs::write(path, &bytes)?;
        Ok(())
    }
}

impl MediaFetcher for HttpMediaFetcher {
    fn fetch_image(&self, url: &str) -> Option<String> {
        let filename = image_filename(url);
        match self.download(url, &self.assets_dir.join(&filename)) {
            Ok(()) => {
                debug!(url, file = %filename, "image saved");
                Some(self.relative(&filename))
            }
            Err(e) => {
                warn!(url, error = %e, "image download failed, keeping remote URL");
                None
            }
        }
    }

    fn snapshot_video(&self, url: &str) -> Option<String> {
        let filename = video_snapshot_filename(url);
        match self.run_ffmpeg(url, &self.assets_dir.join(&filename)) {
            Ok(true) => {
                debug!(url, file = %filename, "video snapshot saved");
                Some(self.relative(&filename))
            }
            Ok(false) => {
                warn!(url, "ffmpeg failed, keeping remote URL");
                None
            }
            Err(e) => {
                warn!(url, error = %e, "ffmpeg unavailable, keeping remote URL");
                None
            }
        }
    }
}

/// CRC32 of the URL as eight hex digits.
#[must_use]
pub fn url_digest(url: &str) -> String {
    format!("{:08x}", crc32fast::hash(url.as_bytes()))
}

/// `image-{digest}.{ext}`, the extension taken from the URL path.
#[must_use]
pub fn image_filename(url: &str) -> String {
    let ext = path_extension(url).unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string());
    format!("image-{}.{ext}", url_digest(url))
}

/// `video-{digest}.jpg`
#[must_use]
pub fn video_snapshot_filename(url: &str) -> String {
    format!("video-{}.jpg", url_digest(url))
}

/// `ffmpeg` arguments grabbing one frame of `url`; the output path goes last.
///
/// `-rw_timeout` bounds each network read so a stalled stream fails on its own.
#[must_use]
pub fn ffmpeg_args(url: &str, timeout: Duration) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-rw_timeout".to_string(),
        timeout.as_micros().to_string(),
        "-i".to_string(),
        url.to_string(),
        "-frames:v".to_string(),
        "1".to_string(),
        "-q:v".to_string(),
        "2".to_string(),
    ]
}

/// First `max_items` items, or all of them when `max_items` is 0.
#[must_use]
pub fn limit_items(items: &[MediaItem], max_items: usize) -> &[MediaItem] {
    if max_items == 0 {
        items
    } else {
        &items[..items.len().min(max_items)]
    }
}

/// Download images, capped at `max_items` (0 = unlimited).
///
/// Successful downloads come back with `local_path` set; everything else is
/// returned as given. Non-image items pass through untouched.
#[must_use]
pub fn download_images(
    items: &[MediaItem],
    fetcher: &dyn MediaFetcher,
    max_items: usize,
) -> Vec<MediaItem> {
    limit_items(items, max_items)
        .iter()
        .map(|item| match item.kind {
            MediaKind::Image => fetcher
                .fetch_image(&item.url)
                .map_or_else(|| item.clone(), |path| item.with_local_path(path)),
            MediaKind::Video => item.clone(),
        })
        .collect()
}

/// Capture video keyframes, capped at `max_items` (0 = unlimited).
///
/// Captured items come back with `snapshot_path` set; everything else is
/// returned as given.
#[must_use]
pub fn capture_video_snapshots(
    items: &[MediaItem],
    fetcher: &dyn MediaFetcher,
    max_items: usize,
) -> Vec<MediaItem> {
    limit_items(items, max_items)
        .iter()
        .map(|item| match item.kind {
            MediaKind::Video => fetcher
                .snapshot_video(&item.url)
                .map_or_else(|| item.clone(), |path| item.with_snapshot_path(path)),
            MediaKind::Image => item.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Succeeds for URLs containing "ok".
    struct StubFetcher;

    impl MediaFetcher for StubFetcher {
        fn fetch_image(&self, url: &str) -> Option<String> {
            url.contains("ok").then(|| format!("media/{}", image_filename(url)))
        }

        fn snapshot_video(&self, url: &str) -> Option<String> {
            url.contains("ok").then(|| format!("media/{}", video_snapshot_filename(url)))
        }
    }

    #[test]
    fn test_limit_items() {
        let items: Vec<MediaItem> = (0..5).map(|i| MediaItem::image(format!("https://e.com/{i}.png"))).collect();
        assert_eq!(limit_items(&items, 0).len(), 5);
        assert_eq!(limit_items(&items, 2).len(), 2);
        assert_eq!(limit_items(&items, 9).len(), 5);
    }

    #[test]
    fn test_download_images_keeps_url_on_failure() {
        let items = vec![
            MediaItem::image("https://e.com/ok.png"),
            MediaItem::image("https://e.com/broken.png"),
        ];
        let out = download_images(&items, &StubFetcher, 0);

        assert!(out[0].local_path.as_deref().is_some_and(|p| p.starts_with("media/image-")));
        assert_eq!(out[1], items[1]);
        assert_eq!(out[0].url, items[0].url);
    }

    #[test]
    fn test_capture_video_snapshots_respects_cap() {
        let items = vec![
            MediaItem::video("https://e.com/ok1.mp4"),
            MediaItem::video("https://e.com/ok2.mp4"),
        ];
        let out = capture_video_snapshots(&items, &StubFetcher, 1);

        assert_eq!(out.len(), 1);
        assert!(out[0].snapshot_path.as_deref().is_some_and(|p| p.ends_with(".jpg")));
    }

    #[test]
    fn test_filenames() {
        let digest = url_digest("https://e.com/a.PNG?x=1");
        assert_eq!(digest.len(), 8);
        assert_eq!(image_filename("https://e.com/a.PNG?x=1"), format!("image-{digest}.png"));
        assert!(image_filename("https://e.com/photo").ends_with(".jpg"));
        assert!(image_filename("https://e.com/a.verylongext").ends_with(".jpg"));
        assert!(video_snapshot_filename("https://e.com/v.mp4").starts_with("video-"));
    }

    #[test]
    fn test_missing_ffmpeg_leaves_item_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = HttpMediaFetcher::new(&dir.path().join("media"), Duration::from_secs(1))
            .unwrap()
            .with_ffmpeg("no-such-ffmpeg-binary");

        assert!(fetcher.snapshot_video("https://e.com/v.mp4").is_none());
        assert!(dir.path().join("media").is_dir());
    }

    #[test]
    fn test_ffmpeg_args_carry_read_timeout() {
        let args = ffmpeg_args("https://e.com/v.mp4", Duration::from_secs(3));
        let pos = args.iter().position(|a| a == "-rw_timeout").unwrap();

        assert_eq!(args[pos + 1], "3000000");
        assert!(pos < args.iter().position(|a| a == "-i").unwrap());
        assert_eq!(args.last().map(String::as_str), Some("2"));
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_ffmpeg_is_killed_at_timeout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-ffmpeg");
        fs::write(&script, "#!/bin/sh\nsleep 30\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let fetcher = HttpMediaFetcher::new(&dir.path().join("media"), Duration::from_millis(200))
            .unwrap()
            .with_ffmpeg(script.to_string_lossy());

        let started = Instant::now();
        assert!(fetcher.snapshot_video("https://e.com/v.mp4").is_none());
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
