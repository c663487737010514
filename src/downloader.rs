use crate::error::InstallError;
use indicatif::{MultiProgress, ProgressBar, ProgressState, ProgressStyle};
use once_cell::sync::Lazy;
use std::fmt;
use std::future::Future;
use std::io::{BufWriter, Write};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::debug;

// Create a reqwest client that will be used to make HTTP requests. This allows
// for keep-alives if we are making multiple requests to the same host.
pub(crate) static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("powershift/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .expect("Unable to create reqwest client")
});

/// Retrieves a remote archive into a local temporary file.
///
/// The returned [`NamedTempFile`] deletes itself when dropped, so callers only
/// need to keep it alive for as long as they read from it.
pub trait Fetch {
    /// Download `url` into a new temporary file whose name ends with
    /// `suffix` (e.g. `.tar.gz`).
    fn fetch(
        &self,
        url: &str,
        suffix: &str,
    ) -> impl Future<Output = Result<NamedTempFile, InstallError>>;
}

/// [`Fetch`] implementation that downloads over HTTP(S), drawing a progress
/// bar while it does so.
pub struct HttpFetcher {
    multi_progress: MultiProgress,
}

impl HttpFetcher {
    pub fn new(multi_progress: MultiProgress) -> HttpFetcher {
        HttpFetcher { multi_progress }
    }

    fn progress_bar(&self, total_size: Option<u64>) -> ProgressBar {
        let pb = match total_size {
            // https://github.com/console-rs/indicatif/blob/HEAD/examples/download.rs#L12
            Some(total_size) => {
                let pb = ProgressBar::new(total_size);
                pb.set_style(
                    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .with_key("eta", |state: &ProgressState, w: &mut dyn fmt::Write| {
                            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                        })
                        .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(ProgressStyle::default_spinner());
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };

        self.multi_progress.add(pb)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, suffix: &str) -> Result<NamedTempFile, InstallError> {
        let download_error = |source: reqwest::Error| InstallError::Download {
            url: url.to_owned(),
            source,
        };

        let mut response = CLIENT
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(download_error)?;

        let mut archive = tempfile::Builder::new()
            .prefix("powershift-")
            .suffix(suffix)
            .tempfile()
            .map_err(|err| InstallError::io("Unable to create temporary file", err))?;

        debug!(path = %archive.path().display(), "Downloading {url}");

        let pb = self.progress_bar(response.content_length());
        pb.set_message(format!(
            "Downloading {}",
            url.rsplit('/').next().unwrap_or(url)
        ));

        let write_error =
            |err: std::io::Error| InstallError::io("Unable to write downloaded archive", err);
        let mut buffer = BufWriter::new(archive.as_file_mut());

        while let Some(ref chunk) = response.chunk().await.map_err(download_error)? {
            buffer.write_all(chunk).map_err(write_error)?;
            pb.inc(chunk.len() as u64);
        }

        buffer.flush().map_err(write_error)?;
        drop(buffer);

        pb.finish_and_clear();
        self.multi_progress.remove(&pb);

        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;
    use indicatif::ProgressDrawTarget;
    use std::net::{SocketAddr, TcpListener};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(MultiProgress::with_draw_target(
            ProgressDrawTarget::hidden(),
        ))
    }

    fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service());
        tokio::spawn(server);
        addr
    }

    #[tokio::test]
    async fn downloads_into_temporary_file() {
        let app = Router::new().route(
            "/releases/v1.5.1/client.tar.gz",
            get(|| async { b"archive bytes".to_vec() }),
        );
        let addr = serve(app);

        let archive = fetcher()
            .fetch(
                &format!("http://{addr}/releases/v1.5.1/client.tar.gz"),
                ".tar.gz",
            )
            .await
            .unwrap();

        let path = archive.path().to_owned();
        assert!(path.to_string_lossy().ends_with(".tar.gz"));
        assert_eq!(std::fs::read(&path).unwrap(), b"archive bytes");

        drop(archive);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn http_error_is_a_download_error() {
        let addr = serve(Router::new());
        let url = format!("http://{addr}/releases/v9.9.9/missing.zip");

        let err = fetcher().fetch(&url, ".zip").await.unwrap_err();

        assert!(matches!(err, InstallError::Download { url: ref failed, .. } if *failed == url));
    }

    #[tokio::test]
    async fn connection_failure_is_a_download_error() {
        // Bind and immediately release a port so nothing is listening on it.
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let err = fetcher()
            .fetch(&format!("http://{addr}/client.zip"), ".zip")
            .await
            .unwrap_err();

        assert!(matches!(err, InstallError::Download { .. }));
    }
}
