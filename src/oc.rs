use crate::error::OcError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// Environment variable naming the `oc` program to run.
pub const OC_ENV: &str = "POWERSHIFT_OC";

/// Thin wrapper around the `oc` command line tool.
#[derive(Debug, Clone)]
pub struct Oc {
    program: PathBuf,
}

impl Default for Oc {
    fn default() -> Self {
        Oc::new("oc")
    }
}

impl Oc {
    pub fn new(program: impl Into<PathBuf>) -> Oc {
        Oc {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Run `oc` with `args` and return its trimmed standard output.
    ///
    /// A non-zero exit becomes [`OcError::Failed`] carrying everything the
    /// command printed.
    pub async fn run(&self, args: &[&str]) -> Result<String, OcError> {
        debug!(program = %self.program.display(), ?args, "Running oc");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => OcError::NotInstalled {
                    program: self.program_name(),
                },
                _ => OcError::Io {
                    program: self.program_name(),
                    source,
                },
            })?;

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));

            return Err(OcError::Failed {
                code: output.status.code(),
                output: captured.trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }

    /// Verify that `oc` is installed and works by running `oc help`.
    pub async fn check(&self) -> Result<(), OcError> {
        match self.run(&["help"]).await {
            Ok(_) => Ok(()),
            Err(OcError::Failed { .. }) => Err(OcError::NonFunctional {
                program: self.program_name(),
            }),
            Err(err) => Err(err),
        }
    }

    /// Name of the user of the active session.
    pub async fn user(&self) -> Result<String, OcError> {
        self.run(&["whoami"]).await
    }

    /// Name of the active session context.
    pub async fn context(&self) -> Result<String, OcError> {
        self.run(&["whoami", "-c"]).await
    }

    /// Token of the active session.
    pub async fn token(&self) -> Result<String, OcError> {
        self.run(&["whoami", "-t"]).await
    }

    /// URL of the cluster the active session talks to.
    pub async fn server_url(&self) -> Result<Url, OcError> {
        let output = self
            .run(&[
                "config",
                "view",
                "--minify",
                "-o",
                "jsonpath={.clusters[*].cluster.server}",
            ])
            .await?;

        parse_server_url(&output)
    }
}

fn parse_server_url(output: &str) -> Result<Url, OcError> {
    let url = output.trim().trim_matches('"');

    Url::parse(url).map_err(|source| OcError::InvalidServerUrl {
        url: url.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.example.com:8443", "https://api.example.com:8443/")]
    #[case("\"https://api.example.com:8443\"\n", "https://api.example.com:8443/")]
    #[case("  https://127.0.0.1:8443  ", "https://127.0.0.1:8443/")]
    fn parses_server_url(#[case] output: &str, #[case] expected: &str) {
        assert_eq!(parse_server_url(output).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("\"\"")]
    #[case("not a url")]
    fn rejects_bad_server_url(#[case] output: &str) {
        assert!(matches!(
            parse_server_url(output),
            Err(OcError::InvalidServerUrl { .. })
        ));
    }

    #[tokio::test]
    async fn missing_program() {
        let oc = Oc::new("powershift-test-no-such-program");

        let err = oc.user().await.unwrap_err();

        assert!(matches!(err, OcError::NotInstalled { .. }));
        assert!(err.to_string().contains("Please install it to continue"));
        assert_eq!(err.exit_code(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn returns_trimmed_output() {
        // `echo` prints its arguments, which is enough to check the plumbing.
        let oc = Oc::new("echo");

        assert_eq!(oc.user().await.unwrap(), "whoami");
        assert_eq!(oc.context().await.unwrap(), "whoami -c");
        assert_eq!(oc.token().await.unwrap(), "whoami -t");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_carries_exit_code() {
        let err = Oc::new("false").user().await.unwrap_err();

        assert!(matches!(err, OcError::Failed { .. }));
        assert_eq!(err.exit_code(), Some(1));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_help_is_non_functional() {
        let err = Oc::new("false").check().await.unwrap_err();

        assert!(matches!(err, OcError::NonFunctional { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn working_help_passes_check() {
        Oc::new("true").check().await.unwrap();
    }
}
