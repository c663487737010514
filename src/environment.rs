use crate::dir::HomeDir;
use std::fmt;

/// Shell syntax families `client env` can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sh,
    Bash,
    PowerShell,
    Cmd,
}

impl Dialect {
    /// `None` for shells we do not know how to configure.
    pub fn parse(name: &str) -> Option<Dialect> {
        match name.to_ascii_lowercase().as_str() {
            "sh" => Some(Dialect::Sh),
            "bash" => Some(Dialect::Bash),
            "powershell" => Some(Dialect::PowerShell),
            "cmd" => Some(Dialect::Cmd),
            _ => None,
        }
    }

    pub fn platform_default() -> Dialect {
        if cfg!(windows) {
            Dialect::PowerShell
        } else {
            Dialect::Sh
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Sh => "sh",
            Dialect::Bash => "bash",
            Dialect::PowerShell => "powershell",
            Dialect::Cmd => "cmd",
        })
    }
}

/// Render the commands that put the `oc` binary for `version` (or the
/// default published one) first on `PATH`, followed by a comment showing how
/// to evaluate the output directly.
pub fn render_environment(home: &HomeDir, version: Option<&str>, dialect: Dialect) -> Vec<String> {
    let bin_dir = home.bin_dir(version);
    let bin_dir = bin_dir.display();

    let mut invocation = String::from("powershift client env");
    if let Some(version) = version {
        invocation.push(' ');
        invocation.push_str(version);
    }
    invocation.push_str(&format!(" --shell {dialect}"));

    match dialect {
        Dialect::Sh | Dialect::Bash => vec![
            format!("export PATH=\"{bin_dir}:$PATH\""),
            "# Run this command to configure your shell:".to_owned(),
            format!("# eval \"$({invocation})\""),
        ],
        Dialect::PowerShell => vec![
            format!("$Env:PATH = \"{bin_dir};$Env:PATH\""),
            "# Run this command to configure your shell:".to_owned(),
            format!("# & {invocation} | Invoke-Expression"),
        ],
        Dialect::Cmd => vec![
            format!("SET PATH={bin_dir};%PATH%"),
            "REM Run this command to configure your shell:".to_owned(),
            format!("REM     @FOR /f \"tokens=*\" %i IN ('{invocation}') DO @%i"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    fn home() -> HomeDir {
        HomeDir::new(Path::new("/home/dev/.powershift"))
    }

    #[test]
    fn unversioned_bash() {
        let lines = render_environment(&home(), None, Dialect::Bash);

        assert_eq!(
            lines,
            vec![
                format!(
                    "export PATH=\"{}:$PATH\"",
                    home().tools_dir().display()
                ),
                "# Run this command to configure your shell:".to_owned(),
                "# eval \"$(powershift client env --shell bash)\"".to_owned(),
            ]
        );
    }

    #[test]
    fn versioned_bash() {
        let lines = render_environment(&home(), Some("v1.5.1"), Dialect::Bash);

        assert_eq!(
            lines[0],
            format!(
                "export PATH=\"{}:$PATH\"",
                home().version_dir("v1.5.1").display()
            )
        );
        assert_eq!(
            lines[2],
            "# eval \"$(powershift client env v1.5.1 --shell bash)\""
        );
    }

    #[test]
    fn powershell() {
        let lines = render_environment(&home(), Some("v1.5.1"), Dialect::PowerShell);

        assert_eq!(
            lines[0],
            format!(
                "$Env:PATH = \"{};$Env:PATH\"",
                home().version_dir("v1.5.1").display()
            )
        );
        assert_eq!(
            lines[2],
            "# & powershift client env v1.5.1 --shell powershell | Invoke-Expression"
        );
    }

    #[test]
    fn cmd() {
        let lines = render_environment(&home(), None, Dialect::Cmd);

        assert_eq!(
            lines[0],
            format!("SET PATH={};%PATH%", home().tools_dir().display())
        );
        assert!(lines[1..].iter().all(|line| line.starts_with("REM ")));
        assert!(lines[2].contains("('powershift client env --shell cmd')"));
    }

    #[rstest]
    #[case("sh", Some(Dialect::Sh))]
    #[case("bash", Some(Dialect::Bash))]
    #[case("PowerShell", Some(Dialect::PowerShell))]
    #[case("cmd", Some(Dialect::Cmd))]
    #[case("fish", None)]
    #[case("", None)]
    fn parses_dialect(#[case] name: &str, #[case] expected: Option<Dialect>) {
        assert_eq!(Dialect::parse(name), expected);
    }

    #[test]
    fn platform_default() {
        let expected = if cfg!(windows) {
            Dialect::PowerShell
        } else {
            Dialect::Sh
        };

        assert_eq!(Dialect::platform_default(), expected);
    }
}
