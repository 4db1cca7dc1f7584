use super::types::Engine;
use crate::error::{Error, Result};

impl Engine {
    /// Verify that the runtime binary is on PATH and its daemon answers.
    pub fn verify_connection(&self) -> Result<()> {
        if which::which(self.binary()).is_err() {
            return Err(Error::RuntimeUnavailable(format!(
                "`{}` not found on PATH, is it installed?",
                self.binary()
            )));
        }

        match self.exec(&["version", "--format", "{{.Server.Version}}"]) {
            Ok(_) => Ok(()),
            Err(Error::NonZeroExit { code, stderr, .. }) => Err(Error::RuntimeUnavailable(
                format!("daemon is not responding (exit {code}): {stderr}"),
            )),
            Err(Error::Spawn { source, .. }) => Err(Error::RuntimeUnavailable(source.to_string())),
            Err(other) => Err(other),
        }
    }
}

/// Returns `["--user", "uid:gid"]` on Unix so containers write bind-mounted
/// files as the invoking user. Empty on other platforms.
pub fn user_flags() -> Vec<String> {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() and getegid() have no preconditions and cannot fail.
        let uid = unsafe { libc::geteuid() };
        let gid = unsafe { libc::getegid() };
        vec!["--user".into(), format!("{uid}:{gid}")]
    }

    #[cfg(not(unix))]
    {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_reports_runtime_unavailable() {
        let engine = Engine::new("definitely-not-a-real-binary");
        let err = engine.verify_connection().unwrap_err();
        assert!(matches!(err, Error::RuntimeUnavailable(_)));
        assert!(err.to_string().contains("not found on PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn user_flags_returns_pair() {
        let flags = user_flags();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0], "--user");
        assert!(flags[1].contains(':'));
    }
}
