use super::health::user_flags;
use super::images::first_line;
use super::types::Engine;
use crate::error::Result;
use crate::logger::{RunLogger, TracingLogger};
use crate::process;

impl Engine {
    /// Resolve the runtime-assigned id of a container by its name, or `None`
    /// when no such container exists.
    pub fn container_id(&self, name: &str) -> Result<Option<String>> {
        let filter = format!("name=^{name}$");
        let out = self.exec(&["ps", "-aq", "--filter", &filter])?;
        Ok(first_line(&out.stdout))
    }

    /// Force-remove a container by id, best effort.
    ///
    /// A `None` id is a no-op; failures are logged, never returned. Removal
    /// must not mask the primary result of the run that triggered it.
    pub fn remove_container(&self, id: Option<&str>, force: bool) {
        self.remove_with(id, force, &TracingLogger);
    }

    pub(crate) fn remove_with(&self, id: Option<&str>, force: bool, log: &dyn RunLogger) {
        let Some(id) = id else {
            log.debug("no container id resolved, skipping removal");
            return;
        };
        let mut args = vec!["rm"];
        if force {
            args.push("-f");
        }
        args.push(id);
        if let Err(e) = self.exec(&args) {
            log.error(&format!("failed to remove container {id}: {e}"));
        }
    }

    /// Open an interactive shell in an ephemeral container, with stdio
    /// inherited from the host terminal. Returns the shell's exit code.
    pub fn shell(&self, image: &str, command: Option<&str>) -> Result<Option<i32>> {
        let mut args: Vec<String> = vec!["run".into(), "--rm".into(), "-it".into()];
        args.extend(user_flags());
        args.push(image.to_string());
        args.push(command.unwrap_or("/bin/sh").to_string());
        process::interactive(self.binary(), &args)
    }
}
