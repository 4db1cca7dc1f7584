use std::path::Path;

use super::types::{Engine, to_owned};
use crate::error::{Error, Result};

impl Engine {
    /// Pull an image from its registry.
    pub fn pull(&self, image: &str) -> Result<()> {
        if image.is_empty() {
            return Err(Error::EmptyField("image reference"));
        }
        self.exec(&["pull", image]).map(|_| ())
    }

    /// Build an image from a context directory, tagging it `name` or
    /// `name:tag`.
    pub fn build(&self, path: &Path, name: &str, tag: Option<&str>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyField("image name"));
        }
        let tagged = match tag {
            Some(tag) => format!("{name}:{tag}"),
            None => name.to_string(),
        };
        let context = path.display().to_string();
        self.exec(&["build", "-t", &tagged, &context]).map(|_| ())
    }

    /// Load an image from a tar archive.
    pub fn load_image(&self, path: &Path) -> Result<()> {
        let archive = path.display().to_string();
        self.exec(&["load", "-i", &archive]).map(|_| ())
    }

    /// Whether an image with the given reference exists locally.
    pub fn image_exists(&self, name: &str) -> Result<bool> {
        let out = self.run_try_capture(&to_owned(&["image", "inspect", name]))?;
        Ok(out.success())
    }

    /// Local id of an image, or `None` when it is not present.
    pub fn image_id(&self, name: &str) -> Result<Option<String>> {
        let out = self.exec(&["images", "-q", name])?;
        Ok(first_line(&out.stdout))
    }

    /// Raw `inspect` output for an image or container reference.
    pub fn inspect(&self, target: &str) -> Result<serde_json::Value> {
        let out = self.exec(&["inspect", target])?;
        serde_json::from_str(&out.stdout).map_err(|source| Error::Parse {
            command: format!("{} inspect {target}", self.binary()),
            source,
        })
    }
}

pub(crate) fn first_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
