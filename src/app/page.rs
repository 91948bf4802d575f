use std::collections::BTreeMap;

use crate::app::BootstrapError;
use crate::views::ViewId;

/// The hosting document: a set of named elements an application can
/// attach to. Each element takes at most one application.
#[derive(Debug, Clone, Default)]
pub struct Page {
    mount_points: BTreeMap<String, Option<ViewId>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the given mount elements, all empty.
    pub fn with_mount_points<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mount_points: names.into_iter().map(|n| (n.into(), None)).collect(),
        }
    }

    pub fn add_mount_point(&mut self, name: &str) {
        self.mount_points.entry(name.to_string()).or_insert(None);
    }

    /// Root view attached to `name`, if any.
    pub fn mounted(&self, name: &str) -> Option<ViewId> {
        self.mount_points.get(name).copied().flatten()
    }

    pub(crate) fn attach(&mut self, name: &str, root: ViewId) -> Result<(), BootstrapError> {
        let slot = self
            .mount_points
            .get_mut(name)
            .ok_or_else(|| BootstrapError::MountPointMissing {
                name: name.to_string(),
            })?;

        if slot.is_some() {
            return Err(BootstrapError::AlreadyMounted {
                name: name.to_string(),
            });
        }
        *slot = Some(root);
        Ok(())
    }
}
