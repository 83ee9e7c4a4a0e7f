//! Permission maker
//!
//! Changes ownership, group and mode of anything exposing a path through
//! [`Permittable`].

use log::{debug, error, info, warn};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PermissionError;
use crate::permission::accounts::{resolve_group_id, resolve_user_id};

/// A filesystem target whose permissions can be changed.
pub trait Permittable {
    fn permitted_path(&self) -> &Path;
}

impl Permittable for Path {
    fn permitted_path(&self) -> &Path {
        self
    }
}

impl Permittable for PathBuf {
    fn permitted_path(&self) -> &Path {
        self.as_path()
    }
}

/// What to do when a group change fails.
///
/// `Ignore` keeps the historical behaviour: the failure is logged and the
/// call still reports success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupFailurePolicy {
    #[default]
    Ignore,
    Report,
}

#[derive(Debug, Clone, Default)]
pub struct PermissionMaker {
    group_failure_policy: GroupFailurePolicy,
}

impl PermissionMaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_failure_policy(policy: GroupFailurePolicy) -> Self {
        Self {
            group_failure_policy: policy,
        }
    }

    pub fn group_failure_policy(&self) -> GroupFailurePolicy {
        self.group_failure_policy
    }

    /// Changes a file or directory's group.
    ///
    /// Returns `Ok(false)` when the platform has no group facility.
    pub fn change_group<P: Permittable + ?Sized>(
        &self,
        target: &P,
        group: &str,
    ) -> Result<bool, PermissionError> {
        if !facility_available() {
            debug!("chgrp is not available on this platform");
            return Ok(false);
        }

        let path = target.permitted_path();
        let result = resolve_group_id(group)
            .ok_or_else(|| PermissionError::UnknownGroup(group.to_string()))
            .and_then(|gid| {
                sys::chown(path, None, Some(gid)).map_err(|source| PermissionError::ChangeGroup {
                    path: path.display().to_string(),
                    group: group.to_string(),
                    source,
                })
            });

        match result {
            Ok(()) => {
                info!("Changed group of {} to {}", path.display(), group);
                Ok(true)
            }
            Err(e) => match self.group_failure_policy {
                GroupFailurePolicy::Ignore => {
                    warn!("Ignoring failed group change: {}", e);
                    Ok(true)
                }
                GroupFailurePolicy::Report => {
                    error!("{}", e);
                    Err(e)
                }
            },
        }
    }

    /// Changes a file or directory's owner.
    ///
    /// Returns `Ok(false)` when the platform has no ownership facility.
    pub fn change_owner<P: Permittable + ?Sized>(
        &self,
        target: &P,
        owner: &str,
    ) -> Result<bool, PermissionError> {
        if !facility_available() {
            debug!("chown is not available on this platform");
            return Ok(false);
        }

        let path = target.permitted_path();
        let uid =
            resolve_user_id(owner).ok_or_else(|| PermissionError::UnknownUser(owner.to_string()))?;

        sys::chown(path, Some(uid), None).map_err(|source| {
            error!("Failed to change ownership of {}: {}", path.display(), source);
            PermissionError::ChangeOwner {
                path: path.display().to_string(),
                owner: owner.to_string(),
                source,
            }
        })?;

        info!("Changed ownership of {} to {}", path.display(), owner);
        Ok(true)
    }

    /// Changes a file or directory's mode (e.g. `0o644`).
    ///
    /// Returns `Ok(false)` when the platform has no mode facility.
    pub fn change_mode<P: Permittable + ?Sized>(
        &self,
        target: &P,
        mode: u32,
    ) -> Result<bool, PermissionError> {
        if !facility_available() {
            debug!("chmod is not available on this platform");
            return Ok(false);
        }

        let path = target.permitted_path();
        sys::chmod(path, mode).map_err(|source| {
            error!("Failed to change mode of {}: {}", path.display(), source);
            PermissionError::ChangeMode {
                path: path.display().to_string(),
                mode,
                source,
            }
        })?;

        info!("Changed mode of {} to {:o}", path.display(), mode);
        Ok(true)
    }
}

fn facility_available() -> bool {
    cfg!(unix)
}

#[cfg(unix)]
mod sys {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    pub fn chown(path: &Path, uid: Option<u32>, gid: Option<u32>) -> io::Result<()> {
        std::os::unix::fs::chown(path, uid, gid)
    }

    pub fn chmod(path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }
}

#[cfg(not(unix))]
mod sys {
    use super::*;

    pub fn chown(_path: &Path, _uid: Option<u32>, _gid: Option<u32>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "chown is not supported"))
    }

    pub fn chmod(_path: &Path, _mode: u32) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "chmod is not supported"))
    }
}
