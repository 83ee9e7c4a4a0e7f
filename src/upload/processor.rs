//! Upload processor
//!
//! Runs a batch of uploads through a linear pipeline: pre-hook, host error
//! check, size check, destination resolution, move, post-hook. The first
//! failure halts the rest of the batch. In strict mode the two validation
//! failures (host error code, size limit) are returned as errors; otherwise
//! they are only recorded and can be read back with [`UploadProcessor::error`].

use log::{debug, error, info, warn};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::UploadError;
use crate::upload::descriptor::{UploadDescriptor, UploadStatus};
use crate::upload::input::{UploadField, UploadInput, UploadRecord};
use crate::upload::options::{NameStrategy, UploadConfig};
use crate::utils::{format_size, unique_name};

/// Hook run before validation (may return a replacement descriptor) or
/// after acceptance (return value ignored).
pub type UploadHook =
    Box<dyn Fn(&UploadDescriptor, &UploadProcessor) -> Option<UploadDescriptor>>;

pub struct UploadProcessor {
    config: UploadConfig,
    pre_hook: Option<UploadHook>,
    post_hook: Option<UploadHook>,
    accepted: Vec<UploadDescriptor>,
    halted: bool,
    error: Option<String>,
}

impl UploadProcessor {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            pre_hook: None,
            post_hook: None,
            accepted: Vec::new(),
            halted: false,
            error: None,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Sets the hook run first for each upload. It runs before the halt check,
    /// so after a failure it still sees the next upload once before the batch
    /// stops. Returning a descriptor with a non-zero error code halts the batch.
    pub fn set_pre_hook(&mut self, hook: UploadHook) {
        self.pre_hook = Some(hook);
    }

    pub fn set_post_hook(&mut self, hook: UploadHook) {
        self.post_hook = Some(hook);
    }

    // --------------------
    // Batch state
    // --------------------

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Uploads accepted by the most recent batch, in processing order.
    pub fn accepted_files(&self) -> &[UploadDescriptor] {
        &self.accepted
    }

    fn reset(&mut self) {
        self.accepted.clear();
        self.halted = false;
        self.error = None;
    }

    // --------------------
    // Processing
    // --------------------

    /// Processes every upload of `field`.
    ///
    /// Returns the accepted uploads. Items accepted before a strict-mode
    /// failure stay available through [`UploadProcessor::accepted_files`].
    pub fn process(
        &mut self,
        input: &UploadInput,
        field: &str,
    ) -> Result<&[UploadDescriptor], UploadError> {
        self.reset();

        let descriptors: Vec<UploadDescriptor> = match input.get(field) {
            Some(UploadField::Single(record)) => vec![self.ingest(record, None)],
            Some(UploadField::Multiple(records)) => records
                .iter()
                .enumerate()
                .map(|(index, record)| self.ingest(record, Some(index)))
                .collect(),
            None => {
                self.fail(UploadError::MissingField(field.to_string()))?;
                return Ok(self.accepted.as_slice());
            }
        };

        info!("Processing {} upload(s) for field {}", descriptors.len(), field);

        for descriptor in descriptors {
            let descriptor = self.run_pre_hook(descriptor);
            if self.halted {
                debug!("Batch halted, skipping {}", descriptor.original_name);
                break;
            }
            self.process_one(descriptor)?;
        }

        info!(
            "Finished field {}: {} accepted, halted: {}",
            field,
            self.accepted.len(),
            self.halted
        );
        Ok(self.accepted.as_slice())
    }

    /// Builds a descriptor and assigns its target name.
    fn ingest(&self, record: &UploadRecord, index: Option<usize>) -> UploadDescriptor {
        let mut descriptor = UploadDescriptor::from_record(record, index);
        let stem = std::mem::take(&mut descriptor.new_name);

        descriptor.new_name = match (&self.config.naming, index) {
            (NameStrategy::Original, _) if stem.is_empty() => unique_name(),
            (NameStrategy::Original, _) => stem,
            (NameStrategy::Generated, _) => unique_name(),
            (NameStrategy::Fixed(name), Some(index)) => format!("{}_{}", name, index),
            (NameStrategy::Fixed(name), None) => name.clone(),
        };

        descriptor
    }

    fn run_pre_hook(&self, descriptor: UploadDescriptor) -> UploadDescriptor {
        match self
            .pre_hook
            .as_ref()
            .and_then(|hook| hook(&descriptor, self))
        {
            Some(replacement) => {
                debug!(
                    "Pre-hook replaced descriptor for {}",
                    descriptor.original_name
                );
                replacement
            }
            None => descriptor,
        }
    }

    fn process_one(&mut self, mut descriptor: UploadDescriptor) -> Result<(), UploadError> {
        if !descriptor.error_code.is_ok() {
            return self.fail(UploadError::Fatal(format!(
                "Upload of {} failed: {}",
                descriptor.original_name, descriptor.error_code
            )));
        }

        if let Some(maximum) = self.config.max_file_size {
            if descriptor.size > maximum {
                return self.fail(UploadError::Fatal(format!(
                    "{} is {}, which exceeds the maximum upload size of {}",
                    descriptor.original_name,
                    format_size(descriptor.size),
                    format_size(maximum)
                )));
            }
        }

        descriptor.destination_folder = self
            .config
            .destination_for(&descriptor.declared_type)
            .to_path_buf();
        descriptor.new_location = descriptor.destination_folder.join(descriptor.file_name());

        if let Err(e) = move_file(&descriptor.temp_location, &descriptor.new_location) {
            error!(
                "Failed to move {} to {}: {}",
                descriptor.temp_location.display(),
                descriptor.new_location.display(),
                e
            );
            self.halted = true;
            self.error = Some(format!(
                "Could not move {} into {}: {}",
                descriptor.original_name,
                descriptor.destination_folder.display(),
                e
            ));
            return Ok(());
        }

        descriptor.status = UploadStatus::Success;
        info!(
            "Accepted upload {} -> {} ({})",
            descriptor.original_name,
            descriptor.new_location.display(),
            format_size(descriptor.size)
        );
        self.accepted.push(descriptor);

        let this: &UploadProcessor = self;
        if let (Some(hook), Some(accepted)) = (this.post_hook.as_ref(), this.accepted.last()) {
            let _ = hook(accepted, this);
        }

        Ok(())
    }

    /// Halts the batch and records the failure; strict mode also returns it.
    fn fail(&mut self, err: UploadError) -> Result<(), UploadError> {
        let message = err.message();
        warn!("Upload batch halted: {}", message);
        self.halted = true;
        self.error = Some(message);

        if self.config.strict {
            Err(err)
        } else {
            Ok(())
        }
    }
}

/// Moves a file, falling back to copy + remove across filesystems. An
/// existing target is never replaced.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Cross-device move of {}, copying instead", from.display());
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}
