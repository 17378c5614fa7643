//! Outcome bookkeeping for a build run.

use crate::builder::{
    process::{ToolExit, ToolInvocation},
    settings::{Arch, Platform},
};
use std::path::{Path, PathBuf};

/// Result of one attempted tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    /// Platform the invocation belongs to
    pub platform: Platform,
    /// Architecture the invocation targeted
    pub arch: Arch,
    /// What was run
    pub invocation: ToolInvocation,
    /// How it ended
    pub exit: ToolExit,
}

impl InvocationRecord {
    /// Whether the tool exited with code zero.
    pub fn succeeded(&self) -> bool {
        self.exit.success()
    }
}

/// Everything a build run attempted, in order.
#[derive(Debug, Clone)]
pub struct BuildReport {
    output_base: PathBuf,
    records: Vec<InvocationRecord>,
    skipped: Vec<(Platform, String)>,
}

impl BuildReport {
    /// Empty report for a run writing to `output_base`.
    pub fn new(output_base: impl Into<PathBuf>) -> Self {
        Self {
            output_base: output_base.into(),
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// `Builds/code/<name>/executables` of this run.
    pub fn output_base(&self) -> &Path {
        &self.output_base
    }

    pub(crate) fn record(&mut self, record: InvocationRecord) {
        self.records.push(record);
    }

    pub(crate) fn skip(&mut self, platform: Platform, reason: impl Into<String>) {
        self.skipped.push((platform, reason.into()));
    }

    /// Attempted invocations, in execution order.
    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    /// Attempted invocations for one platform.
    pub fn records_for(&self, platform: Platform) -> impl Iterator<Item = &InvocationRecord> {
        self.records.iter().filter(move |r| r.platform == platform)
    }

    /// Invocations that exited unsuccessfully but were tolerated.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationRecord> {
        self.records.iter().filter(|r| !r.succeeded())
    }

    /// Platforms whose phase was skipped, with the reason.
    pub fn skipped(&self) -> &[(Platform, String)] {
        &self.skipped
    }

    /// Whether `platform` was skipped.
    pub fn was_skipped(&self, platform: Platform) -> bool {
        self.skipped.iter().any(|(p, _)| *p == platform)
    }
}
