use std::path::PathBuf;

use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Load(LoadSummary),
    Generate(GenerateSummary),
    Snapshot(SnapshotSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct LoadSummary {
    /// Logical documents found under the input root.
    pub document_count: usize,
    /// Input files across all languages.
    pub input_count: usize,
    pub template_count: usize,
    pub label_count: usize,
    pub workbook_path: PathBuf,
    /// Input files shadowed or not accessible during the scan.
    pub skipped_files: usize,
}

#[derive(Debug)]
pub struct GenerateSummary {
    /// Workbook sheets processed.
    pub sheet_count: usize,
    pub output_count: usize,
    pub output_root: PathBuf,
}

#[derive(Debug)]
pub struct SnapshotSummary {
    pub file_count: usize,
    pub label_count: usize,
    pub properties_root: PathBuf,
    pub skipped_files: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running uixml commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Per-unit problems, sorted by file.
    pub issues: Vec<Issue>,
}
