//! Ingestion options.

use serde::{Deserialize, Serialize};

/// Label expected in the third column of the EEG section header.
pub const DEFAULT_EEG_HEADER_LABEL: &str = "Protocol Title";

/// Extension forced onto EEG file paths.
pub const DEFAULT_EEG_EXTENSION: &str = "EEG";

/// Hierarchy layout of the export.
///
/// The two layouts make incompatible assumptions about the same rows, so the
/// layout is chosen explicitly for a given export version and never guessed
/// from the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportLayout {
    /// EEG sections at outline level 1, video sections at level 2.
    #[default]
    Split,
    /// One recording section per block at level 2 or deeper, read as video.
    Combined,
}

/// Options controlling how an export is decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub layout: ExportLayout,
    /// Label that identifies a genuine EEG section header.
    pub eeg_header_label: String,
    /// Extension given to EEG paths (without the dot).
    pub eeg_extension: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            layout: ExportLayout::default(),
            eeg_header_label: DEFAULT_EEG_HEADER_LABEL.to_string(),
            eeg_extension: DEFAULT_EEG_EXTENSION.to_string(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_layout(mut self, layout: ExportLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_eeg_header_label(mut self, label: impl Into<String>) -> Self {
        self.eeg_header_label = label.into();
        self
    }

    #[must_use]
    pub fn with_eeg_extension(mut self, extension: impl Into<String>) -> Self {
        self.eeg_extension = extension.into();
        self
    }
}
