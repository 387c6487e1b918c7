use std::io::Write;

use muxingest_model::{IngestCandidate, WALL_CLOCK_FORMAT};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One file the downloader should fetch.
///
/// `fileID` is the archive identity the workflow monitor tracks the file
/// under; `youSeeFilename` is the name of the file on the external archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadEntry {
    #[serde(rename = "fileID")]
    pub file_id: String,
    #[serde(rename = "youSeeFilename")]
    pub file_name: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(rename = "youseeChannelID")]
    pub mapped_channel_id: String,
    #[serde(rename = "sbChannelID")]
    pub source_channel_id: String,
}

impl From<&IngestCandidate> for DownloadEntry {
    fn from(candidate: &IngestCandidate) -> Self {
        Self {
            file_id: candidate.archive_file_id(),
            file_name: candidate.file_name().to_string(),
            start_time: candidate
                .start_time()
                .format(WALL_CLOCK_FORMAT)
                .to_string(),
            end_time: candidate.end_time().format(WALL_CLOCK_FORMAT).to_string(),
            mapped_channel_id: candidate.mapped_channel_id().to_string(),
            source_channel_id: candidate.source_channel_id().to_string(),
        }
    }
}

/// The `{"downloads": [...]}` document handed to the downloader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadManifest {
    pub downloads: Vec<DownloadEntry>,
}

impl DownloadManifest {
    /// Entries in the order given.
    pub fn from_candidates(candidates: &[IngestCandidate]) -> Self {
        Self {
            downloads: candidates.iter().map(DownloadEntry::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.downloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.downloads.is_empty()
    }

    /// Pretty JSON followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
