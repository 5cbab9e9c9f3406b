use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::overrides::{OverrideRecord, OverrideStore};

/// Metadata resolved for one file.
///
/// A `Some` field is authoritative and gets written; a `None` field leaves
/// whatever the file already carries untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub composer: Option<String>,
    pub album_artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub track: Option<u32>,
}

impl MetadataRecord {
    /// Names of the fields that will be written.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let text = [
            ("artist", &self.artist),
            ("album", &self.album),
            ("title", &self.title),
            ("composer", &self.composer),
            ("album_artist", &self.album_artist),
            ("genre", &self.genre),
        ];
        for (name, value) in text {
            if value.is_some() {
                fields.push(name);
            }
        }
        if self.year.is_some() {
            fields.push("year");
        }
        if self.track.is_some() {
            fields.push("track");
        }
        fields
    }
}

/// On-disk tag container, derived from the file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContainerFormat {
    /// MPEG audio carrying ID3v2 frames.
    Mpeg,
    /// FLAC carrying Vorbis comments.
    Flac,
    /// MPEG-4 audio carrying an `ilst` item list.
    Mp4,
}

impl ContainerFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp3" => Some(Self::Mpeg),
            "flac" => Some(Self::Flac),
            "m4a" | "mp4" | "m4b" => Some(Self::Mp4),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mpeg => "mp3",
            Self::Flac => "flac",
            Self::Mp4 => "mp4",
        }
    }
}

/// One unit of pipeline work.
#[derive(Debug, Clone)]
pub struct FileTask {
    pub path: PathBuf,
    pub format: ContainerFormat,
    /// Override applying to the file's album directory, if any.
    pub override_record: Option<OverrideRecord>,
}

impl FileTask {
    /// Check the file is readable and writable in a known container, and
    /// attach its directory-scoped override.
    pub fn build(path: &Path, overrides: &OverrideStore) -> Result<Self, PipelineError> {
        std::fs::File::open(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ContainerFormat::from_path(path)
            .ok_or_else(|| PipelineError::UnsupportedFormat(path.to_path_buf()))?;

        let override_record = album_dir_name(path)
            .and_then(|key| overrides.resolve(&key))
            .cloned();

        Ok(Self {
            path: path.to_path_buf(),
            format,
            override_record,
        })
    }
}

/// Name of the directory directly containing `path`.
pub fn album_dir_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
}
