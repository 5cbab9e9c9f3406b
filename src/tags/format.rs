use lofty::tag::{ItemKey, TagType};

use crate::library::ContainerFormat;

/// A field with no slot in lofty's `Accessor`.
///
/// lofty maps `key` to the container's own name on save: `TCOM`/`TPE2`
/// frames in ID3v2, `COMPOSER`/`ALBUMARTIST` in Vorbis comments and
/// `©wrt`/`aART` atoms in an MP4 `ilst`. `native` is that on-disk name,
/// kept for log output.
#[derive(Debug, Clone)]
pub struct NativeField {
    pub key: ItemKey,
    pub native: &'static str,
}

/// How one container stores its tags.
#[derive(Debug)]
pub struct FormatHandler {
    pub tag_type: TagType,
    pub tag_name: &'static str,
    pub composer: NativeField,
    pub album_artist: NativeField,
}

static MPEG: FormatHandler = FormatHandler {
    tag_type: TagType::Id3v2,
    tag_name: "ID3v2",
    composer: NativeField {
        key: ItemKey::Composer,
        native: "TCOM",
    },
    album_artist: NativeField {
        key: ItemKey::AlbumArtist,
        native: "TPE2",
    },
};

static FLAC: FormatHandler = FormatHandler {
    tag_type: TagType::VorbisComments,
    tag_name: "Vorbis comments",
    composer: NativeField {
        key: ItemKey::Composer,
        native: "COMPOSER",
    },
    album_artist: NativeField {
        key: ItemKey::AlbumArtist,
        native: "ALBUMARTIST",
    },
};

static MP4: FormatHandler = FormatHandler {
    tag_type: TagType::Mp4Ilst,
    tag_name: "MP4 ilst",
    composer: NativeField {
        key: ItemKey::Composer,
        native: "\u{a9}wrt",
    },
    album_artist: NativeField {
        key: ItemKey::AlbumArtist,
        native: "aART",
    },
};

impl FormatHandler {
    pub fn for_format(format: ContainerFormat) -> &'static FormatHandler {
        match format {
            ContainerFormat::Mpeg => &MPEG,
            ContainerFormat::Flac => &FLAC,
            ContainerFormat::Mp4 => &MP4,
        }
    }
}
