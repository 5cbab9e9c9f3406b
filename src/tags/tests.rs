use std::fs;
use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use lofty::tag::{ItemKey, ItemValue, Tag, TagItem, TagType};

use super::{FormatHandler, apply_record, write};
use crate::error::TagWriteError;
use crate::library::{ContainerFormat, FileTask, MetadataRecord};
use crate::overrides::OverrideStore;

const ALL_FORMATS: [ContainerFormat; 3] = [
    ContainerFormat::Mpeg,
    ContainerFormat::Flac,
    ContainerFormat::Mp4,
];

fn full_record() -> MetadataRecord {
    MetadataRecord {
        artist: Some("Imogen Heap".into()),
        album: Some("Speak for Yourself".into()),
        title: Some("Hide and Seek".into()),
        composer: Some("Imogen Heap (corrected)".into()),
        album_artist: Some("Imogen Heap (corrected)".into()),
        genre: Some("Electronic".into()),
        year: Some(2005),
        track: None,
    }
}

/// `fLaC` magic plus a lone STREAMINFO block (44.1 kHz, stereo, 16-bit, no samples).
fn minimal_flac() -> Vec<u8> {
    let mut bytes = b"fLaC".to_vec();
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
    bytes.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]);
    bytes.extend_from_slice(&[0; 6]);
    bytes.extend_from_slice(&[0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0; 16]);
    bytes
}

/// An ID3v2.4 tag holding one PRIV frame, followed by silent MPEG-1 Layer III
/// frames (128 kbps, 44.1 kHz, 417 bytes each).
fn minimal_mp3() -> Vec<u8> {
    let mut priv_body = b"roon-tagger.test\0".to_vec();
    priv_body.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);

    let mut frame = b"PRIV".to_vec();
    frame.extend_from_slice(&[0, 0, 0, priv_body.len() as u8]);
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&priv_body);

    let mut bytes = b"ID3".to_vec();
    bytes.extend_from_slice(&[0x04, 0x00, 0x00]);
    bytes.extend_from_slice(&[0, 0, 0, frame.len() as u8]);
    bytes.extend_from_slice(&frame);

    for _ in 0..20 {
        let mut audio = vec![0u8; 417];
        audio[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        bytes.extend_from_slice(&audio);
    }
    bytes
}

fn occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|w| *w == needle)
        .count()
}

fn task_for(path: &Path) -> FileTask {
    FileTask::build(path, &OverrideStore::default()).unwrap()
}

fn read_tag(path: &Path, tag_type: TagType) -> Tag {
    let tagged = lofty::read_from_path(path).unwrap();
    tagged.tag(tag_type).cloned().unwrap()
}

#[test]
fn handlers_use_native_tag_types() {
    assert_eq!(
        FormatHandler::for_format(ContainerFormat::Mpeg).tag_type,
        TagType::Id3v2
    );
    assert_eq!(
        FormatHandler::for_format(ContainerFormat::Flac).tag_type,
        TagType::VorbisComments
    );
    assert_eq!(
        FormatHandler::for_format(ContainerFormat::Mp4).tag_type,
        TagType::Mp4Ilst
    );
    assert_eq!(
        FormatHandler::for_format(ContainerFormat::Mpeg).composer.native,
        "TCOM"
    );
    assert_eq!(
        FormatHandler::for_format(ContainerFormat::Mp4).album_artist.native,
        "aART"
    );
}

// MP4 is only exercised in memory: lofty opens an MP4 file only with a full
// moov/trak/stsd hierarchy, which is too large to hand-build here.
#[test]
fn repeated_application_keeps_single_composer_and_album_artist() {
    for format in ALL_FORMATS {
        let handler = FormatHandler::for_format(format);
        let mut tag = Tag::new(handler.tag_type);

        apply_record(&mut tag, handler, &full_record());
        apply_record(&mut tag, handler, &full_record());

        assert_eq!(tag.get_strings(ItemKey::Composer).count(), 1, "{format:?}");
        assert_eq!(
            tag.get_strings(ItemKey::AlbumArtist).count(),
            1,
            "{format:?}"
        );
        assert_eq!(
            tag.get_string(ItemKey::Composer),
            Some("Imogen Heap (corrected)"),
            "{format:?}"
        );
        assert_eq!(tag.artist().as_deref(), Some("Imogen Heap"), "{format:?}");
        assert_eq!(tag.title().as_deref(), Some("Hide and Seek"), "{format:?}");
        assert_eq!(tag.genre().as_deref(), Some("Electronic"), "{format:?}");
        assert_eq!(
            tag.get_string(ItemKey::RecordingDate),
            Some("2005"),
            "{format:?}"
        );
    }
}

#[test]
fn pre_existing_duplicates_are_collapsed() {
    let handler = FormatHandler::for_format(ContainerFormat::Flac);
    let mut tag = Tag::new(handler.tag_type);
    for old in ["Old One", "Old Two"] {
        tag.push(TagItem::new(ItemKey::Composer, ItemValue::Text(old.into())));
    }
    assert_eq!(tag.get_strings(ItemKey::Composer).count(), 2);

    let record = MetadataRecord {
        composer: Some("New".into()),
        ..MetadataRecord::default()
    };
    apply_record(&mut tag, handler, &record);

    let composers: Vec<&str> = tag.get_strings(ItemKey::Composer).collect();
    assert_eq!(composers, vec!["New"]);
}

#[test]
fn absent_fields_leave_existing_values_untouched() {
    for format in ALL_FORMATS {
        let handler = FormatHandler::for_format(format);
        let mut tag = Tag::new(handler.tag_type);
        tag.set_title("Existing Title".to_string());
        tag.set_artist("Existing Artist".to_string());
        tag.insert_text(ItemKey::AlbumArtist, "Existing Album Artist".to_string());

        let record = MetadataRecord {
            album: Some("New Album".into()),
            ..MetadataRecord::default()
        };
        apply_record(&mut tag, handler, &record);

        assert_eq!(tag.album().as_deref(), Some("New Album"), "{format:?}");
        assert_eq!(tag.title().as_deref(), Some("Existing Title"), "{format:?}");
        assert_eq!(
            tag.artist().as_deref(),
            Some("Existing Artist"),
            "{format:?}"
        );
        assert_eq!(
            tag.get_string(ItemKey::AlbumArtist),
            Some("Existing Album Artist"),
            "{format:?}"
        );
    }
}

#[test]
fn write_reports_open_failure_for_corrupt_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.flac");
    fs::write(&path, b"definitely not flac").unwrap();

    let err = write(&task_for(&path), &full_record()).unwrap_err();
    assert!(matches!(err, TagWriteError::Open { .. }));
    assert_eq!(fs::read(&path).unwrap(), b"definitely not flac");
}

#[test]
fn flac_write_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("03 - Hide and Seek.flac");
    fs::write(&path, minimal_flac()).unwrap();
    let task = task_for(&path);

    write(&task, &full_record()).unwrap();
    write(&task, &full_record()).unwrap();

    let tag = read_tag(&path, TagType::VorbisComments);
    assert_eq!(tag.get_strings(ItemKey::Composer).count(), 1);
    assert_eq!(tag.get_strings(ItemKey::AlbumArtist).count(), 1);
    assert_eq!(
        tag.get_string(ItemKey::Composer),
        Some("Imogen Heap (corrected)")
    );
    assert_eq!(tag.title().as_deref(), Some("Hide and Seek"));

    // A later, sparser record must not clear what the first one wrote.
    let sparse = MetadataRecord {
        composer: Some("Someone Else".into()),
        ..MetadataRecord::default()
    };
    write(&task, &sparse).unwrap();

    let tag = read_tag(&path, TagType::VorbisComments);
    assert_eq!(tag.get_string(ItemKey::Composer), Some("Someone Else"));
    assert_eq!(tag.get_strings(ItemKey::Composer).count(), 1);
    assert_eq!(tag.title().as_deref(), Some("Hide and Seek"));
    assert_eq!(tag.artist().as_deref(), Some("Imogen Heap"));
}

#[test]
fn mp3_write_is_idempotent_and_keeps_unrelated_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("03 - Hide and Seek.mp3");
    fs::write(&path, minimal_mp3()).unwrap();
    let task = task_for(&path);
    assert_eq!(task.format, ContainerFormat::Mpeg);

    write(&task, &full_record()).unwrap();
    write(&task, &full_record()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(occurrences(&bytes, b"TCOM"), 1);
    assert_eq!(occurrences(&bytes, b"TPE2"), 1);
    assert_eq!(occurrences(&bytes, b"PRIV"), 1);
    assert_eq!(occurrences(&bytes, b"roon-tagger.test"), 1);

    let tag = read_tag(&path, TagType::Id3v2);
    assert_eq!(
        tag.get_string(ItemKey::Composer),
        Some("Imogen Heap (corrected)")
    );
    assert_eq!(
        tag.get_string(ItemKey::AlbumArtist),
        Some("Imogen Heap (corrected)")
    );
    assert_eq!(tag.title().as_deref(), Some("Hide and Seek"));
    assert_eq!(tag.genre().as_deref(), Some("Electronic"));

    let sparse = MetadataRecord {
        album_artist: Some("Someone Else".into()),
        ..MetadataRecord::default()
    };
    write(&task, &sparse).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(occurrences(&bytes, b"TPE2"), 1);
    assert_eq!(occurrences(&bytes, b"PRIV"), 1);
    let tag = read_tag(&path, TagType::Id3v2);
    assert_eq!(tag.get_string(ItemKey::AlbumArtist), Some("Someone Else"));
    assert_eq!(
        tag.get_string(ItemKey::Composer),
        Some("Imogen Heap (corrected)")
    );
    assert_eq!(tag.artist().as_deref(), Some("Imogen Heap"));
}
