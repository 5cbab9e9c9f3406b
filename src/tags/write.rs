//! Write a resolved [`MetadataRecord`] into a file's native tag container.

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use lofty::tag::{ItemKey, ItemValue, Tag, TagItem};
use tracing::debug;

use crate::error::TagWriteError;
use crate::library::{FileTask, MetadataRecord};

use super::format::{FormatHandler, NativeField};

/// Basic fields go through the generic accessors. Absent fields are skipped,
/// so whatever the file already holds for them survives.
fn apply_basic(tag: &mut Tag, record: &MetadataRecord) {
    if let Some(v) = &record.artist {
        tag.set_artist(v.clone());
    }
    if let Some(v) = &record.album {
        tag.set_album(v.clone());
    }
    if let Some(v) = &record.title {
        tag.set_title(v.clone());
    }
    if let Some(v) = &record.genre {
        tag.set_genre(v.clone());
    }
    if let Some(n) = record.track {
        tag.set_track(n);
    }
    if let Some(y) = record.year {
        tag.insert_text(ItemKey::RecordingDate, y.to_string());
    }
}

/// Drop every existing item for the field, then add exactly one.
fn replace_native(tag: &mut Tag, field: &NativeField, value: &str) {
    tag.remove_key(field.key.clone());
    let pushed = tag.push(TagItem::new(
        field.key.clone(),
        ItemValue::Text(value.to_string()),
    ));
    debug!(field = field.native, pushed, "extended field written");
}

fn apply_extended(tag: &mut Tag, handler: &FormatHandler, record: &MetadataRecord) {
    if let Some(v) = &record.composer {
        replace_native(tag, &handler.composer, v);
    }
    if let Some(v) = &record.album_artist {
        replace_native(tag, &handler.album_artist, v);
    }
}

/// Apply `record` to an in-memory tag of the handler's type.
pub fn apply_record(tag: &mut Tag, handler: &FormatHandler, record: &MetadataRecord) {
    apply_basic(tag, record);
    apply_extended(tag, handler, record);
}

/// Set the fields on the task's native tag and save the container.
pub fn write(task: &FileTask, record: &MetadataRecord) -> Result<(), TagWriteError> {
    let path = task.path.as_path();
    let handler = FormatHandler::for_format(task.format);

    let open_err = |source: lofty::error::LoftyError| TagWriteError::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut tagged_file = lofty::read_from_path(path).map_err(open_err)?;

    let tag_type = handler.tag_type;
    if tagged_file.tag(tag_type).is_none() {
        // No-op when the container cannot hold this tag type.
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| TagWriteError::TagUnavailable {
            path: path.to_path_buf(),
            tag: handler.tag_name,
        })?;

    apply_record(tag, handler, record);

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|source| TagWriteError::Save {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        format = task.format.name(),
        fields = ?record.present_fields(),
        "tags saved"
    );
    Ok(())
}
