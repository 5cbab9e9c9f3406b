use serde::Deserialize;
use serde_json::Value;

/// Album-search payload: `{"album": [ ... ] }`, or `{"album": null}` when
/// nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct AlbumSearchResponse {
    #[serde(default)]
    pub album: Option<Vec<AlbumEntry>>,
}

/// One album entry as the provider names its fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlbumEntry {
    #[serde(rename = "strArtist")]
    pub artist: Option<String>,
    #[serde(rename = "strAlbum")]
    pub album: Option<String>,
    #[serde(rename = "strTrack")]
    pub track: Option<String>,
    #[serde(rename = "strGenre")]
    pub genre: Option<String>,
    /// Sent as a string by the provider, sometimes as a number.
    #[serde(rename = "intYearReleased")]
    pub year_released: Option<Value>,
}

/// Best-effort album metadata from the provider. Never carries composer,
/// album artist or track number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAlbumResult {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
}

impl RemoteAlbumResult {
    pub fn is_empty(&self) -> bool {
        self.artist.is_none()
            && self.album.is_none()
            && self.title.is_none()
            && self.genre.is_none()
            && self.year.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_year(value: Option<Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
    .filter(|y| *y > 0)
}

impl From<AlbumEntry> for RemoteAlbumResult {
    fn from(entry: AlbumEntry) -> Self {
        Self {
            artist: non_blank(entry.artist),
            album: non_blank(entry.album),
            title: non_blank(entry.track),
            genre: non_blank(entry.genre),
            year: parse_year(entry.year_released),
        }
    }
}

impl AlbumSearchResponse {
    /// First entry wins; no ranking. An entry with no usable field is no match.
    pub fn first_match(self) -> Option<RemoteAlbumResult> {
        self.album?
            .into_iter()
            .next()
            .map(RemoteAlbumResult::from)
            .filter(|r| !r.is_empty())
    }
}
