use serde_json::Value;

/// Ordered list of record fields that may carry an image reference.
///
/// Catalog records expose their artwork under different names depending on the endpoint
/// that produced them, so callers probe the candidates in a fixed priority order and hand the
/// first usable value to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetFieldSet {
    fields: &'static [&'static str],
}

impl AssetFieldSet {
    /// Cover art attached to a song, falling back to its album's cover.
    pub const SONG_COVER: Self = Self::new(&["photo_cover", "cover", "album_cover"]);
    /// Portrait of a singer.
    pub const SINGER_PHOTO: Self = Self::new(&["photo"]);
    /// Disk artwork shown on the song details view.
    pub const SONG_DISK: Self = Self::new(&["photo_disk", "photo_cover"]);
    /// Album cover as delivered by the albums endpoint.
    pub const ALBUM_COVER: Self = Self::new(&["photo_cover", "image"]);

    /// Build a field set from an explicit priority list.
    pub const fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    /// Candidate field names in priority order.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Return the first field holding a non-empty string, along with its value.
    ///
    /// Missing fields, `null`, empty strings and non-string values are all skipped.
    pub fn select<'a>(&self, record: &'a Value) -> Option<(&'static str, &'a str)> {
        self.fields.iter().find_map(|&field| {
            record
                .get(field)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(|value| (field, value))
        })
    }
}

/// Extract a stable identifier from a record's `id` field.
///
/// Both string and integer identifiers are accepted; anything else yields `None`.
pub fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn picks_first_populated_field_in_priority_order() {
        let record = json!({ "cover": "b.png", "album_cover": "c.png" });
        assert_eq!(
            AssetFieldSet::SONG_COVER.select(&record),
            Some(("cover", "b.png"))
        );
    }

    #[test]
    fn skips_null_blank_and_non_string_values() {
        let record = json!({
            "photo_cover": null,
            "cover": "",
            "album_cover": 42,
        });
        assert_eq!(AssetFieldSet::SONG_COVER.select(&record), None);

        let record = json!({ "photo_cover": { "url": "x" }, "album_cover": "c.png" });
        assert_eq!(
            AssetFieldSet::SONG_COVER.select(&record),
            Some(("album_cover", "c.png"))
        );
    }

    #[test]
    fn non_object_records_have_no_fields() {
        assert_eq!(AssetFieldSet::SINGER_PHOTO.select(&json!("photo")), None);
        assert_eq!(AssetFieldSet::SINGER_PHOTO.select(&json!(null)), None);
    }

    #[test]
    fn custom_field_sets_keep_their_order() {
        let set = AssetFieldSet::new(&["avatar", "photo"]);
        assert_eq!(set.fields(), &["avatar", "photo"]);
        let record = json!({ "photo": "p.png", "avatar": "a.png" });
        assert_eq!(set.select(&record), Some(("avatar", "a.png")));
    }

    #[test]
    fn reads_string_and_numeric_ids() {
        assert_eq!(record_id(&json!({ "id": 7 })), Some("7".to_string()));
        assert_eq!(record_id(&json!({ "id": "s-7" })), Some("s-7".to_string()));
        assert_eq!(record_id(&json!({ "id": "" })), None);
        assert_eq!(record_id(&json!({ "id": [1] })), None);
        assert_eq!(record_id(&json!({})), None);
    }
}
