//! Media attached to diary entries
//!
//! Uploads get a collision-free object name of the form
//! `{unix_millis}_{random}.{ext}` in the diary media bucket.

use crate::listing::MediaService;
use keepsake_core::{DiaryMedia, KeepsakeError, Library, MediaKind, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;

const RANDOM_SUFFIX_LEN: usize = 8;

/// Object name for a diary upload of `original_name`
pub fn object_name(original_name: &str, now_millis: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    let ext = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());

    format!("{now_millis}_{suffix}.{ext}")
}

impl MediaService {
    /// Store a diary attachment and return it with a signed URL
    ///
    /// The kind comes from `content_type` when given, else from the file
    /// name's guessed MIME type.
    pub async fn upload_diary_media(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<DiaryMedia> {
        if original_name.trim().is_empty() {
            return Err(KeepsakeError::invalid_input("file name is required"));
        }

        let kind = match content_type {
            Some(content_type) => MediaKind::from_content_type(content_type),
            None => MediaKind::from_content_type(
                mime_guess::from_path(original_name)
                    .first_or_octet_stream()
                    .essence_str(),
            ),
        };

        let path = object_name(original_name, chrono::Utc::now().timestamp_millis());
        let library = Library::DiaryMedia;
        self.objects().upload(library, &path, data, false).await?;

        let url = self
            .objects()
            .create_signed_url(library, &path, self.config().signed_url_ttl)
            .await?;

        info!(path = %path, kind = ?kind, "Stored diary media");
        Ok(DiaryMedia {
            name: original_name.to_string(),
            path,
            url,
            kind,
            tags: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_name_keeps_lowercased_extension() {
        let name = object_name("Sunset.JPG", 1_700_000_000_000);
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "jpg");

        let (millis, suffix) = stem.split_once('_').unwrap();
        assert_eq!(millis, "1700000000000");
        assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn missing_extension_falls_back() {
        assert!(object_name("clip", 1).ends_with(".bin"));
    }

    #[test]
    fn names_do_not_collide() {
        assert_ne!(object_name("a.jpg", 5), object_name("a.jpg", 5));
    }
}
