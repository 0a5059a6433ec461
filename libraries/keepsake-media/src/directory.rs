//! Folder directory resolution
//!
//! Folders are the root-level entries of a bucket whose names contain no
//! `.`. Everything else at the root is a file.

use keepsake_core::types::{is_folder_name, is_hidden_entry, ALL_FOLDER};
use keepsake_core::{Library, ListOptions, ObjectEntry, ObjectStore, Result, SortOrder};
use tracing::warn;

/// Root listing split into folder names and root-level files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootListing {
    pub folders: Vec<String>,
    pub files: Vec<String>,
}

impl RootListing {
    pub fn from_entries(entries: Vec<ObjectEntry>) -> Self {
        let mut listing = Self::default();
        for entry in entries {
            if is_folder_name(&entry.name) {
                listing.folders.push(entry.name);
            } else if !entry.name.is_empty() && !is_hidden_entry(&entry.name) {
                listing.files.push(entry.name);
            }
        }
        listing
    }
}

/// List the bucket root once, name ascending
pub async fn list_root(store: &dyn ObjectStore, library: Library, limit: usize) -> Result<RootListing> {
    let options = ListOptions {
        limit,
        sort: SortOrder::Asc,
    };
    let entries = store.list(library, "", &options).await?;
    Ok(RootListing::from_entries(entries))
}

/// Real folders of a library, propagating listing errors
pub async fn real_folders(store: &dyn ObjectStore, library: Library, limit: usize) -> Result<Vec<String>> {
    Ok(list_root(store, library, limit).await?.folders)
}

/// Folder tabs for a library: the synthetic `"All"` followed by real folders
///
/// A failed listing yields no tabs at all.
pub async fn list_folders(store: &dyn ObjectStore, library: Library, limit: usize) -> Vec<String> {
    match real_folders(store, library, limit).await {
        Ok(folders) => std::iter::once(ALL_FOLDER.to_string())
            .chain(folders)
            .collect(),
        Err(e) => {
            warn!(library = %library, error = %e, "Failed to list folders");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_entries_are_partitioned() {
        let listing = RootListing::from_entries(vec![
            ObjectEntry::named("2023"),
            ObjectEntry::named(".emptyFolderPlaceholder"),
            ObjectEntry::named("cover.jpg"),
            ObjectEntry::named("2024"),
            ObjectEntry::named(""),
        ]);

        assert_eq!(listing.folders, vec!["2023", "2024"]);
        assert_eq!(listing.files, vec!["cover.jpg"]);
    }
}
