//! Fuzzy drive-item resolution.
//!
//! Resolves a path relative to a folder to the best-matching files. An
//! exact lookup is tried first; when Graph reports the path missing, the
//! parent folder is listed (all pages) and every file whose sanitized base
//! name equals the sanitized requested base name is returned, ranked by
//! edit distance between the original base names.

use crate::onedrive::edit_distance;
use crate::onedrive::error::{OneDriveError, OneDriveResult};
use crate::onedrive::lookup::{child_pages, FolderLister, ItemLookup};
use crate::onedrive::names::{sanitize, split_extension, NameCollator};
use crate::onedrive::types::{DriveItem, FolderRef, DEFAULT_LIST_PAGE_SIZE};
use futures::{pin_mut, TryStreamExt};

/// Resolver over a lookup and a lister. Holds no state between calls.
pub struct FuzzyResolver<'a> {
    lookup: &'a dyn ItemLookup,
    lister: &'a dyn FolderLister,
    page_size: u32,
}

impl<'a> FuzzyResolver<'a> {
    pub fn new(lookup: &'a dyn ItemLookup, lister: &'a dyn FolderLister) -> Self {
        Self {
            lookup,
            lister,
            page_size: DEFAULT_LIST_PAGE_SIZE,
        }
    }

    /// Override the listing page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Resolve `rel_path` below `folder`.
    ///
    /// `rel_path` is either empty or starts with `/`. Returns a single item
    /// for an exact hit (with `extension` set, no `fuzzy_distance`), or the
    /// ranked fallback candidates, possibly none. Errors other than a
    /// not-found direct lookup of a non-empty path are returned unchanged.
    pub async fn resolve(
        &self,
        folder: &FolderRef,
        rel_path: &str,
        ignore_extension: bool,
    ) -> OneDriveResult<Vec<DriveItem>> {
        let rel_path = normalize_rel_path(rel_path)?;

        match self.lookup.get_item(folder, rel_path).await {
            Ok(item) => {
                if rel_path.is_empty() {
                    return Ok(vec![item]);
                }
                let (_, ext) = split_extension(last_segment(rel_path));
                return Ok(vec![item.with_extension(ext)]);
            }
            Err(e) if e.is_not_found() && !rel_path.is_empty() => {}
            Err(e) => return Err(e),
        }

        let (dir, name) = rel_path.rsplit_once('/').unwrap_or(("", rel_path));
        let (query_base, query_ext) = split_extension(name);
        let sanitized_query = sanitize(&query_base);

        let mut listed = Vec::new();
        let pages = child_pages(self.lister, folder, dir, self.page_size);
        pin_mut!(pages);
        while let Some(page) = pages.try_next().await? {
            listed.extend(page);
        }

        let mut candidates: Vec<DriveItem> = listed
            .into_iter()
            .filter(DriveItem::is_file)
            .filter_map(|item| {
                let (item_base, item_ext) = split_extension(&item.name);
                let item = item.with_extension(item_ext.as_str());
                if !query_ext.is_empty() && !ignore_extension && item_ext != query_ext {
                    return None;
                }
                if sanitize(&item_base) != sanitized_query {
                    return None;
                }
                let d = edit_distance::distance(&query_base, &item_base);
                Some(item.with_fuzzy_distance(d))
            })
            .collect();

        let collator = NameCollator::new()?;
        candidates.sort_by(|a, b| {
            a.fuzzy_distance
                .cmp(&b.fuzzy_distance)
                .then_with(|| collator.compare(&a.name, &b.name))
        });
        Ok(candidates)
    }
}

/// Reject relative paths that are neither empty nor rooted.
pub fn check_rel_path(rel_path: &str) -> OneDriveResult<()> {
    if !rel_path.is_empty() && !rel_path.starts_with('/') {
        return Err(OneDriveError::invalid_argument(format!(
            "relative path must be empty or start with '/': {:?}",
            rel_path
        )));
    }
    Ok(())
}

/// Validate `rel_path` and strip trailing `/`; `"/"` addresses the folder
/// itself and becomes `""`.
pub fn normalize_rel_path(rel_path: &str) -> OneDriveResult<&str> {
    check_rel_path(rel_path)?;
    Ok(rel_path.trim_end_matches('/'))
}

fn last_segment(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
