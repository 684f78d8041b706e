//! Shared types for the OneDrive / SharePoint Graph client.
//!
//! Models cover client configuration, drives, sites, drive items (files
//! and folders) with the facets the client reads, and the folder handle
//! used to address relative paths.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
//  Configuration
// ═══════════════════════════════════════════════════════════════════════

/// Page size requested from Graph when listing folder children.
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 999;

/// Configuration for a Graph API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OneDriveConfig {
    /// Graph API base URL.  Default: `https://graph.microsoft.com/v1.0`.
    pub graph_base_url: String,
    /// Timeout in seconds for HTTP calls.  Default: 60.
    pub timeout_sec: u64,
    /// Maximum automatic retries for transient failures.  Default: 3.
    pub max_retries: u32,
    /// `$top` used when listing children.  Default: 999.
    pub list_page_size: u32,
}

impl Default for OneDriveConfig {
    fn default() -> Self {
        Self {
            graph_base_url: "https://graph.microsoft.com/v1.0".into(),
            timeout_sec: 60,
            max_retries: 3,
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Drive / Site
// ═══════════════════════════════════════════════════════════════════════

/// A OneDrive or SharePoint document-library drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub drive_type: Option<String>,
    pub web_url: Option<String>,
}

/// A SharePoint site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub web_url: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Drive Items
// ═══════════════════════════════════════════════════════════════════════

/// A file or folder in a drive.
///
/// `extension` and `fuzzy_distance` are not part of the Graph payload; the
/// resolver attaches them to the items it returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub size: Option<i64>,
    pub web_url: Option<String>,
    pub last_modified_date_time: Option<String>,
    pub e_tag: Option<String>,
    pub parent_reference: Option<ItemReference>,
    pub file: Option<FileInfo>,
    pub folder: Option<FolderInfo>,
    pub sharepoint_ids: Option<SharePointIds>,
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    pub download_url: Option<String>,

    /// Lowercased extension derived from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Edit distance to the requested base name (fallback matches only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_distance: Option<usize>,
}

impl DriveItem {
    /// Whether Graph marked this item as a file.
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }

    /// Whether Graph marked this item as a folder.
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    /// Copy of the item with the `extension` annotation set.
    pub fn with_extension(self, extension: impl Into<String>) -> Self {
        Self {
            extension: Some(extension.into()),
            ..self
        }
    }

    /// Copy of the item with the `fuzzy_distance` annotation set.
    pub fn with_fuzzy_distance(self, distance: usize) -> Self {
        Self {
            fuzzy_distance: Some(distance),
            ..self
        }
    }

    /// Handle addressing this item as a folder, if its drive is known.
    pub fn folder_ref(&self) -> Option<FolderRef> {
        let drive_id = self.parent_reference.as_ref()?.drive_id.clone()?;
        if self.id.is_empty() {
            return None;
        }
        Some(FolderRef::new(drive_id, self.id.clone()))
    }
}

/// Reference to a parent item / location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReference {
    pub drive_id: Option<String>,
    pub drive_type: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub site_id: Option<String>,
}

/// File facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub mime_type: Option<String>,
}

/// Folder facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub child_count: Option<i32>,
}

/// SharePoint IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePointIds {
    pub list_id: Option<String>,
    pub list_item_id: Option<String>,
    pub site_id: Option<String>,
    pub site_url: Option<String>,
    pub tenant_id: Option<String>,
    pub web_id: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Addressing
// ═══════════════════════════════════════════════════════════════════════

/// A folder in a drive that relative paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRef {
    pub drive_id: String,
    pub item_id: String,
}

impl FolderRef {
    pub fn new(drive_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            drive_id: drive_id.into(),
            item_id: item_id.into(),
        }
    }

    /// The root folder of a drive.
    pub fn drive_root(drive_id: impl Into<String>) -> Self {
        Self::new(drive_id, "root")
    }
}

/// Drive and item a sharing link points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkTarget {
    pub drive_id: String,
    pub item_id: String,
}

impl From<ShareLinkTarget> for FolderRef {
    fn from(target: ShareLinkTarget) -> Self {
        FolderRef::new(target.drive_id, target.item_id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
