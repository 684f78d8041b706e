//! Sharing-link resolution.
//!
//! Graph addresses a sharing URL through a share token: `u!` followed by
//! the unpadded base64url encoding of the URL.

use crate::onedrive::api_client::GraphApiClient;
use crate::onedrive::error::{OneDriveError, OneDriveResult};
use crate::onedrive::types::{DriveItem, ShareLinkTarget};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::debug;

/// Encode a sharing URL as a Graph share token.
pub fn encode_sharing_url(sharing_url: &str) -> String {
    format!("u!{}", URL_SAFE_NO_PAD.encode(sharing_url.as_bytes()))
}

/// Sharing operations.
pub struct OneDriveSharing<'a> {
    client: &'a GraphApiClient,
}

impl<'a> OneDriveSharing<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    /// Resolve a sharing URL to the drive item it points at.
    pub async fn get_drive_item(&self, sharing_url: &str) -> OneDriveResult<DriveItem> {
        let path = format!("shares/{}/driveItem", encode_sharing_url(sharing_url));
        let resp = self.client.get(&path, &[]).await?;
        let item: DriveItem = serde_json::from_value(resp)?;
        debug!("Share link resolved to item {}", item.id);
        Ok(item)
    }

    /// Resolve a sharing URL to the drive and item it points at.
    pub async fn resolve(&self, sharing_url: &str) -> OneDriveResult<ShareLinkTarget> {
        let item = self.get_drive_item(sharing_url).await?;
        share_target(&item)
    }
}

/// Drive/item pair of a resolved shared item.
pub fn share_target(item: &DriveItem) -> OneDriveResult<ShareLinkTarget> {
    let drive_id = item
        .parent_reference
        .as_ref()
        .and_then(|p| p.drive_id.clone())
        .ok_or_else(|| {
            OneDriveError::invalid_request(format!("shared item {} has no drive id", item.id))
        })?;
    if item.id.is_empty() {
        return Err(OneDriveError::invalid_request("shared item has no id"));
    }
    Ok(ShareLinkTarget {
        drive_id,
        item_id: item.id.clone(),
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
