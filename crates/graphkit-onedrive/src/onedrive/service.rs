//! High-level client facade.
//!
//! Owns a [`GraphApiClient`] for one access token and exposes every
//! sub-module through short-lived borrows.

use crate::onedrive::api_client::GraphApiClient;
use crate::onedrive::error::OneDriveResult;
use crate::onedrive::items::GraphDriveItems;
use crate::onedrive::lookup::ItemLookup;
use crate::onedrive::resolver::{normalize_rel_path, FuzzyResolver};
use crate::onedrive::sharing::OneDriveSharing;
use crate::onedrive::sites::OneDriveSites;
use crate::onedrive::types::*;
use log::{debug, info};

/// OneDrive / SharePoint client for a single access token.
pub struct OneDriveClient {
    config: OneDriveConfig,
    client: GraphApiClient,
}

impl OneDriveClient {
    pub fn new(config: OneDriveConfig, access_token: &str) -> OneDriveResult<Self> {
        let client = GraphApiClient::new(&config, access_token)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OneDriveConfig {
        &self.config
    }

    /// Replace the access token after the caller refreshed it.
    pub fn set_access_token(&mut self, token: &str) {
        self.client.set_access_token(token);
    }

    // ─── Sub-module accessors ────────────────────────────────────────

    pub fn items(&self) -> GraphDriveItems<'_> {
        GraphDriveItems::new(&self.client, self.config.list_page_size)
    }

    pub fn sharing(&self) -> OneDriveSharing<'_> {
        OneDriveSharing::new(&self.client)
    }

    pub fn sites(&self) -> OneDriveSites<'_> {
        OneDriveSites::new(&self.client)
    }

    // ─── Items ───────────────────────────────────────────────────────

    /// Exact lookup of `folder` + `rel_path`.
    pub async fn get_drive_item(&self, folder: &FolderRef, rel_path: &str) -> OneDriveResult<DriveItem> {
        let rel_path = normalize_rel_path(rel_path)?;
        self.items().get_item(folder, rel_path).await
    }

    /// Best matches for `rel_path` below `folder`; see [`FuzzyResolver::resolve`].
    pub async fn fuzzy_get_drive_item(
        &self,
        folder: &FolderRef,
        rel_path: &str,
        ignore_extension: bool,
    ) -> OneDriveResult<Vec<DriveItem>> {
        let items = self.items();
        let found = FuzzyResolver::new(&items, &items)
            .with_page_size(self.config.list_page_size)
            .resolve(folder, rel_path, ignore_extension)
            .await?;
        debug!("Resolved {:?} to {} item(s)", rel_path, found.len());
        Ok(found)
    }

    /// Every child of `folder` + `rel_dir`.
    pub async fn list_children(&self, folder: &FolderRef, rel_dir: &str) -> OneDriveResult<Vec<DriveItem>> {
        let rel_dir = normalize_rel_path(rel_dir)?;
        self.items().list_all_children(folder, rel_dir).await
    }

    /// Content of the file at `folder` + `rel_path`.
    pub async fn download_drive_item(&self, folder: &FolderRef, rel_path: &str) -> OneDriveResult<Vec<u8>> {
        let rel_path = normalize_rel_path(rel_path)?;
        self.items().download(folder, rel_path).await
    }

    // ─── Sharing links ───────────────────────────────────────────────

    /// Drive item a sharing URL points at.
    pub async fn get_drive_item_from_share_link(&self, sharing_url: &str) -> OneDriveResult<DriveItem> {
        self.sharing().get_drive_item(sharing_url).await
    }

    /// Drive and item a sharing URL points at.
    pub async fn resolve_share_link(&self, sharing_url: &str) -> OneDriveResult<ShareLinkTarget> {
        let target = self.sharing().resolve(sharing_url).await?;
        info!("Share link resolved to drive {} item {}", target.drive_id, target.item_id);
        Ok(target)
    }

    // ─── Sites & drives ──────────────────────────────────────────────

    /// SharePoint site for a site URL.
    pub async fn get_site(&self, site_url: &str) -> OneDriveResult<Site> {
        self.sites().get_site_by_url(site_url).await
    }

    /// Root folder of a site's default document library.
    pub async fn get_site_root_item(&self, site_url: &str) -> OneDriveResult<DriveItem> {
        let sites = self.sites();
        let site = sites.get_site_by_url(site_url).await?;
        let drive = sites.get_site_drive(&site.id).await?;
        sites.get_drive_root_item(&drive.id).await
    }

    /// Root folder of a drive.
    pub async fn get_drive_root_item(&self, drive_id: &str) -> OneDriveResult<DriveItem> {
        self.sites().get_drive_root_item(drive_id).await
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onedrive::error::OneDriveErrorCode;

    fn client() -> OneDriveClient {
        OneDriveClient::new(OneDriveConfig::default(), "tok").unwrap()
    }

    #[tokio::test]
    async fn test_relative_paths_need_leading_slash() {
        let c = client();
        let folder = FolderRef::drive_root("b!drive");

        let err = c.get_drive_item(&folder, "doc.docx").await.unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);

        let err = c.fuzzy_get_drive_item(&folder, "doc.docx", false).await.unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);

        let err = c.list_children(&folder, "sub").await.unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);

        let err = c.download_drive_item(&folder, "doc.docx").await.unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_get_site_rejects_bad_url_before_any_request() {
        let err = client().get_site("ftp://contoso/sites/x").await.unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);
    }

    #[test]
    fn test_page_size_comes_from_config() {
        let cfg = OneDriveConfig {
            list_page_size: 50,
            ..Default::default()
        };
        let c = OneDriveClient::new(cfg, "tok").unwrap();
        assert_eq!(c.config().list_page_size, 50);
    }
}
