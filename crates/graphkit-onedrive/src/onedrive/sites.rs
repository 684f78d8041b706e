//! SharePoint sites and drive roots.

use crate::onedrive::api_client::GraphApiClient;
use crate::onedrive::error::{OneDriveError, OneDriveResult};
use crate::onedrive::types::{Drive, DriveItem, Site};
use log::debug;
use url::Url;

/// Split a site URL into `(hostname, server-relative path)`.
///
/// `https://contoso.sharepoint.com/sites/team/` yields
/// `("contoso.sharepoint.com", "/sites/team")`; the root site has an empty
/// path.
pub fn site_path_from_url(site_url: &str) -> OneDriveResult<(String, String)> {
    let url = Url::parse(site_url)?;
    if url.scheme() != "https" {
        return Err(OneDriveError::invalid_argument(format!(
            "site URL must use https: {}",
            site_url
        )));
    }
    let host = url
        .host_str()
        .ok_or_else(|| OneDriveError::invalid_argument(format!("site URL has no host: {}", site_url)))?
        .to_string();
    let path = url.path().trim_end_matches('/').to_string();
    Ok((host, path))
}

/// Graph endpoint addressing a site by hostname and path.
pub fn site_endpoint(hostname: &str, path: &str) -> String {
    if path.is_empty() {
        format!("sites/{}", hostname)
    } else {
        format!("sites/{}:{}", hostname, path)
    }
}

/// Site and drive operations.
pub struct OneDriveSites<'a> {
    client: &'a GraphApiClient,
}

impl<'a> OneDriveSites<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    /// Look up a site by hostname and server-relative path.
    pub async fn get_site(&self, hostname: &str, path: &str) -> OneDriveResult<Site> {
        let resp = self.client.get(&site_endpoint(hostname, path), &[]).await?;
        let site: Site = serde_json::from_value(resp)?;
        debug!("Site {} -> {}", path, site.id);
        Ok(site)
    }

    /// Look up a site by its URL.
    pub async fn get_site_by_url(&self, site_url: &str) -> OneDriveResult<Site> {
        let (host, path) = site_path_from_url(site_url)?;
        self.get_site(&host, &path).await
    }

    /// Default document library of a site.
    pub async fn get_site_drive(&self, site_id: &str) -> OneDriveResult<Drive> {
        let resp = self.client.get(&format!("sites/{}/drive", site_id), &[]).await?;
        let drive: Drive = serde_json::from_value(resp)?;
        Ok(drive)
    }

    /// Root folder item of a drive.
    pub async fn get_drive_root_item(&self, drive_id: &str) -> OneDriveResult<DriveItem> {
        let resp = self.client.get(&format!("drives/{}/root", drive_id), &[]).await?;
        let item: DriveItem = serde_json::from_value(resp)?;
        Ok(item)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onedrive::error::OneDriveErrorCode;

    #[test]
    fn test_site_path_from_url() {
        let (host, path) = site_path_from_url("https://contoso.sharepoint.com/sites/team/").unwrap();
        assert_eq!(host, "contoso.sharepoint.com");
        assert_eq!(path, "/sites/team");

        let (_, root) = site_path_from_url("https://contoso.sharepoint.com").unwrap();
        assert_eq!(root, "");
    }

    #[test]
    fn test_site_path_rejects_plain_http() {
        let err = site_path_from_url("http://contoso.sharepoint.com/sites/team").unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);
        let err = site_path_from_url("not a url").unwrap_err();
        assert_eq!(err.code, OneDriveErrorCode::InvalidArgument);
    }

    #[test]
    fn test_site_endpoint() {
        assert_eq!(site_endpoint("contoso.sharepoint.com", ""), "sites/contoso.sharepoint.com");
        assert_eq!(
            site_endpoint("contoso.sharepoint.com", "/sites/team"),
            "sites/contoso.sharepoint.com:/sites/team"
        );
    }

    #[test]
    fn test_site_serde() {
        let site: Site = serde_json::from_str(
            r#"{"id":"contoso.sharepoint.com,abc,def","displayName":"Team","webUrl":"https://contoso.sharepoint.com/sites/team"}"#,
        )
        .unwrap();
        assert_eq!(site.display_name.as_deref(), Some("Team"));
    }
}
