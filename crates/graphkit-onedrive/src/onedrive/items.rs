//! Drive items addressed relative to a folder: direct lookup, paged
//! children listing and content download.
//!
//! Relative paths are either empty (the folder itself) or start with `/`,
//! e.g. `/Reports/2024/summary.xlsx`.

use crate::onedrive::api_client::GraphApiClient;
use crate::onedrive::error::OneDriveResult;
use crate::onedrive::lookup::{child_pages, ChildrenPage, FolderLister, ItemLookup};
use crate::onedrive::types::{DriveItem, FolderRef};
use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Properties requested when listing children.
const CHILDREN_SELECT: &str = "name,parentReference,file,folder,id,size,webUrl,lastModifiedDateTime";

/// Graph-backed item operations.
pub struct GraphDriveItems<'a> {
    client: &'a GraphApiClient,
    page_size: u32,
}

impl<'a> GraphDriveItems<'a> {
    pub fn new(client: &'a GraphApiClient, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// List every child of `folder` + `rel_dir`, following continuation links.
    pub async fn list_all_children(
        &self,
        folder: &FolderRef,
        rel_dir: &str,
    ) -> OneDriveResult<Vec<DriveItem>> {
        let pages: Vec<Vec<DriveItem>> = child_pages(self, folder, rel_dir, self.page_size)
            .try_collect()
            .await?;
        let all: Vec<DriveItem> = pages.into_iter().flatten().collect();
        debug!("Listed {} children of {}{}", all.len(), folder.item_id, rel_dir);
        Ok(all)
    }

    /// Download the content of the file at `folder` + `rel_path`.
    pub async fn download(&self, folder: &FolderRef, rel_path: &str) -> OneDriveResult<Vec<u8>> {
        info!("Downloading {}{}", folder.item_id, rel_path);
        self.client.get_bytes(&content_path(folder, rel_path)).await
    }
}

#[async_trait]
impl<'a> ItemLookup for GraphDriveItems<'a> {
    async fn get_item(&self, folder: &FolderRef, rel_path: &str) -> OneDriveResult<DriveItem> {
        let resp = self.client.get(&item_path(folder, rel_path), &[]).await?;
        let item: DriveItem = serde_json::from_value(resp)?;
        Ok(item)
    }
}

#[async_trait]
impl<'a> FolderLister for GraphDriveItems<'a> {
    async fn list_children_page(
        &self,
        folder: &FolderRef,
        rel_dir: &str,
        page_size: u32,
        page_token: Option<String>,
    ) -> OneDriveResult<ChildrenPage> {
        let resp = match page_token {
            Some(next_link) => self.client.get(&next_link, &[]).await?,
            None => {
                let top = page_size.to_string();
                self.client
                    .get(
                        &children_path(folder, rel_dir),
                        &[("$top", top.as_str()), ("$select", CHILDREN_SELECT)],
                    )
                    .await?
            }
        };
        parse_children_page(resp)
    }
}

/// Split a Graph collection response into items and `@odata.nextLink`.
pub fn parse_children_page(mut resp: serde_json::Value) -> OneDriveResult<ChildrenPage> {
    let next_token = resp["@odata.nextLink"].as_str().map(String::from);
    let items: Vec<DriveItem> = match resp.get_mut("value") {
        Some(value) => serde_json::from_value(value.take())?,
        None => Vec::new(),
    };
    Ok(ChildrenPage { items, next_token })
}

fn encode_rel_path(rel_path: &str) -> String {
    rel_path
        .split('/')
        .map(|seg| utf8_percent_encode(seg, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn item_base(folder: &FolderRef) -> String {
    format!("drives/{}/items/{}", folder.drive_id, folder.item_id)
}

/// Endpoint addressing the item at `folder` + `rel_path`.
pub fn item_path(folder: &FolderRef, rel_path: &str) -> String {
    if rel_path.is_empty() {
        item_base(folder)
    } else {
        format!("{}:{}", item_base(folder), encode_rel_path(rel_path))
    }
}

/// Endpoint listing the children of `folder` + `rel_dir`.
pub fn children_path(folder: &FolderRef, rel_dir: &str) -> String {
    if rel_dir.is_empty() {
        format!("{}/children", item_base(folder))
    } else {
        format!("{}:/children", item_path(folder, rel_dir))
    }
}

/// Endpoint returning the content of `folder` + `rel_path`.
pub fn content_path(folder: &FolderRef, rel_path: &str) -> String {
    if rel_path.is_empty() {
        format!("{}/content", item_base(folder))
    } else {
        format!("{}:/content", item_path(folder, rel_path))
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
