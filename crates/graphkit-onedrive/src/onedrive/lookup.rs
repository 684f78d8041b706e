//! Collaborator seams used by the resolver.
//!
//! [`ItemLookup`] fetches one item by path, [`FolderLister`] lists one page
//! of a folder's children. The Graph-backed implementation lives in
//! `items`; tests plug in in-memory doubles.

use crate::onedrive::error::OneDriveResult;
use crate::onedrive::types::{DriveItem, FolderRef};
use async_trait::async_trait;
use futures::stream::{self, Stream};

/// Direct, single-item lookup by relative path.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    /// Fetch the item at `folder` + `rel_path` (`""` or `/a/b.txt`).
    ///
    /// A missing path must surface as an error with
    /// [`OneDriveErrorCode::NotFound`](crate::onedrive::error::OneDriveErrorCode::NotFound).
    async fn get_item(&self, folder: &FolderRef, rel_path: &str) -> OneDriveResult<DriveItem>;
}

/// Paged listing of a folder's children.
#[async_trait]
pub trait FolderLister: Send + Sync {
    /// Fetch one page of the children of `folder` + `rel_dir`.
    ///
    /// `page_token` is `None` for the first page and the previous page's
    /// `next_token` afterwards.
    async fn list_children_page(
        &self,
        folder: &FolderRef,
        rel_dir: &str,
        page_size: u32,
        page_token: Option<String>,
    ) -> OneDriveResult<ChildrenPage>;
}

/// One page of a children listing.
#[derive(Debug, Clone, Default)]
pub struct ChildrenPage {
    pub items: Vec<DriveItem>,
    /// Continuation token; `None` on the last page.
    pub next_token: Option<String>,
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazily walk every page of a children listing.
///
/// Pages are fetched one after another, each with the token returned by
/// its predecessor. The stream ends after the first page without a
/// continuation token and yields the first error it meets, if any.
pub fn child_pages<'a, L>(
    lister: &'a L,
    folder: &'a FolderRef,
    rel_dir: &'a str,
    page_size: u32,
) -> impl Stream<Item = OneDriveResult<Vec<DriveItem>>> + Send + 'a
where
    L: FolderLister + ?Sized,
{
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let token = match cursor {
            Cursor::Done => return OneDriveResult::Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
        };
        let page = lister
            .list_children_page(folder, rel_dir, page_size, token)
            .await?;
        let next = match page.next_token {
            Some(token) => Cursor::Next(token),
            None => Cursor::Done,
        };
        OneDriveResult::Ok(Some((page.items, next)))
    })
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
