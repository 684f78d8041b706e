//! # graphkit-onedrive — OneDrive / SharePoint drive-item client
//!
//! Client for drive items on OneDrive and SharePoint, built against the
//! **Microsoft Graph API v1.0**.
//!
//! ## Capabilities
//!
//! - **Fuzzy resolution** – map a requested path to the best-matching files
//!   in a folder when the exact name does not exist, tolerant of case,
//!   punctuation and accents, ranked by edit distance.
//! - **Items** – direct lookup by relative path, paged children listing,
//!   content download.
//! - **Sharing links** – resolve a sharing URL to its drive item and drive.
//! - **Sites** – resolve a SharePoint site URL to its site, default drive
//!   and root folder.
//!
//! Access tokens are supplied by the caller.

pub mod types;
pub mod error;
pub mod names;
pub mod edit_distance;
pub mod lookup;
pub mod resolver;
pub mod api_client;
pub mod items;
pub mod sharing;
pub mod sites;
pub mod service;

// Re-exports
pub use error::{OneDriveError, OneDriveErrorCode, OneDriveResult};
pub use lookup::{ChildrenPage, FolderLister, ItemLookup};
pub use resolver::FuzzyResolver;
pub use service::OneDriveClient;
pub use types::*;
