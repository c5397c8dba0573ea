use std::path::PathBuf;

use crate::domain::AssetKind;

/// One image to cache: where it comes from and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub kind: AssetKind,
    pub id: String,
    pub source_url: String,
    pub destination: PathBuf,
}

impl FetchTask {
    pub fn new(
        kind: AssetKind,
        id: impl Into<String>,
        source_url: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            source_url: source_url.into(),
            destination: destination.into(),
        }
    }
}
