use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::settings::StoreError;

/// Fatal conditions that abort a synchronization pass.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(
        "the marquee runtime module is not installed; install it before running the module sync"
    )]
    MandatoryModuleMissing,
    #[error("failed to write module descriptor {path}: {source}")]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove module descriptor {path}: {source}")]
    DescriptorRemove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
