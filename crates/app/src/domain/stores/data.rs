//! Stores Data

use smallvec::SmallVec;

use crate::domain::{categories::records::CategoryUuid, stores::records::StoreUuid};

/// New Store Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub logo: String,
    pub website: String,
    pub is_popular: bool,

    /// Category ids to attach; ids with no matching category are skipped.
    pub categories: SmallVec<[CategoryUuid; 3]>,
}
