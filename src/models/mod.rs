pub mod commit;
pub mod snapshot;

pub use commit::{CommitDetail, CommitRef};
pub use snapshot::{AuthorAggregate, RepoDescriptor, RepoSnapshot, UNIDENTIFIED_AUTHOR};
