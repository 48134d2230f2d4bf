pub mod agile;
pub mod createmeta;
pub mod issue;
pub mod plan_record;
pub mod project;
pub mod search;
pub mod transition;

// Re-export commonly used types
pub use agile::{Board, Sprint, ValuesPage};
pub use createmeta::{CreateMeta, IssueTypeMeta, ProjectMeta};
pub use issue::{CreatedIssue, IssueSummary};
pub use plan_record::PlanRecord;
pub use project::ProjectVersion;
pub use search::{
    Changelog, History, IssueFields, NamedRef, RawSearchPage, SearchIssue, SearchPage, SearchRequest,
    UserRef,
};
pub use transition::{Transition, TransitionTarget, TransitionsResponse};
