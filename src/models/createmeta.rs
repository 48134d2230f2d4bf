use serde::Deserialize;

/// Response of `GET /issue/createmeta`.
#[derive(Debug, Deserialize)]
pub struct CreateMeta {
    #[serde(default)]
    pub projects: Vec<ProjectMeta>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    #[serde(default)]
    pub issuetypes: Vec<IssueTypeMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueTypeMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

impl CreateMeta {
    /// First sub-task capable type of the first project, matching `name` when given.
    pub fn find_subtask_type(&self, name: Option<&str>) -> Option<&IssueTypeMeta> {
        self.projects.first()?.issuetypes.iter().find(|issue_type| {
            issue_type.subtask && name.map_or(true, |n| issue_type.name == n)
        })
    }
}
