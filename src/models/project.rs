use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectVersion {
    pub id: String,
}
