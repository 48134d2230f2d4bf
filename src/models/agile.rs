use serde::{Deserialize, Serialize};

/// Agile endpoints wrap their results in `{"values": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ValuesPage<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub board_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
}
