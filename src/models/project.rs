use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub active: bool,
}

/// Tasks only exist under a project; deleting the project deletes its tasks.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub active: bool,
}
