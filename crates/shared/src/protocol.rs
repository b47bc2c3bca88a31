use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{EventId, TeamCategory, TeamId};

/// `{ "data": ... }` wrapper the team service puts around team resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiData<T> {
    pub data: T,
}

/// A team as returned by the service. `category` stays a raw string at the
/// wire boundary; the form layer re-validates it against the closed set
/// before any write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "member_list")]
    pub members: Vec<String>,
}

/// One row of the team listing. Document-store deployments of the service
/// spell the identifier `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    #[serde(alias = "_id")]
    pub id: TeamId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default, deserialize_with = "member_list")]
    pub members: Vec<String>,
}

/// Body of a team update. `members` is sent as the comma-delimited string
/// exactly as entered in the form; the service stores whatever it is given,
/// so the delimited form is preserved for compatibility with existing
/// writers rather than re-split into a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPatch {
    pub name: String,
    pub description: String,
    pub category: TeamCategory,
    pub members: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
}

/// Accepts both member encodings seen on the wire: the list form the read
/// endpoints document, and the single delimited string that round-trips back
/// out of the service after an update writes one.
fn member_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<String>),
        Delimited(String),
    }

    Ok(match Wire::deserialize(deserializer)? {
        Wire::List(members) => members,
        Wire::Delimited(raw) => raw
            .split(',')
            .map(|member| member.trim().to_string())
            .filter(|member| !member.is_empty())
            .collect(),
    })
}
