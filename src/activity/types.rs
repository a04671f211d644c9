use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names every raw activity entry must carry.
pub(crate) const REQUIRED_FIELDS: [&str; 5] = ["time_spent", "liked", "shares", "commented", "hashtags"];

/// A normalized activity entry.
///
/// Built from a raw JSON record by [`validate_entry`](super::validate_entry);
/// `hashtags` is always a list and the two flags are always booleans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub time_spent: f64,
    pub liked: bool,
    pub shares: i64,
    pub commented: bool,
    /// Elements are passed through untouched, whatever their JSON type.
    pub hashtags: Vec<Value>,
}

/// Raw entries recorded for one user, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct UserActivity {
    pub user_id: String,
    pub entries: Vec<Value>,
}

/// Input mapping of user id to raw entries.
///
/// Users keep the insertion order of the source JSON object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ActivityLog {
    users: Vec<UserActivity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user. A repeated id is kept as a separate record.
    pub fn push(&mut self, user_id: impl Into<String>, entries: Vec<Value>) {
        self.users.push(UserActivity {
            user_id: user_id.into(),
            entries,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserActivity> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Total number of raw entries across all users.
    pub fn entry_count(&self) -> usize {
        self.users.iter().map(|u| u.entries.len()).sum()
    }
}

impl TryFrom<Map<String, Value>> for ActivityLog {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut log = ActivityLog::new();
        for (user_id, value) in map {
            match value {
                Value::Array(entries) => log.push(user_id, entries),
                other => {
                    return Err(format!(
                        "activity for user '{}' must be a list, found {}",
                        user_id,
                        json_type_name(&other)
                    ))
                }
            }
        }
        Ok(log)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Value>)> for ActivityLog {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Value>)>>(iter: I) -> Self {
        let mut log = ActivityLog::new();
        for (user_id, entries) in iter {
            log.push(user_id, entries);
        }
        log
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
