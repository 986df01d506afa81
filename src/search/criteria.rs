//! Search criteria normalization / 搜索条件规范化
//!
//! Raw request fields arrive optional and in arbitrary case. Normalization
//! lowercases and trims every field and derives the composite full name,
//! after which the criteria are immutable for the rest of the request.

use serde::{Deserialize, Serialize};

/// Raw criteria as submitted by the search form or the JSON API / 原始搜索条件
///
/// Absent fields deserialize to empty strings and never match anything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCriteria {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub username: String,
}

/// Normalized criteria, all fields lowercased and trimmed / 规范化后的搜索条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub country: String,
    pub state: String,
    pub username: String,
    /// Derived "first last", non-empty only when both parts are / 派生的全名
    pub full_name: String,
}

fn normalize_field(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl SearchCriteria {
    /// Normalize raw request fields into immutable criteria / 规范化请求字段
    pub fn normalize(raw: &RawCriteria) -> Self {
        let first_name = normalize_field(&raw.first_name);
        let last_name = normalize_field(&raw.last_name);

        let full_name = if !first_name.is_empty() && !last_name.is_empty() {
            format!("{} {}", first_name, last_name)
        } else {
            String::new()
        };

        Self {
            first_name,
            last_name,
            email: normalize_field(&raw.email),
            phone_number: normalize_field(&raw.phone_number),
            address: normalize_field(&raw.address),
            country: normalize_field(&raw.country),
            state: normalize_field(&raw.state),
            username: normalize_field(&raw.username),
            full_name,
        }
    }

    /// Criterion values in the fixed match priority order / 按固定优先级排列的条件值
    ///
    /// The predicate is a pure disjunction, so the order only decides which
    /// field short-circuits first.
    pub fn priority_values(&self) -> [&str; 9] {
        [
            &self.email,
            &self.username,
            &self.phone_number,
            &self.first_name,
            &self.last_name,
            &self.full_name,
            &self.address,
            &self.country,
            &self.state,
        ]
    }

    /// The eight plain fields, excluding the derived full name / 八个基础字段
    ///
    /// Used by the image name matcher and the relational WHERE clause.
    pub fn plain_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("email", &self.email),
            ("username", &self.username),
            ("phone", &self.phone_number),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("country", &self.country),
            ("state", &self.state),
        ]
    }

    /// True when every criterion (including the derived one) is empty / 是否全部为空
    pub fn is_empty(&self) -> bool {
        self.priority_values().iter().all(|v| v.is_empty())
    }
}
