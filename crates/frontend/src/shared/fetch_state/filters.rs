use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Every filter any analytics page understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Department,
    Year,
    Category,
    StartDate,
    EndDate,
    Journal,
    Field,
    Grade,
    Project,
}

impl FilterKey {
    pub const ALL: [FilterKey; 9] = [
        FilterKey::Department,
        FilterKey::Year,
        FilterKey::Category,
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::Journal,
        FilterKey::Field,
        FilterKey::Grade,
        FilterKey::Project,
    ];

    /// Parameter name sent to the analytics API
    pub fn query_name(self) -> &'static str {
        match self {
            FilterKey::Department => "department",
            FilterKey::Year => "year",
            FilterKey::Category => "category",
            FilterKey::StartDate => "start_date",
            FilterKey::EndDate => "end_date",
            FilterKey::Journal => "journal",
            FilterKey::Field => "field",
            FilterKey::Grade => "grade",
            FilterKey::Project => "project",
        }
    }

    /// Parameter name in the page's own query string
    pub fn url_name(self) -> &'static str {
        match self {
            FilterKey::StartDate => "startDate",
            FilterKey::EndDate => "endDate",
            other => other.query_name(),
        }
    }

    /// Check a non-empty value before it is stored.
    pub fn validate(self, value: &str) -> Result<(), FilterError> {
        let invalid = |reason: &'static str| FilterError::InvalidValue {
            key: self,
            value: value.to_string(),
            reason,
        };

        match self {
            FilterKey::Year => match value.parse::<i32>() {
                Ok(year) if (2000..=2100).contains(&year) => Ok(()),
                _ => Err(invalid("year must be between 2000 and 2100")),
            },
            FilterKey::Grade => match value.parse::<u8>() {
                Ok(grade) if grade <= 4 => Ok(()),
                _ => Err(invalid("grade must be 1-4, or 0 for graduate programs")),
            },
            FilterKey::StartDate | FilterKey::EndDate => {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|_| invalid("dates must be formatted as YYYY-MM-DD"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_name())
    }
}

/// Accepts both the API spelling (`start_date`) and the URL spelling (`startDate`).
impl FromStr for FilterKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.query_name() == s || key.url_name() == s)
            .ok_or_else(|| FilterError::UnknownKey {
                page: "any",
                key: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("filter '{key}' is not available on the {page} page")]
    UnknownKey { page: &'static str, key: String },
    #[error("invalid value '{value}' for filter '{key}': {reason}")]
    InvalidValue {
        key: FilterKey,
        value: String,
        reason: &'static str,
    },
}

/// Active constraints of one page. An absent key is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    values: BTreeMap<FilterKey, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterCriteria::set`].
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Store `value`; `None` or a blank string clears the key.
    pub fn set(&mut self, key: FilterKey, value: Option<String>) {
        match normalize(value) {
            Some(value) => {
                self.values.insert(key, value);
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Trim a raw filter value; blank means unconstrained.
pub fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Encode the URL-mirrored subset of `filters`.
///
/// Keys equal to their default are omitted, so a freshly reset page has an
/// empty query string. A key cleared away from a non-empty default is
/// written with an empty value to survive the round trip.
pub fn encode_url_query(
    filters: &FilterCriteria,
    defaults: &FilterCriteria,
    url_keys: &[FilterKey],
) -> String {
    let params: BTreeMap<&str, String> = url_keys
        .iter()
        .filter(|key| filters.get(**key) != defaults.get(**key))
        .map(|key| (key.url_name(), filters.get(*key).unwrap_or_default().to_string()))
        .collect();

    if params.is_empty() {
        return String::new();
    }
    serde_qs::to_string(&params).unwrap_or_else(|e| {
        log::warn!("Failed to encode filters into the URL: {}", e);
        String::new()
    })
}

/// Seed filters from a page query string, on top of `defaults`.
///
/// Unknown parameters and values that fail validation are ignored.
pub fn decode_url_query(
    query: &str,
    defaults: &FilterCriteria,
    url_keys: &[FilterKey],
) -> FilterCriteria {
    let params: HashMap<String, String> =
        serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed query string '{}': {}", query, e);
            HashMap::new()
        });

    let mut filters = defaults.clone();
    for key in url_keys {
        let Some(raw) = params.get(key.url_name()) else {
            continue;
        };
        match normalize(Some(raw.clone())) {
            None => filters.set(*key, None),
            Some(value) => match key.validate(&value) {
                Ok(()) => filters.set(*key, Some(value)),
                Err(e) => log::warn!("Ignoring URL filter: {}", e),
            },
        }
    }
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[FilterKey] = &[
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::Department,
        FilterKey::Project,
    ];

    fn defaults() -> FilterCriteria {
        FilterCriteria::new()
            .with(FilterKey::StartDate, "2023-06-15")
            .with(FilterKey::EndDate, "2024-06-15")
    }

    #[test]
    fn test_blank_value_clears_key() {
        let mut filters = defaults();
        filters.set(FilterKey::Department, Some("  CS ".to_string()));
        assert_eq!(filters.get(FilterKey::Department), Some("CS"));
        filters.set(FilterKey::Department, Some("   ".to_string()));
        assert_eq!(filters.get(FilterKey::Department), None);
        filters.set(FilterKey::StartDate, None);
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(FilterKey::StartDate.query_name(), "start_date");
        assert_eq!(FilterKey::StartDate.url_name(), "startDate");
        assert_eq!("endDate".parse::<FilterKey>(), Ok(FilterKey::EndDate));
        assert_eq!("end_date".parse::<FilterKey>(), Ok(FilterKey::EndDate));
        assert!(matches!(
            "semester".parse::<FilterKey>(),
            Err(FilterError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_value_validation() {
        assert!(FilterKey::Year.validate("2024").is_ok());
        assert!(FilterKey::Year.validate("1999").is_err());
        assert!(FilterKey::Year.validate("twenty").is_err());
        assert!(FilterKey::Grade.validate("0").is_ok());
        assert!(FilterKey::Grade.validate("5").is_err());
        assert!(FilterKey::StartDate.validate("2024-02-29").is_ok());
        assert!(FilterKey::StartDate.validate("2024/02/29").is_err());
        assert!(FilterKey::Department.validate("anything").is_ok());
    }

    #[test]
    fn test_defaults_encode_to_empty_query() {
        assert_eq!(encode_url_query(&defaults(), &defaults(), KEYS), "");
    }

    #[test]
    fn test_only_changed_keys_are_encoded() {
        let filters = defaults().with(FilterKey::Department, "CS");
        assert_eq!(encode_url_query(&filters, &defaults(), KEYS), "department=CS");
    }

    #[test]
    fn test_url_round_trip() {
        let mut filters = defaults()
            .with(FilterKey::Department, "Computer Science")
            .with(FilterKey::Project, "R&D 2024")
            .with(FilterKey::EndDate, "2024-05-01");
        filters.set(FilterKey::StartDate, None);

        let query = encode_url_query(&filters, &defaults(), KEYS);
        assert!(query.contains("startDate="));
        assert_eq!(decode_url_query(&query, &defaults(), KEYS), filters);
    }

    #[test]
    fn test_decode_ignores_unknown_and_invalid() {
        let decoded = decode_url_query(
            "?department=EE&startDate=not-a-date&year=2024&foo=bar",
            &defaults(),
            KEYS,
        );
        assert_eq!(decoded, defaults().with(FilterKey::Department, "EE"));
    }

    #[test]
    fn test_decode_empty_query_yields_defaults() {
        assert_eq!(decode_url_query("", &defaults(), KEYS), defaults());
    }
}
