use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Query strings such as `?limit=` arrive as empty strings; treat them as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Like [`deserialize_optional_uuid`] but also treats the literal `all` as
/// "no filter", which is what class dropdowns send.
pub fn deserialize_uuid_filter<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Pair with `#[serde(default)]`.
pub fn deserialize_double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_uuid_filter")]
        class_id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        date: Option<NaiveDate>,
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_double_option")]
        class_id: Option<Option<Uuid>>,
    }

    #[test]
    fn test_double_option_separates_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.class_id, None);

        let null: Patch = serde_json::from_str(r#"{"class_id":null}"#).unwrap();
        assert_eq!(null.class_id, Some(None));

        let id = Uuid::new_v4();
        let set: Patch = serde_json::from_str(&format!(r#"{{"class_id":"{}"}}"#, id)).unwrap();
        assert_eq!(set.class_id, Some(Some(id)));
    }

    #[test]
    fn test_all_and_empty_mean_no_filter() {
        for raw in [r#"{"class_id":"all"}"#, r#"{"class_id":""}"#, r#"{}"#] {
            let f: Filter = serde_json::from_str(raw).unwrap();
            assert!(f.class_id.is_none());
        }
    }

    #[test]
    fn test_uuid_filter_parses_ids() {
        let id = Uuid::new_v4();
        let f: Filter = serde_json::from_str(&format!(r#"{{"class_id":"{}"}}"#, id)).unwrap();
        assert_eq!(f.class_id, Some(id));
        assert!(serde_json::from_str::<Filter>(r#"{"class_id":"nope"}"#).is_err());
    }

    #[test]
    fn test_date_parses_iso_day() {
        let f: Filter = serde_json::from_str(r#"{"date":"2024-06-01"}"#).unwrap();
        assert_eq!(f.date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }
}
