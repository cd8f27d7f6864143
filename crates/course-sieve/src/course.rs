//! Course records as delivered by the course service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::codec;
use crate::period::PeriodTable;
use crate::slot::TimeSlotSet;

/// One course offering.
///
/// Courses are immutable once received; a new search replaces the whole
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    /// Unique serial code of the offering.
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub teacher: String,
    #[serde(deserialize_with = "null_as_default")]
    pub credits: u32,
    /// Raw time encoding, e.g. `"一234,三5"`.
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub classroom: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub course_type: String,
    /// Full-year or half-year label.
    #[serde(deserialize_with = "null_as_default")]
    pub semester: String,
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
    /// Free-text enrollment limits such as `系所:限資工系。年級:限三年級`.
    #[serde(deserialize_with = "null_as_default")]
    pub restrictions: String,
}

impl Course {
    /// The slots this course occupies under `table`.
    pub fn slots(&self, table: &PeriodTable) -> TimeSlotSet {
        codec::decode(&self.time, table)
    }

    /// The time string formatted for display under `table`.
    pub fn time_display(&self, table: &PeriodTable) -> String {
        codec::format_for_display(&self.time, table)
    }

    pub fn note(&self) -> Option<&str> {
        let note = self.note.trim();
        (!note.is_empty()).then_some(note)
    }
}

/// Read an explicit JSON `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An ordered search result. The order comes from the source and is the
/// indexing basis for windowing; it is never re-sorted locally.
pub type SearchResult = Vec<Course>;

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_payload() {
        let json = r#"{
            "code": "CS1001",
            "name": "Data Structures",
            "teacher": "Lin",
            "credits": 3,
            "time": "一234",
            "classroom": "E6-A203",
            "type": "必修",
            "semester": "半",
            "note": ""
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.code, "CS1001");
        assert_eq!(course.course_type, "必修");
        assert_eq!(course.credits, 3);
        assert_eq!(course.restrictions, "");
        assert_eq!(course.note(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let course: Course = serde_json::from_str(r#"{"code": "X1"}"#).unwrap();
        assert_eq!(course.code, "X1");
        assert_eq!(course.credits, 0);
        assert!(course.time.is_empty());
    }

    #[test]
    fn test_null_fields_default() {
        let json = r#"{"code": "A1", "time": "x", "note": null, "credits": null, "type": null}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.code, "A1");
        assert_eq!(course.note(), None);
        assert_eq!(course.credits, 0);
        assert!(course.course_type.is_empty());
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let course = Course {
            code: "A".into(),
            course_type: "選修".into(),
            ..Course::default()
        };
        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(value["type"], "選修");
        assert!(value.get("course_type").is_none());
    }

    #[test]
    fn test_slots_and_display() {
        let course = Course {
            time: "二N5".into(),
            ..Course::default()
        };
        let table = PeriodTable::standard();
        assert_eq!(course.slots(&table).to_wire_keys(), vec!["2-5", "2-N"]);
        assert_eq!(course.time_display(&table), "週二 N,5");
    }
}
