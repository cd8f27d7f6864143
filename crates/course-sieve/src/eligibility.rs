//! Department and grade enrollment rules.
//!
//! Course restrictions arrive as free text made of clauses terminated by `。`,
//! for example `系所:限資工系,電機系。年級:限三年級。`. A rule only applies when
//! its marker is present; anything the text does not restrict is allowed.

const DEPARTMENT_MARKER: &str = "系所:限";
const GRADE_MARKER: &str = "年級:限";
const CLAUSE_END: char = '。';

/// Grade ordinal to the label used in restriction text.
pub fn grade_label(grade: u8) -> Option<&'static str> {
    match grade {
        1 => Some("一"),
        2 => Some("二"),
        3 => Some("三"),
        4 => Some("四"),
        5 => Some("碩一"),
        6 => Some("碩二"),
        _ => None,
    }
}

/// Whether a student of `department` may take a course with `restrictions`.
///
/// Matching is case-insensitive substring matching against every department
/// clause.
pub fn department_allows(restrictions: &str, department: &str) -> bool {
    if department.is_empty() || restrictions.is_empty() {
        return true;
    }

    let restrictions = restrictions.to_lowercase();
    let department = department.to_lowercase();

    let clauses = clauses(&restrictions, DEPARTMENT_MARKER);
    if clauses.is_empty() {
        return true;
    }
    clauses.iter().any(|list| list.contains(&department))
}

/// Whether a student in `grade` may take a course with `restrictions`.
pub fn grade_allows(restrictions: &str, grade: u8) -> bool {
    if restrictions.is_empty() || !restrictions.contains(GRADE_MARKER) {
        return true;
    }

    let label = grade_label(grade);
    if let Some(label) = label {
        if restrictions.contains(&format!("{GRADE_MARKER}{label}年級")) {
            return true;
        }
    }

    let clauses = clauses(restrictions, GRADE_MARKER);
    match label {
        Some(label) if !clauses.is_empty() => clauses.iter().any(|list| list.contains(label)),
        _ => true,
    }
}

/// The non-empty text following each occurrence of `marker`, up to the next
/// clause terminator.
fn clauses<'a>(text: &'a str, marker: &str) -> Vec<&'a str> {
    text.match_indices(marker)
        .filter_map(|(at, _)| {
            let rest = &text[at + marker.len()..];
            let list = rest.split(CLAUSE_END).next().unwrap_or_default();
            (!list.is_empty()).then_some(list)
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
