//! Read-only reference data consulted by the department router.
//!
//! Built once from catalog snapshots and never mutated afterwards, so it is
//! safe to share across any number of concurrent readers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw discipline row as exported from the curriculum database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineRecord {
    pub institution: String,
    pub department: String,
    pub discipline: String,
    pub discipline_name: String,
    pub cip_code: String,
    pub cuny_subject: String,
    pub is_active: bool,
}

/// Raw department row as exported from the curriculum database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub institution: String,
    pub department: String,
    pub department_name: String,
    pub is_active: bool,
}

/// What the context retains for one (institution, discipline) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineInfo {
    pub department: String,
    pub discipline_name: String,
    pub cip_code: String,
    pub cuny_subject: String,
}

/// Immutable lookup tables for routing decisions.
#[derive(Debug, Default, Clone)]
pub struct CatalogContext {
    disciplines: HashMap<(String, String), DisciplineInfo>,
    department_names: HashMap<(String, String), String>,
    subject_departments: HashMap<(String, String), String>,
    cip_departments: HashMap<(String, String), String>,
    cip_area_titles: HashMap<String, String>,
}

impl CatalogContext {
    /// Build the lookup tables, keeping only active disciplines owned by
    /// non-administrative departments and only active department names.
    pub fn new(
        disciplines: impl IntoIterator<Item = DisciplineRecord>,
        departments: impl IntoIterator<Item = DepartmentRecord>,
        cip_titles: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut context = Self::default();

        for record in disciplines {
            if !record.is_active || is_administrative_department(&record.department) {
                continue;
            }

            context.subject_departments.insert(
                (record.institution.clone(), record.cuny_subject.clone()),
                record.department.clone(),
            );

            let area = cip_area(&record.cip_code);
            if area.len() > 1 {
                context.cip_departments.insert(
                    (record.institution.clone(), area.to_string()),
                    record.department.clone(),
                );
            }

            context.disciplines.insert(
                (record.institution, record.discipline),
                DisciplineInfo {
                    department: record.department,
                    discipline_name: record.discipline_name,
                    cip_code: record.cip_code,
                    cuny_subject: record.cuny_subject,
                },
            );
        }

        for record in departments {
            if record.is_active {
                context.department_names.insert(
                    (record.institution, record.department),
                    record.department_name,
                );
            }
        }

        for (code, title) in cip_titles {
            context
                .cip_area_titles
                .insert(code, normalize_cip_title(&title));
        }

        context
    }

    pub fn discipline(&self, institution: &str, discipline: &str) -> Option<&DisciplineInfo> {
        self.disciplines
            .get(&(institution.to_string(), discipline.to_string()))
    }

    pub fn department_name(&self, institution: &str, department: &str) -> Option<&str> {
        self.department_names
            .get(&(institution.to_string(), department.to_string()))
            .map(String::as_str)
    }

    pub fn department_for_subject(&self, institution: &str, cuny_subject: &str) -> Option<&str> {
        self.subject_departments
            .get(&(institution.to_string(), cuny_subject.to_string()))
            .map(String::as_str)
    }

    pub fn department_for_cip_area(&self, institution: &str, area: &str) -> Option<&str> {
        self.cip_departments
            .get(&(institution.to_string(), area.to_string()))
            .map(String::as_str)
    }

    pub fn cip_area_title(&self, area: &str) -> Option<&str> {
        self.cip_area_titles.get(area).map(String::as_str)
    }
}

/// A CIP code area is its first two characters (the federal series).
pub fn cip_area(cip_code: &str) -> &str {
    cip_code.get(0..2).unwrap_or(cip_code)
}

/// Administrative departments never review rules: codes ending in `01`
/// (registrar-level units) or carrying a known administrative prefix.
fn is_administrative_department(department: &str) -> bool {
    const PREFIXES: [&str; 7] = [
        "PERMIT-", "REG-", "ADMIN-", "PROV-", "MISC-", "UGRD-", "ACAD",
    ];
    let department = department.to_ascii_uppercase();
    department.ends_with("01")
        || PREFIXES
            .iter()
            .any(|prefix| department.starts_with(prefix))
}

/// CIP titles arrive shouting and dotted ("BIOLOGICAL AND BIOMEDICAL
/// SCIENCES."); render them title-cased with a lowercase "and".
fn normalize_cip_title(title: &str) -> String {
    let trimmed = title.trim().trim_end_matches('.');
    let titled = trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    titled.replace(" And ", " and ")
}
