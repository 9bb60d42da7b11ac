//! Loading catalog snapshots into the typed domain model.
//!
//! The curriculum database is exported as a directory of CSV files; each
//! loader here turns one export into domain records at the boundary so the
//! review components never see untyped rows. Receiving courses that a rule
//! references but the catalog no longer carries are materialized as
//! `unknown`-flagged placeholder courses rather than errors.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::review::domain::{
    CourseFlags, InstitutionNames, ReceivingCourse, RuleKey, RuleKeyError, SendingCourse,
    TransferRule,
};
use crate::review::routing::context::{CatalogContext, DepartmentRecord, DisciplineRecord};

pub const INSTITUTIONS_FILE: &str = "institutions.csv";
pub const DEPARTMENTS_FILE: &str = "departments.csv";
pub const DISCIPLINES_FILE: &str = "disciplines.csv";
pub const CIP_CODES_FILE: &str = "cip_codes.csv";
pub const SENDING_COURSES_FILE: &str = "sending_courses.csv";
pub const RECEIVING_COURSES_FILE: &str = "receiving_courses.csv";

/// Everything the batch driver needs for one run.
#[derive(Debug)]
pub struct Snapshot {
    pub institutions: InstitutionNames,
    pub context: CatalogContext,
    pub rules: Vec<TransferRule>,
}

impl Snapshot {
    pub fn rule(&self, key: &RuleKey) -> Option<&TransferRule> {
        self.rules.iter().find(|rule| &rule.key == key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed snapshot row: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    RuleKey(#[from] RuleKeyError),
}

/// Load a full snapshot from a directory of CSV exports.
pub fn load_dir(dir: &Path) -> Result<Snapshot, SnapshotError> {
    let institutions = parse_institutions(open(dir, INSTITUTIONS_FILE)?)?;
    let departments = parse_departments(open(dir, DEPARTMENTS_FILE)?)?;
    let disciplines = parse_disciplines(open(dir, DISCIPLINES_FILE)?)?;
    let cip_titles = parse_cip_titles(open(dir, CIP_CODES_FILE)?)?;
    let context = CatalogContext::new(disciplines, departments, cip_titles);

    let sending = parse_sending_courses(open(dir, SENDING_COURSES_FILE)?)?;
    let receiving = parse_receiving_courses(open(dir, RECEIVING_COURSES_FILE)?)?;
    let rules = assemble_rules(sending, receiving)?;

    Ok(Snapshot {
        institutions,
        context,
        rules,
    })
}

fn open(dir: &Path, name: &str) -> Result<File, SnapshotError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| SnapshotError::Open { path, source })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input)
}

#[derive(Debug, Deserialize)]
struct InstitutionRow {
    institution: String,
    name: String,
}

pub fn parse_institutions<R: Read>(input: R) -> Result<InstitutionNames, SnapshotError> {
    let mut names = InstitutionNames::new();
    let mut rows = reader(input);
    for row in rows.deserialize::<InstitutionRow>() {
        let row = row?;
        names.insert(row.institution, row.name);
    }
    Ok(names)
}

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    institution: String,
    department: String,
    department_name: String,
    department_status: String,
}

pub fn parse_departments<R: Read>(input: R) -> Result<Vec<DepartmentRecord>, SnapshotError> {
    let mut records = Vec::new();
    let mut rows = reader(input);
    for row in rows.deserialize::<DepartmentRow>() {
        let row = row?;
        records.push(DepartmentRecord {
            institution: row.institution,
            department: row.department,
            department_name: row.department_name,
            is_active: row.department_status == "A",
        });
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct DisciplineRow {
    institution: String,
    department: String,
    discipline: String,
    discipline_name: String,
    cip_code: String,
    cuny_subject: String,
    status: String,
}

pub fn parse_disciplines<R: Read>(input: R) -> Result<Vec<DisciplineRecord>, SnapshotError> {
    let mut records = Vec::new();
    let mut rows = reader(input);
    for row in rows.deserialize::<DisciplineRow>() {
        let row = row?;
        records.push(DisciplineRecord {
            institution: row.institution,
            department: row.department,
            discipline: row.discipline,
            discipline_name: row.discipline_name,
            cip_code: row.cip_code,
            cuny_subject: row.cuny_subject,
            is_active: row.status == "A",
        });
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CipCodeRow {
    cip_code: String,
    cip_title: String,
}

pub fn parse_cip_titles<R: Read>(input: R) -> Result<Vec<(String, String)>, SnapshotError> {
    let mut titles = Vec::new();
    let mut rows = reader(input);
    for row in rows.deserialize::<CipCodeRow>() {
        let row = row?;
        titles.push((row.cip_code, row.cip_title));
    }
    Ok(titles)
}

#[derive(Debug, Deserialize)]
struct SendingCourseRow {
    rule_key: String,
    course_id: u32,
    offer_nbr: u32,
    discipline: String,
    catalog_number: String,
    cuny_subject: String,
    cat_num: f64,
    min_credits: f64,
    max_credits: f64,
    min_gpa: f64,
    max_gpa: f64,
}

pub fn parse_sending_courses<R: Read>(
    input: R,
) -> Result<Vec<(String, SendingCourse)>, SnapshotError> {
    let mut courses = Vec::new();
    let mut rows = reader(input);
    for row in rows.deserialize::<SendingCourseRow>() {
        let row = row?;
        courses.push((
            row.rule_key,
            SendingCourse {
                course_id: row.course_id,
                offer_nbr: row.offer_nbr,
                discipline: row.discipline,
                catalog_number: row.catalog_number,
                cuny_subject: row.cuny_subject,
                cat_num: row.cat_num,
                min_credits: row.min_credits,
                max_credits: row.max_credits,
                min_gpa: row.min_gpa,
                max_gpa: row.max_gpa,
            },
        ));
    }
    Ok(courses)
}

#[derive(Debug, Deserialize)]
struct ReceivingCourseRow {
    rule_key: String,
    course_id: u32,
    offer_nbr: u32,
    discipline: String,
    catalog_number: String,
    cat_num: Option<f64>,
    transfer_credits: Option<f64>,
    #[serde(deserialize_with = "flag")]
    is_undergraduate: bool,
    #[serde(deserialize_with = "flag")]
    is_active: bool,
    #[serde(deserialize_with = "flag")]
    is_message: bool,
    #[serde(deserialize_with = "flag")]
    is_blanket: bool,
}

pub fn parse_receiving_courses<R: Read>(
    input: R,
) -> Result<Vec<(String, ReceivingCourse)>, SnapshotError> {
    let mut courses = Vec::new();
    let mut rows = reader(input);
    for row in rows.deserialize::<ReceivingCourseRow>() {
        let row = row?;
        // A rule can reference a course that has since left the catalog; the
        // export leaves its identity columns empty.
        let course = if row.discipline.is_empty() {
            ReceivingCourse {
                course_id: row.course_id,
                offer_nbr: row.offer_nbr,
                discipline: "Unknown".to_string(),
                catalog_number: "Unknown".to_string(),
                cat_num: 0.0,
                transfer_credits: 0.0,
                flags: CourseFlags::unknown(),
            }
        } else {
            ReceivingCourse {
                course_id: row.course_id,
                offer_nbr: row.offer_nbr,
                discipline: row.discipline,
                catalog_number: row.catalog_number,
                cat_num: row.cat_num.unwrap_or(0.0),
                transfer_credits: row.transfer_credits.unwrap_or(0.0),
                flags: CourseFlags {
                    is_undergraduate: row.is_undergraduate,
                    is_active: row.is_active,
                    is_message: row.is_message,
                    is_blanket: row.is_blanket,
                    is_unknown: false,
                },
            }
        };
        courses.push((row.rule_key, course));
    }
    Ok(courses)
}

/// Group the course rows by rule key into whole `TransferRule` values.
/// A key present on only one side still yields a rule; the empty side is the
/// review components' problem to report, not the loader's.
pub fn assemble_rules(
    sending: Vec<(String, SendingCourse)>,
    receiving: Vec<(String, ReceivingCourse)>,
) -> Result<Vec<TransferRule>, SnapshotError> {
    let mut sides: BTreeMap<String, (Vec<SendingCourse>, Vec<ReceivingCourse>)> = BTreeMap::new();

    for (key, course) in sending {
        sides.entry(key).or_default().0.push(course);
    }
    for (key, course) in receiving {
        sides.entry(key).or_default().1.push(course);
    }

    let mut rules = Vec::with_capacity(sides.len());
    for (key, (sending, receiving)) in sides {
        rules.push(TransferRule {
            key: RuleKey::parse(&key)?,
            sending,
            receiving,
        });
    }
    Ok(rules)
}

/// Database exports spell booleans several ways; accept the common ones.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "1" => Ok(true),
        "f" | "false" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "unrecognized boolean flag '{other}'"
        ))),
    }
}
