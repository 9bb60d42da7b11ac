//! Natural-language descriptions of transfer rules.
//!
//! One sentence per rule: the sending side (grade requirements, course list,
//! credit range) "transfers to" the receiving side (course list, credit
//! total). Cross-listed courses are ignored.

mod grade;
mod phrase;

pub use grade::{grade_phrase, GradeRangeError};
pub use phrase::oxford_join;

use std::collections::HashSet;
use std::fmt;

use super::domain::{InstitutionNames, ReceivingCourse, SendingCourse, TransferRule};

/// Which side of a rule a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSide {
    Sending,
    Receiving,
}

impl fmt::Display for RuleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSide::Sending => write!(f, "sending"),
            RuleSide::Receiving => write!(f, "receiving"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescribeError {
    #[error("rule {rule_key} has an empty {side} side")]
    EmptySide {
        rule_key: String,
        side: RuleSide,
    },
    #[error("rule {rule_key} repeats {side} course id {course_id}")]
    DuplicateCourse {
        rule_key: String,
        side: RuleSide,
        course_id: u32,
    },
    #[error("no institution name for code {code}")]
    UnknownInstitution { code: String },
    #[error(transparent)]
    Grade(#[from] GradeRangeError),
}

/// Composes the plain-text description of a transfer rule.
pub struct RuleDescriber {
    institutions: InstitutionNames,
}

impl RuleDescriber {
    pub fn new(institutions: InstitutionNames) -> Self {
        Self { institutions }
    }

    pub fn institutions(&self) -> &InstitutionNames {
        &self.institutions
    }

    /// Return a plain-text description of the rule, e.g.
    ///
    /// ```text
    /// any passing grade in BIOL 101 and BIOL 102 at Borough of Manhattan CC
    /// (8.0 cr) transfers to Queens College as BIOL-105106 (8.0 cr)
    /// ```
    pub fn describe(&self, rule: &TransferRule) -> Result<String, DescribeError> {
        let rule_key = rule.key.to_string();

        if rule.sending.is_empty() {
            return Err(DescribeError::EmptySide {
                rule_key,
                side: RuleSide::Sending,
            });
        }
        if rule.receiving.is_empty() {
            return Err(DescribeError::EmptySide {
                rule_key,
                side: RuleSide::Receiving,
            });
        }
        ensure_unique(
            &rule_key,
            RuleSide::Sending,
            rule.sending.iter().map(|course| course.course_id),
        )?;
        ensure_unique(
            &rule_key,
            RuleSide::Receiving,
            rule.receiving.iter().map(|course| course.course_id),
        )?;

        // Group sending courses by grade requirement. Not sure there will
        // ever be a mix for one rule, but if it ever happens, we're ready.
        let mut sending: Vec<&SendingCourse> = rule.sending.iter().collect();
        sending.sort_by(|a, b| {
            a.min_gpa
                .total_cmp(&b.min_gpa)
                .then(a.max_gpa.total_cmp(&b.max_gpa))
                .then(a.cat_num.total_cmp(&b.cat_num))
        });

        let mut clauses: Vec<String> = Vec::new();
        for group in sending.chunk_by(|a, b| a.min_gpa == b.min_gpa && a.max_gpa == b.max_gpa) {
            let phrase = grade_phrase(group[0].min_gpa, group[0].max_gpa)?;
            let labels: Vec<String> = group.iter().map(|course| course.label()).collect();
            clauses.push(format!("{} in {}", phrase, oxford_join(&labels, "and")));
        }
        let sending_clause = clauses.join("; ");

        // Accumulate sending credits for checking against receiving credits.
        let mut min_credits = 0.0_f64;
        let mut max_credits = 0.0_f64;
        for course in &rule.sending {
            min_credits += course.min_credits;
            max_credits += course.max_credits;
        }
        let sending_credits = if (min_credits - max_credits).abs() < f64::EPSILON {
            format!("{:.1}", min_credits)
        } else {
            format!("{:.1}-{:.1}", min_credits, max_credits)
        };

        // If any receiving course carries the blanket-credit attribute, its
        // credits are whatever is needed to match the sending credit sum.
        let mut receiving_credits = 0.0_f64;
        let mut has_blanket = false;
        for course in &rule.receiving {
            if course.flags.is_blanket {
                has_blanket = true;
            } else {
                receiving_credits += course.transfer_credits;
            }
        }
        if has_blanket && receiving_credits < min_credits {
            receiving_credits = min_credits;
        }

        let receiving_list = receiving_clause(&rule.receiving);

        let source_name = self.institution_name(&rule.key.source_institution)?;
        let destination_name = self.institution_name(&rule.key.destination_institution)?;

        Ok(format!(
            "{} at {} ({} cr) transfers to {} as {} ({:.1} cr)",
            sending_clause,
            source_name,
            sending_credits,
            destination_name,
            receiving_list,
            receiving_credits
        ))
    }

    fn institution_name(&self, code: &str) -> Result<&str, DescribeError> {
        self.institutions
            .get(code)
            .ok_or_else(|| DescribeError::UnknownInstitution {
                code: code.to_string(),
            })
    }
}

/// Receiving course labels grouped by discipline. Catalog numbers within a
/// discipline group run together; groups are joined with " and ". A course
/// no longer found in the catalog gets a visible `?` marker.
fn receiving_clause(courses: &[ReceivingCourse]) -> String {
    let mut courses: Vec<&ReceivingCourse> = courses.iter().collect();
    courses.sort_by(|a, b| {
        a.discipline
            .cmp(&b.discipline)
            .then(a.cat_num.total_cmp(&b.cat_num))
    });

    let groups: Vec<String> = courses
        .chunk_by(|a, b| a.discipline == b.discipline)
        .map(|group| {
            let numbers: String = group
                .iter()
                .map(|course| {
                    if course.flags.is_unknown {
                        format!("{}?", course.catalog_number)
                    } else {
                        course.catalog_number.clone()
                    }
                })
                .collect();
            format!("{}-{}", group[0].discipline, numbers)
        })
        .collect();

    groups.join(" and ")
}

fn ensure_unique(
    rule_key: &str,
    side: RuleSide,
    course_ids: impl Iterator<Item = u32>,
) -> Result<(), DescribeError> {
    let mut seen = HashSet::new();
    for course_id in course_ids {
        if !seen.insert(course_id) {
            return Err(DescribeError::DuplicateCourse {
                rule_key: rule_key.to_string(),
                side,
                course_id,
            });
        }
    }
    Ok(())
}
