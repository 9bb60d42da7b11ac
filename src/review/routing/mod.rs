//! Which academic department should review a transfer rule?
//!
//! The receiving course set is divided into administrative placeholders
//! (message and blanket-credit courses) and real courses. Real courses route
//! by the department owning their discipline; an all-administrative
//! receiving side falls back to matching the sending side's CUNY subject,
//! then its CIP code area. Anything still ambiguous lands in the
//! administrative review queue with an explanation of why.

pub mod context;

pub use context::{CatalogContext, DepartmentRecord, DisciplineInfo, DisciplineRecord};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::description::oxford_join;
use super::domain::{ReceivingCourse, RuleKey, TransferRule};
use context::cip_area;

/// Label reports use for rules no single department can own.
pub const ADMIN_LABEL: &str = "Admin";

/// Outcome of routing one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Routing {
    /// A single responsible department was identified.
    Resolved { department: String, detail: String },
    /// No single department could be determined; the rule goes to the
    /// administrative review queue.
    Unresolved { reason: String },
}

impl Routing {
    /// Department code, or the administrative review label.
    pub fn department(&self) -> &str {
        match self {
            Routing::Resolved { department, .. } => department,
            Routing::Unresolved { .. } => ADMIN_LABEL,
        }
    }

    /// Human-readable justification; never empty.
    pub fn detail(&self) -> &str {
        match self {
            Routing::Resolved { detail, .. } => detail,
            Routing::Unresolved { reason } => reason,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Routing::Resolved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub rule_key: RuleKey,
    pub routing: Routing,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("rule {0} has no receiving courses")]
    NoReceivingCourses(String),
}

/// Decides which department should review each transfer rule.
pub struct DepartmentRouter {
    context: CatalogContext,
}

impl DepartmentRouter {
    pub fn new(context: CatalogContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CatalogContext {
        &self.context
    }

    pub fn route(&self, rule: &TransferRule) -> Result<RoutingResult, RoutingError> {
        if rule.receiving.is_empty() {
            return Err(RoutingError::NoReceivingCourses(rule.key.to_string()));
        }

        let destination = rule.key.destination_institution.as_str();
        let (admin_courses, real_courses): (Vec<&ReceivingCourse>, Vec<&ReceivingCourse>) = rule
            .receiving
            .iter()
            .partition(|course| course.flags.is_administrative());

        let routing = if real_courses.is_empty() {
            self.route_administrative(destination, &admin_courses, rule)
        } else {
            self.route_real(destination, &real_courses)
        };

        Ok(RoutingResult {
            rule_key: rule.key.clone(),
            routing,
        })
    }

    /// Real receiving courses route by the department owning their
    /// discipline, even when administrative courses are also present.
    fn route_real(&self, destination: &str, courses: &[&ReceivingCourse]) -> Routing {
        let disciplines: BTreeSet<&str> = courses
            .iter()
            .map(|course| course.discipline.as_str())
            .collect();
        let departments = self.departments_for_disciplines(destination, &disciplines);

        match departments.len() {
            // Rare, but observed: "real" courses not offered by any department.
            0 => Routing::Unresolved {
                reason: format!(
                    "No department for {}",
                    oxford_join(&disciplines.into_iter().collect::<Vec<_>>(), "or")
                ),
            },
            1 => self.resolve(destination, first(&departments)),
            // Rare (nonexistent?) case: multiple receiving departments.
            _ => Routing::Unresolved {
                reason: format!(
                    "Multiple receiving departments: {}",
                    oxford_join(&departments.into_iter().collect::<Vec<_>>(), "and")
                ),
            },
        }
    }

    /// Receiving side is all administrative placeholders. The placeholders
    /// may still carry a real discipline ("BIOL 499" tagged blanket credit);
    /// otherwise match the sending side's CUNY subject, then CIP code area.
    fn route_administrative(
        &self,
        destination: &str,
        admin_courses: &[&ReceivingCourse],
        rule: &TransferRule,
    ) -> Routing {
        let admin_disciplines: BTreeSet<&str> = admin_courses
            .iter()
            .map(|course| course.discipline.as_str())
            .collect();
        let departments = self.departments_for_disciplines(destination, &admin_disciplines);
        if departments.len() == 1 {
            return self.resolve(destination, first(&departments));
        }

        let sending_subjects: BTreeSet<&str> = rule
            .sending
            .iter()
            .map(|course| course.cuny_subject.as_str())
            .collect();

        let mut matched_subjects: BTreeSet<&str> = BTreeSet::new();
        let mut subject_departments: BTreeSet<&str> = BTreeSet::new();
        for subject in &sending_subjects {
            if let Some(department) = self.context.department_for_subject(destination, subject) {
                matched_subjects.insert(*subject);
                subject_departments.insert(department);
            }
        }

        match subject_departments.len() {
            1 => Routing::Resolved {
                department: first(&subject_departments).to_string(),
                detail: format!(
                    "Offers courses with same CUNY subject ({})",
                    oxford_join(&matched_subjects.into_iter().collect::<Vec<_>>(), "or")
                ),
            },
            0 => self.cip_fallback(destination, rule, &sending_subjects),
            _ => Routing::Unresolved {
                reason: format!(
                    "{} offer courses in {}",
                    oxford_join(&subject_departments.into_iter().collect::<Vec<_>>(), "and"),
                    oxford_join(&matched_subjects.into_iter().collect::<Vec<_>>(), "or")
                ),
            },
        }
    }

    /// No CUNY-subject match: look for destination departments offering
    /// courses in the sending disciplines' CIP code areas.
    fn cip_fallback(
        &self,
        destination: &str,
        rule: &TransferRule,
        sending_subjects: &BTreeSet<&str>,
    ) -> Routing {
        let source = rule.key.source_institution.as_str();

        let mut areas: BTreeSet<String> = BTreeSet::new();
        for course in &rule.sending {
            if let Some(info) = self.context.discipline(source, &course.discipline) {
                let area = cip_area(&info.cip_code);
                if area.len() > 1 {
                    areas.insert(area.to_string());
                }
            }
        }

        let area_labels: Vec<String> = areas
            .iter()
            .map(|area| match self.context.cip_area_title(area) {
                Some(title) => format!("{} ({})", area, title),
                None => area.clone(),
            })
            .collect();

        let mut departments: BTreeSet<&str> = BTreeSet::new();
        for area in &areas {
            if let Some(department) = self.context.department_for_cip_area(destination, area) {
                departments.insert(department);
            }
        }

        let subjects = oxford_join(
            &sending_subjects.iter().copied().collect::<Vec<_>>(),
            "or",
        );

        match departments.len() {
            0 => Routing::Unresolved {
                reason: if area_labels.is_empty() {
                    format!(
                        "No department found for CUNY subject {} and no CIP code area available \
                         for matching",
                        subjects
                    )
                } else {
                    format!(
                        "No department found for CUNY subject {} or CIP code area {}",
                        subjects,
                        oxford_join(&area_labels, "or")
                    )
                },
            },
            1 => {
                let department = first(&departments).to_string();
                let detail = format!(
                    "No department found for CUNY subject {}, but {} offers courses in CIP code \
                     area {}",
                    subjects,
                    department,
                    oxford_join(&area_labels, "or")
                );
                Routing::Resolved { department, detail }
            }
            _ => Routing::Unresolved {
                reason: format!(
                    "No department found for CUNY subject {}, but {} offer courses in CIP code \
                     area {}",
                    subjects,
                    oxford_join(&departments.into_iter().collect::<Vec<_>>(), "and"),
                    oxford_join(&area_labels, "or")
                ),
            },
        }
    }

    fn departments_for_disciplines<'a>(
        &'a self,
        destination: &str,
        disciplines: &BTreeSet<&str>,
    ) -> BTreeSet<&'a str> {
        disciplines
            .iter()
            .filter_map(|discipline| self.context.discipline(destination, discipline))
            .map(|info| info.department.as_str())
            .collect()
    }

    /// A resolved department still needs an active display name; without one
    /// the rule falls back to the administrative queue.
    fn resolve(&self, destination: &str, department: &str) -> Routing {
        match self.context.department_name(destination, department) {
            Some(name) => Routing::Resolved {
                department: department.to_string(),
                detail: name.to_string(),
            },
            None => Routing::Unresolved {
                reason: format!("{} not found", department),
            },
        }
    }
}

/// First element of a set known to be non-empty at the call site.
fn first<'a>(set: &BTreeSet<&'a str>) -> &'a str {
    set.iter().next().copied().unwrap_or_default()
}
