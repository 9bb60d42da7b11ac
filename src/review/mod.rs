//! The rule-review workflow: describing transfer rules in natural language
//! and routing each rule to the department that should review it.

pub mod description;
pub mod domain;
pub mod routing;

#[cfg(test)]
mod tests;

pub use description::{grade_phrase, oxford_join, DescribeError, RuleDescriber, RuleSide};
pub use domain::{
    CourseFlags, InstitutionNames, ReceivingCourse, RuleKey, RuleKeyError, SendingCourse,
    TransferRule,
};
pub use routing::{
    CatalogContext, DepartmentRecord, DepartmentRouter, DisciplineRecord, Routing, RoutingError,
    RoutingResult, ADMIN_LABEL,
};
