use crate::review::domain::{
    CourseFlags, InstitutionNames, ReceivingCourse, RuleKey, SendingCourse, TransferRule,
};
use crate::review::routing::context::{CatalogContext, DepartmentRecord, DisciplineRecord};
use crate::review::{DepartmentRouter, RuleDescriber};

pub(super) fn rule_key() -> RuleKey {
    RuleKey::new("BMC01", "QNS01", "BIOL", 1)
}

pub(super) fn sending(
    course_id: u32,
    discipline: &str,
    catalog_number: &str,
    cat_num: f64,
    credits: f64,
    min_gpa: f64,
    max_gpa: f64,
) -> SendingCourse {
    SendingCourse {
        course_id,
        offer_nbr: 1,
        discipline: discipline.to_string(),
        catalog_number: catalog_number.to_string(),
        cuny_subject: discipline.to_string(),
        cat_num,
        min_credits: credits,
        max_credits: credits,
        min_gpa,
        max_gpa,
    }
}

pub(super) fn receiving(
    course_id: u32,
    discipline: &str,
    catalog_number: &str,
    cat_num: f64,
    transfer_credits: f64,
    flags: CourseFlags,
) -> ReceivingCourse {
    ReceivingCourse {
        course_id,
        offer_nbr: 1,
        discipline: discipline.to_string(),
        catalog_number: catalog_number.to_string(),
        cat_num,
        transfer_credits,
        flags,
    }
}

pub(super) fn blanket_flags() -> CourseFlags {
    CourseFlags {
        is_blanket: true,
        ..CourseFlags::regular()
    }
}

pub(super) fn message_flags() -> CourseFlags {
    CourseFlags {
        is_message: true,
        ..CourseFlags::regular()
    }
}

pub(super) fn rule(
    sending: Vec<SendingCourse>,
    receiving: Vec<ReceivingCourse>,
) -> TransferRule {
    TransferRule {
        key: rule_key(),
        sending,
        receiving,
    }
}

pub(super) fn institutions() -> InstitutionNames {
    [
        ("BMC01", "Borough of Manhattan CC"),
        ("QNS01", "Queens College"),
        ("LEH01", "Lehman College"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

pub(super) fn describer() -> RuleDescriber {
    RuleDescriber::new(institutions())
}

pub(super) fn discipline_record(
    institution: &str,
    department: &str,
    discipline: &str,
    cip_code: &str,
    cuny_subject: &str,
) -> DisciplineRecord {
    DisciplineRecord {
        institution: institution.to_string(),
        department: department.to_string(),
        discipline: discipline.to_string(),
        discipline_name: discipline.to_string(),
        cip_code: cip_code.to_string(),
        cuny_subject: cuny_subject.to_string(),
        is_active: true,
    }
}

pub(super) fn department_record(
    institution: &str,
    department: &str,
    department_name: &str,
) -> DepartmentRecord {
    DepartmentRecord {
        institution: institution.to_string(),
        department: department.to_string(),
        department_name: department_name.to_string(),
        is_active: true,
    }
}

/// Catalog with biology and chemistry at the receiving college, biology at
/// the sending college, and CIP area titles for both.
pub(super) fn catalog_context() -> CatalogContext {
    CatalogContext::new(
        [
            discipline_record("QNS01", "BIO", "BIOL", "26.0101", "BIO"),
            discipline_record("QNS01", "CHEM", "CHEM", "40.0501", "CHE"),
            discipline_record("BMC01", "BIO", "BIOL", "26.0101", "BIO"),
            discipline_record("BMC01", "CHEM", "CHEM", "40.0501", "CHE"),
            discipline_record("BMC01", "NUR", "NURS", "51.3801", "NUR"),
        ],
        [
            department_record("QNS01", "BIO", "Biology"),
            department_record("QNS01", "CHEM", "Chemistry"),
        ],
        [
            (
                "26".to_string(),
                "BIOLOGICAL AND BIOMEDICAL SCIENCES.".to_string(),
            ),
            ("40".to_string(), "PHYSICAL SCIENCES.".to_string()),
        ],
    )
}

pub(super) fn router() -> DepartmentRouter {
    DepartmentRouter::new(catalog_context())
}
