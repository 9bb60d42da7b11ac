//! End-to-end specifications for the rule-review workflow.
//!
//! Scenarios run CSV snapshot text through the loaders and then exercise the
//! describer and router exactly the way the batch driver does, so the whole
//! path from export rows to report text is validated through the public API.

mod common {
    use transfer_review::review::routing::context::CatalogContext;
    use transfer_review::review::{DepartmentRouter, InstitutionNames, RuleDescriber, TransferRule};
    use transfer_review::snapshot;

    pub(super) const INSTITUTIONS: &str = "\
institution,name
BMC01,Borough of Manhattan CC
QNS01,Queens College
";

    pub(super) const DEPARTMENTS: &str = "\
institution,department,department_name,department_status
QNS01,BIO,Biology,A
QNS01,CHEM,Chemistry,A
QNS01,HIST,History,I
";

    pub(super) const DISCIPLINES: &str = "\
institution,department,discipline,discipline_name,cip_code,cuny_subject,status
QNS01,BIO,BIOL,Biology,26.0101,BIO,A
QNS01,CHEM,CHEM,Chemistry,40.0501,CHE,A
QNS01,REG-QNS,PERM,Permits,99.0001,PER,A
BMC01,BIO,BIOL,Biology,26.0101,BIO,A
";

    pub(super) const CIP_CODES: &str = "\
cip_code,cip_title
26,BIOLOGICAL AND BIOMEDICAL SCIENCES.
40,PHYSICAL SCIENCES.
";

    pub(super) const SENDING_COURSES: &str = "\
rule_key,course_id,offer_nbr,discipline,catalog_number,cuny_subject,cat_num,min_credits,max_credits,min_gpa,max_gpa
BMC01:QNS01:BIOL:1,101,1,BIOL,101,BIO,101,4.0,4.0,0.7,4.0
BMC01:QNS01:BIOL:1,102,1,BIOL,102,BIO,102,4.0,4.0,0.7,4.0
BMC01:QNS01:BIOL:2,103,1,BIOL,210,BIO,210,3.0,3.0,2.0,4.0
BMC01:QNS01:ELEC:3,104,1,BIOL,250,XXX,250,3.0,3.0,0.7,4.0
";

    pub(super) const RECEIVING_COURSES: &str = "\
rule_key,course_id,offer_nbr,discipline,catalog_number,cat_num,transfer_credits,is_undergraduate,is_active,is_message,is_blanket
BMC01:QNS01:BIOL:1,201,1,BIOL,105,105,4.0,t,t,f,f
BMC01:QNS01:BIOL:1,202,1,BIOL,106,106,4.0,t,t,f,f
BMC01:QNS01:BIOL:2,203,1,,,,,f,f,f,f
BMC01:QNS01:ELEC:3,204,1,ELEC,1000,1000,0.0,t,t,f,t
";

    pub(super) fn load() -> (InstitutionNames, CatalogContext, Vec<TransferRule>) {
        let institutions =
            snapshot::parse_institutions(INSTITUTIONS.as_bytes()).expect("institutions");
        let departments = snapshot::parse_departments(DEPARTMENTS.as_bytes()).expect("departments");
        let disciplines = snapshot::parse_disciplines(DISCIPLINES.as_bytes()).expect("disciplines");
        let cip_titles = snapshot::parse_cip_titles(CIP_CODES.as_bytes()).expect("cip titles");
        let context = CatalogContext::new(disciplines, departments, cip_titles);

        let sending =
            snapshot::parse_sending_courses(SENDING_COURSES.as_bytes()).expect("sending courses");
        let receiving = snapshot::parse_receiving_courses(RECEIVING_COURSES.as_bytes())
            .expect("receiving courses");
        let rules = snapshot::assemble_rules(sending, receiving).expect("rules");

        (institutions, context, rules)
    }

    pub(super) fn describer(institutions: InstitutionNames) -> RuleDescriber {
        RuleDescriber::new(institutions)
    }

    pub(super) fn router(context: CatalogContext) -> DepartmentRouter {
        DepartmentRouter::new(context)
    }

    pub(super) fn rule<'a>(rules: &'a [TransferRule], key: &str) -> &'a TransferRule {
        rules
            .iter()
            .find(|rule| rule.key.to_string() == key)
            .unwrap_or_else(|| panic!("no rule {key}"))
    }
}

use common::*;

#[test]
fn snapshot_rules_assemble_in_key_order() {
    let (_, _, rules) = load();
    let keys: Vec<String> = rules.iter().map(|rule| rule.key.to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "BMC01:QNS01:BIOL:1",
            "BMC01:QNS01:BIOL:2",
            "BMC01:QNS01:ELEC:3",
        ]
    );
}

#[test]
fn loaded_rule_describes_like_the_report() {
    let (institutions, _, rules) = load();
    let describer = describer(institutions);

    let description = describer
        .describe(rule(&rules, "BMC01:QNS01:BIOL:1"))
        .expect("description");
    assert_eq!(
        description,
        "any passing grade in BIOL 101 and BIOL 102 at Borough of Manhattan CC (8.0 cr) \
         transfers to Queens College as BIOL-105106 (8.0 cr)"
    );
}

#[test]
fn missing_catalog_course_renders_with_a_marker() {
    let (institutions, _, rules) = load();
    let describer = describer(institutions);

    let description = describer
        .describe(rule(&rules, "BMC01:QNS01:BIOL:2"))
        .expect("description");
    assert_eq!(
        description,
        "C or above in BIOL 210 at Borough of Manhattan CC (3.0 cr) transfers to \
         Queens College as Unknown-Unknown? (0.0 cr)"
    );
}

#[test]
fn loaded_rule_routes_to_the_owning_department() {
    let (_, context, rules) = load();
    let router = router(context);

    let result = router
        .route(rule(&rules, "BMC01:QNS01:BIOL:1"))
        .expect("routing");
    assert_eq!(result.routing.department(), "BIO");
    assert_eq!(result.routing.detail(), "Biology");
}

#[test]
fn blanket_only_rule_falls_back_to_the_sending_cip_area() {
    let (_, context, rules) = load();
    let router = router(context);

    let result = router
        .route(rule(&rules, "BMC01:QNS01:ELEC:3"))
        .expect("routing");
    assert_eq!(result.routing.department(), "BIO");
    assert_eq!(
        result.routing.detail(),
        "No department found for CUNY subject XXX, but BIO offers courses in CIP code area \
         26 (Biological and Biomedical Sciences)"
    );
}

#[test]
fn blanket_rule_credits_match_the_sending_side() {
    let (institutions, _, rules) = load();
    let describer = describer(institutions);

    let description = describer
        .describe(rule(&rules, "BMC01:QNS01:ELEC:3"))
        .expect("description");
    assert_eq!(
        description,
        "any passing grade in BIOL 250 at Borough of Manhattan CC (3.0 cr) transfers to \
         Queens College as ELEC-1000 (3.0 cr)"
    );
}
