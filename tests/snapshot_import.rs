//! Snapshot loader specifications: CSV rows become typed domain records at
//! the boundary, with the export quirks (letter statuses, postgres booleans,
//! gone-missing courses) absorbed here.

use transfer_review::review::routing::context::CatalogContext;
use transfer_review::snapshot::{
    assemble_rules, parse_departments, parse_disciplines, parse_institutions,
    parse_receiving_courses, parse_sending_courses, SnapshotError,
};

#[test]
fn institution_names_load_by_code() {
    let names = parse_institutions(
        "institution,name\nQNS01,Queens College\nLEH01,Lehman College\n".as_bytes(),
    )
    .expect("institutions");

    assert_eq!(names.len(), 2);
    assert_eq!(names.get("QNS01"), Some("Queens College"));
    assert_eq!(names.get("XXX01"), None);
}

#[test]
fn letter_statuses_become_activity_flags() {
    let departments = parse_departments(
        "institution,department,department_name,department_status\n\
         QNS01,BIO,Biology,A\n\
         QNS01,HIST,History,I\n"
            .as_bytes(),
    )
    .expect("departments");

    assert!(departments[0].is_active);
    assert!(!departments[1].is_active);

    let disciplines = parse_disciplines(
        "institution,department,discipline,discipline_name,cip_code,cuny_subject,status\n\
         QNS01,BIO,BIOL,Biology,26.0101,BIO,A\n\
         QNS01,BIO,BOTN,Botany,26.0301,BIO,I\n"
            .as_bytes(),
    )
    .expect("disciplines");

    assert!(disciplines[0].is_active);
    assert!(!disciplines[1].is_active);
}

#[test]
fn postgres_and_spreadsheet_booleans_both_parse() {
    let receiving = parse_receiving_courses(
        "rule_key,course_id,offer_nbr,discipline,catalog_number,cat_num,transfer_credits,\
         is_undergraduate,is_active,is_message,is_blanket\n\
         BMC01:QNS01:BIOL:1,201,1,BIOL,105,105,4.0,t,true,F,0\n"
            .as_bytes(),
    )
    .expect("receiving courses");

    let (_, course) = &receiving[0];
    assert!(course.flags.is_undergraduate);
    assert!(course.flags.is_active);
    assert!(!course.flags.is_message);
    assert!(!course.flags.is_blanket);
}

#[test]
fn unrecognized_boolean_flags_are_rejected() {
    let result = parse_receiving_courses(
        "rule_key,course_id,offer_nbr,discipline,catalog_number,cat_num,transfer_credits,\
         is_undergraduate,is_active,is_message,is_blanket\n\
         BMC01:QNS01:BIOL:1,201,1,BIOL,105,105,4.0,maybe,t,f,f\n"
            .as_bytes(),
    );

    assert!(matches!(result, Err(SnapshotError::Csv(_))));
}

#[test]
fn gone_missing_courses_become_unknown_placeholders() {
    let receiving = parse_receiving_courses(
        "rule_key,course_id,offer_nbr,discipline,catalog_number,cat_num,transfer_credits,\
         is_undergraduate,is_active,is_message,is_blanket\n\
         BMC01:QNS01:BIOL:1,203,1,,,,,f,f,f,f\n"
            .as_bytes(),
    )
    .expect("receiving courses");

    let (_, course) = &receiving[0];
    assert_eq!(course.discipline, "Unknown");
    assert_eq!(course.catalog_number, "Unknown");
    assert!(course.flags.is_unknown);
    assert_eq!(course.flags.markers(), "GI?");
    assert_eq!(course.transfer_credits, 0.0);
}

#[test]
fn rules_assemble_both_sides_under_one_key() {
    let sending = parse_sending_courses(
        "rule_key,course_id,offer_nbr,discipline,catalog_number,cuny_subject,cat_num,\
         min_credits,max_credits,min_gpa,max_gpa\n\
         BMC01:QNS01:BIOL:1,101,1,BIOL,101,BIO,101,4.0,4.0,0.7,4.0\n\
         BMC01:QNS01:BIOL:1,102,1,BIOL,102,BIO,102,4.0,4.0,0.7,4.0\n"
            .as_bytes(),
    )
    .expect("sending courses");
    let receiving = parse_receiving_courses(
        "rule_key,course_id,offer_nbr,discipline,catalog_number,cat_num,transfer_credits,\
         is_undergraduate,is_active,is_message,is_blanket\n\
         BMC01:QNS01:BIOL:1,201,1,BIOL,105,105,8.0,t,t,f,f\n"
            .as_bytes(),
    )
    .expect("receiving courses");

    let rules = assemble_rules(sending, receiving).expect("rules");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].key.to_string(), "BMC01:QNS01:BIOL:1");
    assert_eq!(rules[0].sending.len(), 2);
    assert_eq!(rules[0].receiving.len(), 1);
    assert_eq!(rules[0].key.group_number, 1);
}

#[test]
fn malformed_rule_keys_fail_the_load() {
    let sending = parse_sending_courses(
        "rule_key,course_id,offer_nbr,discipline,catalog_number,cuny_subject,cat_num,\
         min_credits,max_credits,min_gpa,max_gpa\n\
         not-a-rule-key,101,1,BIOL,101,BIO,101,4.0,4.0,0.7,4.0\n"
            .as_bytes(),
    )
    .expect("sending courses");

    let result = assemble_rules(sending, Vec::new());
    assert!(matches!(result, Err(SnapshotError::RuleKey(_))));
}

#[test]
fn administrative_departments_never_enter_the_context() {
    let disciplines = parse_disciplines(
        "institution,department,discipline,discipline_name,cip_code,cuny_subject,status\n\
         QNS01,BIO,BIOL,Biology,26.0101,BIO,A\n\
         QNS01,REG-QNS,PERM,Permits,99.0001,PER,A\n"
            .as_bytes(),
    )
    .expect("disciplines");
    let context = CatalogContext::new(disciplines, [], []);

    assert!(context.discipline("QNS01", "BIOL").is_some());
    assert!(context.discipline("QNS01", "PERM").is_none());
}
