//! End-to-end extraction of the problem and past illness sections.

use ccda_extract::{extract, templates};
use ccda_models::{Code, TemplateId};

const DOCUMENT: &str = include_str!("fixtures/problem_section.xml");

#[test]
fn extracts_problem_section_header() {
    let doc = extract(DOCUMENT).expect("fixture should extract");
    let section = doc.problems.expect("problem section present");

    assert_eq!(
        section.template_ids,
        Some(vec![
            TemplateId::new(templates::PROBLEM_SECTION_ENTRIES_REQUIRED),
            TemplateId::new(templates::PROBLEM_SECTION_ENTRIES_REQUIRED)
                .with_extension("2015-08-01"),
        ])
    );
    assert_eq!(
        section.code,
        Some(
            Code::new("11450-4", "2.16.840.1.113883.6.1")
                .with_code_system_name("LOINC")
                .with_display_name("Problem List")
        )
    );

    let author = section.author.expect("section author");
    assert_eq!(
        author.author_id,
        Some(TemplateId::new("2.16.840.1.113883.4.6").with_extension("111111"))
    );
    assert_eq!(author.time.unwrap().value.unwrap().value, "20120806");
    assert_eq!(author.organization.unwrap().value, "Community Health and Hospitals");
    let addresses = author.addresses.expect("author address");
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].city.as_ref().unwrap().value, "Portland");
}

#[test]
fn extracts_concerns_and_nested_observations() {
    let doc = extract(DOCUMENT).unwrap();
    let concerns = doc.problems.unwrap().concerns.expect("concern list is always present");
    assert_eq!(concerns.len(), 2);

    let first = &concerns[0];
    assert_eq!(first.status_code.as_ref().unwrap().code.as_deref(), Some("active"));
    let time = first.effective_time.as_ref().unwrap();
    assert!(time.is_interval());
    assert_eq!(time.low.as_ref().unwrap().value, "20120806");

    let observations = first.observations.as_ref().expect("observations");
    assert_eq!(observations.len(), 1);
    let obs = &observations[0];
    assert_eq!(
        obs.problem_code.as_ref().unwrap().display_name.as_deref(),
        Some("Pneumonia")
    );
    assert_eq!(obs.problem_code.as_ref().unwrap().type_hint.as_deref(), Some("CD"));
    assert_eq!(obs.problem_type_translations.as_ref().unwrap().len(), 1);

    let scales = obs.assessment_scale_observations.as_ref().unwrap();
    assert_eq!(scales[0].value.as_ref().unwrap().value.as_deref(), Some("26"));

    let ddx = obs.date_of_diagnosis.as_ref().expect("date of diagnosis act");
    assert_eq!(
        ddx.effective_time.as_ref().unwrap().value.as_ref().unwrap().value,
        "20120801"
    );

    // second concern has no observations at all: absent, not empty
    assert_eq!(concerns[1].observations, None);
    assert_eq!(concerns[1].author, None);
}

#[test]
fn data_elements_carry_source_locations() {
    let doc = extract(DOCUMENT).unwrap();
    let concerns = doc.problems.unwrap().concerns.unwrap();
    let low = concerns[0]
        .effective_time
        .as_ref()
        .unwrap()
        .low
        .clone()
        .unwrap();

    let path = low.location.path.expect("computed path");
    assert!(path.starts_with("/ClinicalDocument[1]/component[1]/structuredBody[1]"));
    assert!(path.ends_with("/entry[1]/act[1]/effectiveTime[1]/low[1]"));
    assert_eq!(low.location.line, Some(36));
}

#[test]
fn extracts_past_illness_as_its_own_section() {
    let doc = extract(DOCUMENT).unwrap();
    let past = doc.past_illness.expect("past illness section");
    let observations = past.observations.unwrap();
    assert_eq!(observations.len(), 1);
    assert_eq!(
        observations[0].problem_code.as_ref().unwrap().code.as_deref(),
        Some("195967001")
    );
}

#[test]
fn extraction_is_deterministic() {
    let first = extract(DOCUMENT).unwrap();
    let second = extract(DOCUMENT).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
