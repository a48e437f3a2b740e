//! Scenario conformance, end to end and through the public comparison API.

use ccda_models::{ClinicalDocument, Code, DataElement, EffectiveTime, TemplateId};
use ccda_validator::{
    templates_are_found, validate, PairingStrategy, Severity, ValidatorConfig, Validator,
};

const SCENARIO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ClinicalDocument xmlns="urn:hl7-org:v3" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <component>
    <structuredBody>
      <component>
        <section>
          <templateId root="2.16.840.1.113883.10.20.22.2.5.1"/>
          <code code="11450-4" codeSystem="2.16.840.1.113883.6.1" displayName="Problem List"/>
          <entry>
            <act classCode="ACT" moodCode="EVN">
              <templateId root="2.16.840.1.113883.10.20.22.4.3"/>
              <code code="CONC" codeSystem="2.16.840.1.113883.5.6"/>
              <statusCode code="active"/>
              <effectiveTime>
                <low value="20120806"/>
              </effectiveTime>
              <entryRelationship typeCode="SUBJ">
                <observation classCode="OBS" moodCode="EVN">
                  <templateId root="2.16.840.1.113883.10.20.22.4.4"/>
                  <code code="55607006" codeSystem="2.16.840.1.113883.6.96"/>
                  <effectiveTime>
                    <low value="20120810"/>
                  </effectiveTime>
                  <value xsi:type="CD" code="233604007" codeSystem="2.16.840.1.113883.6.96" displayName="Pneumonia"/>
                </observation>
              </entryRelationship>
            </act>
          </entry>
          <entry>
            <act classCode="ACT" moodCode="EVN">
              <templateId root="2.16.840.1.113883.10.20.22.4.3"/>
              <code code="CONC" codeSystem="2.16.840.1.113883.5.6"/>
              <statusCode code="active"/>
              <entryRelationship typeCode="SUBJ">
                <observation classCode="OBS" moodCode="EVN">
                  <templateId root="2.16.840.1.113883.10.20.22.4.4"/>
                  <value xsi:type="CD" code="195967001" codeSystem="2.16.840.1.113883.6.96" displayName="Asthma"/>
                </observation>
              </entryRelationship>
            </act>
          </entry>
        </section>
      </component>
      <component>
        <section>
          <templateId root="2.16.840.1.113883.10.20.22.2.20"/>
          <code code="11348-0" codeSystem="2.16.840.1.113883.6.1"/>
        </section>
      </component>
    </structuredBody>
  </component>
</ClinicalDocument>
"#;

fn scenario() -> ClinicalDocument {
    ccda_extract::extract(SCENARIO).expect("scenario should extract")
}

fn submission(edit: impl Fn(&str) -> String) -> ClinicalDocument {
    ccda_extract::extract(&edit(SCENARIO)).expect("submission should extract")
}

fn messages(outcome: &ccda_validator::ValidationOutcome) -> Vec<&str> {
    outcome.findings.iter().map(|f| f.message.as_str()).collect()
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn extra_display_name_is_not_a_finding() {
    let reference = Code::new("55607006", "2.16.840.1.113883.6.96");
    let submitted = Code::new("55607006", "2.16.840.1.113883.6.96").with_display_name("Problem");

    assert!(validate(Some(&reference), Some(&submitted), "Problem Type").is_empty());
}

#[test]
fn required_template_id_missing_from_empty_list() {
    let reference = vec![TemplateId::new("2.16.840.1.113883.10.20.22.2.5.1")];
    let submitted: Vec<TemplateId> = vec![];

    let findings = validate(
        Some(reference.as_slice()),
        Some(submitted.as_slice()),
        "Problem Section",
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0]
        .message
        .contains("Root Value = 2.16.840.1.113883.10.20.22.2.5.1"));
}

#[test]
fn interval_reference_against_point_submission() {
    let reference = EffectiveTime::interval(
        Some(DataElement::new("20120101")),
        Some(DataElement::new("20120201")),
    );
    let submitted = EffectiveTime::point(DataElement::new("20120101"));

    let findings = validate(Some(&reference), Some(&submitted), "Effective Time");
    let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("Effective Time Low"));
    assert!(messages[1].contains("Effective Time High"));
    assert!(messages.iter().all(|m| !m.contains("Effective Time Value")));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn tri_state_presence() {
    let value = DataElement::new("x");

    assert!(validate::<DataElement>(None, None, "Field").is_empty());

    let extra = validate(None, Some(&value), "Field");
    assert_eq!(extra.len(), 1);
    assert!(extra[0].message.starts_with("The scenario does not require Field data"));

    let missing = validate(Some(&value), None, "Field");
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.starts_with("The scenario requires Field data"));
}

#[test]
fn template_subset_ignores_extras_and_order() {
    let a = TemplateId::new("2.16.840.1.113883.10.20.22.4.3");
    let b = TemplateId::new("2.16.840.1.113883.10.20.22.4.3").with_extension("2015-08-01");
    let extra = TemplateId::new("1.2.3.4");

    let reference = [a.clone(), b.clone()];
    assert!(templates_are_found(Some(&reference), Some(&[extra.clone(), b.clone(), a.clone()])));
    assert!(!templates_are_found(Some(&reference), Some(&[a.clone(), extra])));
    assert!(validate(Some(&reference[..]), Some(&[b, a][..]), "Act").is_empty());
}

#[test]
fn validation_is_idempotent() {
    let reference = scenario();
    let submitted = submission(|xml| xml.replace("Pneumonia", "Asthma"));
    let validator = Validator::from_config(&ValidatorConfig::default()).unwrap();

    let first = validator.validate(&reference, &submitted);
    let second = validator.validate(&reference, &submitted);
    assert!(!first.findings.is_empty());
    assert_eq!(first, second);
}

#[test]
fn parallel_sections_match_sequential_output() {
    let reference = scenario();
    let submitted = submission(|xml| {
        xml.replace("Pneumonia", "Asthma")
            .replace(r#"<code code="11348-0" codeSystem="2.16.840.1.113883.6.1"/>"#, "")
    });

    let sequential = Validator::from_config(&ValidatorConfig::default()).unwrap();
    let parallel =
        Validator::from_config(&ValidatorConfig::builder().parallel_sections(true).build())
            .unwrap();

    let expected = sequential.validate(&reference, &submitted);
    assert_eq!(expected.error_count(), 2);
    for _ in 0..8 {
        assert_eq!(parallel.validate(&reference, &submitted), expected);
    }
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn scenario_validates_against_itself() {
    let validator = Validator::from_config(&ValidatorConfig::default()).unwrap();
    let outcome = validator.validate(&scenario(), &scenario());
    assert!(outcome.valid, "unexpected findings: {:?}", outcome.findings);
}

#[test]
fn changed_problem_value_is_reported() {
    let submitted = submission(|xml| {
        xml.replace(
            r#"code="233604007" codeSystem="2.16.840.1.113883.6.96" displayName="Pneumonia""#,
            r#"code="840539006" codeSystem="2.16.840.1.113883.6.96" displayName="COVID-19""#,
        )
    });

    let validator = Validator::from_config(&ValidatorConfig::default()).unwrap();
    let outcome = validator.validate(&scenario(), &submitted);

    assert_eq!(
        messages(&outcome),
        vec![
            "The scenario requires Problem Concern Act #1 Problem Observation #1 Problem Code code value \"233604007\", but submitted file has Problem Concern Act #1 Problem Observation #1 Problem Code code value \"840539006\"",
            "The scenario requires Problem Concern Act #1 Problem Observation #1 Problem Code displayName value \"Pneumonia\", but submitted file has Problem Concern Act #1 Problem Observation #1 Problem Code displayName value \"COVID-19\"",
        ]
    );
    assert!(outcome
        .findings
        .iter()
        .all(|f| f.location == "/ClinicalDocument" && f.line == "0"));
}

#[test]
fn time_mismatch_points_at_submitted_markup() {
    let submitted = submission(|xml| xml.replace(r#"<low value="20120806"/>"#, r#"<low value="20120807"/>"#));

    let validator = Validator::from_config(&ValidatorConfig::default()).unwrap();
    let outcome = validator.validate(&scenario(), &submitted);

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(
        finding.message,
        "The scenario requires Problem Concern Act #1 Effective Time Low value \"20120806\", but submitted file has Problem Concern Act #1 Effective Time Low value \"20120807\""
    );
    assert!(finding.location.ends_with("/entry[1]/act[1]/effectiveTime[1]/low[1]"));
    assert_eq!(finding.line, "15");
}

#[test]
fn reordered_concerns_depend_on_pairing_strategy() {
    // swap the two concern entries
    let reference = scenario();
    let mut submitted = reference.clone();
    submitted
        .problems
        .as_mut()
        .and_then(|p| p.concerns.as_mut())
        .expect("concerns")
        .reverse();

    let positional = Validator::from_config(&ValidatorConfig::default()).unwrap();
    assert!(positional.validate(&reference, &submitted).has_errors());

    let by_code = Validator::from_config(
        &ValidatorConfig::builder()
            .pairing(PairingStrategy::ByPrimaryCode)
            .build(),
    )
    .unwrap();
    assert!(by_code.validate(&reference, &submitted).valid);
}

#[test]
fn extra_submitted_concern_is_named_by_its_own_position() {
    let reference = scenario();
    let mut submitted = reference.clone();
    let concerns = submitted
        .problems
        .as_mut()
        .and_then(|p| p.concerns.as_mut())
        .expect("concerns");
    let extra = concerns.remove(1);
    concerns.insert(0, extra);
    let mut reference = reference;
    reference
        .problems
        .as_mut()
        .and_then(|p| p.concerns.as_mut())
        .expect("concerns")
        .truncate(1);

    let by_code = Validator::from_config(
        &ValidatorConfig::builder()
            .pairing(PairingStrategy::ByPrimaryCode)
            .build(),
    )
    .unwrap();
    let findings = by_code.validate_section(
        reference.problems.as_ref(),
        submitted.problems.as_ref(),
        "Problem Section",
    );
    let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["The scenario does not require Problem Concern Act (submitted #1) data, but submitted file does have Problem Concern Act (submitted #1) data"]
    );
}

#[test]
fn missing_second_concern_and_unexpected_past_illness_code() {
    let reference = scenario();
    let mut submitted = reference.clone();
    submitted.problems.as_mut().unwrap().concerns.as_mut().unwrap().pop();
    let mut reference = reference;
    reference.past_illness.as_mut().unwrap().code = None;

    let validator = Validator::from_config(&ValidatorConfig::default()).unwrap();
    let outcome = validator.validate(&reference, &submitted);
    assert_eq!(
        messages(&outcome),
        vec![
            "The scenario requires Problem Concern Act #2 data, but submitted file does not contain Problem Concern Act #2 data",
            "The scenario does not require Past Illness Section Code data, but submitted file does have Past Illness Section Code data",
        ]
    );

    let json = outcome.to_json();
    assert_eq!(json["errorCount"], 2);
    assert_eq!(json["findings"][1]["severity"], "ERROR");
}
