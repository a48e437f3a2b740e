//! Problem and past-illness section extraction

use ccda_models::{
    AssessmentScaleObservation, DiagnosisDateAct, PastIllnessSection, ProblemConcern,
    ProblemObservation, ProblemSection,
};
use roxmltree::Node;

use crate::constants::templates;
use crate::error::Result;
use crate::reader::{
    child, children, has_template, read_author, read_code, read_code_list, read_effective_time,
    read_quantity, read_template_ids,
};

/// First `section` element anywhere under `root` declaring one of `roots`.
fn find_section<'a, 'i>(root: Node<'a, 'i>, roots: &[&str]) -> Option<Node<'a, 'i>> {
    root.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == "section"
            && roots.iter().any(|r| has_template(*n, r))
    })
}

/// `<wrapper>/<name>` elements that declare `template`.
fn templated_entries<'a, 'i>(
    node: Node<'a, 'i>,
    wrapper: &str,
    name: &str,
    template: &str,
) -> Vec<Node<'a, 'i>> {
    children(node, wrapper)
        .into_iter()
        .filter_map(|w| child(w, name))
        .filter(|n| has_template(*n, template))
        .collect()
}

pub fn read_problem_section(root: Node) -> Result<Option<ProblemSection>> {
    let Some(section) = find_section(
        root,
        &[
            templates::PROBLEM_SECTION_ENTRIES_REQUIRED,
            templates::PROBLEM_SECTION_ENTRIES_OPTIONAL,
        ],
    ) else {
        return Ok(None);
    };

    tracing::debug!("Found problem section");

    Ok(Some(ProblemSection {
        template_ids: read_template_ids(children(section, "templateId")),
        code: read_code(child(section, "code")),
        author: read_author(child(section, "author"))?,
        concerns: Some(read_concerns(section)?),
    }))
}

pub fn read_past_illness_section(root: Node) -> Result<Option<PastIllnessSection>> {
    let Some(section) = find_section(root, &[templates::PAST_ILLNESS_SECTION]) else {
        return Ok(None);
    };

    tracing::debug!("Found past illness section");

    Ok(Some(PastIllnessSection {
        template_ids: read_template_ids(children(section, "templateId")),
        code: read_code(child(section, "code")),
        observations: read_problem_observations(templated_entries(
            section,
            "entry",
            "observation",
            templates::PROBLEM_OBSERVATION,
        ))?,
    }))
}

fn read_concerns(section: Node) -> Result<Vec<ProblemConcern>> {
    let acts: Vec<Node> = children(section, "entry")
        .into_iter()
        .filter_map(|e| child(e, "act"))
        .collect();

    let mut concerns = Vec::with_capacity(acts.len());
    for act in acts {
        tracing::debug!("Adding problem concern");
        concerns.push(ProblemConcern {
            template_ids: read_template_ids(children(act, "templateId")),
            concern_code: read_code(child(act, "code")),
            status_code: read_code(child(act, "statusCode")),
            effective_time: read_effective_time(child(act, "effectiveTime"))?,
            author: read_author(child(act, "author"))?,
            observations: read_problem_observations(templated_entries(
                act,
                "entryRelationship",
                "observation",
                templates::PROBLEM_OBSERVATION,
            ))?,
        });
    }
    Ok(concerns)
}

fn read_problem_observations(nodes: Vec<Node>) -> Result<Option<Vec<ProblemObservation>>> {
    if nodes.is_empty() {
        return Ok(None);
    }

    let mut observations = Vec::with_capacity(nodes.len());
    for obs in nodes {
        tracing::debug!("Adding problem observation");
        let code = child(obs, "code");
        observations.push(ProblemObservation {
            template_ids: read_template_ids(children(obs, "templateId")),
            problem_type: read_code(code),
            problem_type_translations: code.and_then(|c| read_code_list(children(c, "translation"))),
            effective_time: read_effective_time(child(obs, "effectiveTime"))?,
            problem_code: read_code(child(obs, "value")),
            author: read_author(child(obs, "author"))?,
            assessment_scale_observations: read_assessment_scales(templated_entries(
                obs,
                "entryRelationship",
                "observation",
                templates::ASSESSMENT_SCALE_OBSERVATION,
            ))?,
            date_of_diagnosis: read_diagnosis_date_act(
                templated_entries(
                    obs,
                    "entryRelationship",
                    "act",
                    templates::DATE_OF_DIAGNOSIS_ACT,
                )
                .first()
                .copied(),
            )?,
        });
    }
    Ok(Some(observations))
}

fn read_assessment_scales(nodes: Vec<Node>) -> Result<Option<Vec<AssessmentScaleObservation>>> {
    if nodes.is_empty() {
        return Ok(None);
    }

    let mut scales = Vec::with_capacity(nodes.len());
    for obs in nodes {
        scales.push(AssessmentScaleObservation {
            template_ids: read_template_ids(children(obs, "templateId")),
            code: read_code(child(obs, "code")),
            effective_time: read_effective_time(child(obs, "effectiveTime"))?,
            value: read_quantity(child(obs, "value")),
        });
    }
    Ok(Some(scales))
}

fn read_diagnosis_date_act(act: Option<Node>) -> Result<Option<DiagnosisDateAct>> {
    let Some(act) = act else {
        return Ok(None);
    };

    tracing::debug!("Adding diagnosis date act");

    Ok(Some(DiagnosisDateAct {
        template_ids: read_template_ids(children(act, "templateId")),
        code: read_code(child(act, "code")),
        effective_time: read_effective_time(child(act, "effectiveTime"))?,
    }))
}
