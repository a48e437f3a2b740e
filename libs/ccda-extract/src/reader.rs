//! Readers for the scalar C-CDA data types
//!
//! Every reader takes the element a location query resolved to (or `None` when
//! the query matched nothing) and returns `None` for a missing element.

use ccda_models::{
    Address, Author, Code, DataElement, EffectiveTime, Frequency, Quantity, SourceLocation,
    TemplateId,
};
use roxmltree::Node;

use crate::constants::XSI_NS;
use crate::error::{ExtractionError, Result};

// ============================================================================
// Node navigation
// ============================================================================

/// First element child with the given local name.
pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// All element children with the given local name, in document order.
pub(crate) fn children<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|n| n.is_element() && n.tag_name().name() == name)
        .collect()
}

/// Follow a chain of element names, taking the first match at each step.
pub(crate) fn path<'a, 'i>(node: Node<'a, 'i>, names: &[&str]) -> Option<Node<'a, 'i>> {
    names.iter().try_fold(node, |current, name| child(current, name))
}

/// Attribute value, with blank values treated as absent.
pub(crate) fn attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|v| !v.trim().is_empty())
}

pub(crate) fn has_template(node: Node, root: &str) -> bool {
    children(node, "templateId")
        .into_iter()
        .any(|t| t.attribute("root") == Some(root))
}

/// Positional path of an element, e.g. `/ClinicalDocument[1]/component[1]`.
pub fn xpath_of(node: Node) -> String {
    let mut segments: Vec<String> = node
        .ancestors()
        .filter(|n| n.is_element())
        .map(|n| {
            let name = n.tag_name().name();
            let position = n
                .prev_siblings()
                .filter(|s| *s != n && s.is_element() && s.tag_name().name() == name)
                .count()
                + 1;
            format!("{name}[{position}]")
        })
        .collect();
    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// Source location of an element. Pre-computed `xpath`/`lineNumber`
/// attributes win over the computed ones.
fn location_of(node: Node) -> Result<SourceLocation> {
    let path = attr(node, "xpath")
        .map(str::to_string)
        .unwrap_or_else(|| xpath_of(node));

    let line = match attr(node, "lineNumber") {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ExtractionError::InvalidLineNumber {
                element: node.tag_name().name().to_string(),
                value: raw.to_string(),
            })?,
        None => node.document().text_pos_at(node.range().start).row,
    };

    Ok(SourceLocation::new(path, line))
}

// ============================================================================
// Scalars
// ============================================================================

pub fn read_code(node: Option<Node>) -> Option<Code> {
    let node = node?;
    Some(Code {
        code: attr(node, "code").map(str::to_string),
        code_system: attr(node, "codeSystem").map(str::to_string),
        code_system_name: attr(node, "codeSystemName").map(str::to_string),
        display_name: attr(node, "displayName").map(str::to_string),
        type_hint: node
            .attribute((XSI_NS, "type"))
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string),
    })
}

pub fn read_code_list(nodes: Vec<Node>) -> Option<Vec<Code>> {
    if nodes.is_empty() {
        return None;
    }
    Some(nodes.into_iter().filter_map(|n| read_code(Some(n))).collect())
}

pub fn read_template_id(node: Option<Node>) -> Option<TemplateId> {
    let node = node?;
    Some(TemplateId {
        root: attr(node, "root").map(str::to_string),
        extension: attr(node, "extension").map(str::to_string),
    })
}

pub fn read_template_ids(nodes: Vec<Node>) -> Option<Vec<TemplateId>> {
    if nodes.is_empty() {
        return None;
    }
    Some(
        nodes
            .into_iter()
            .filter_map(|n| read_template_id(Some(n)))
            .collect(),
    )
}

/// `value` attribute, else the first child text node. No value → `None`.
pub fn read_data_element(node: Option<Node>) -> Result<Option<DataElement>> {
    let Some(node) = node else {
        return Ok(None);
    };

    let value = attr(node, "value").map(str::to_string).or_else(|| {
        node.first_child()
            .filter(|c| c.is_text())
            .and_then(|c| c.text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    });

    let Some(value) = value else {
        return Ok(None);
    };

    let mut element = DataElement::new(value).with_location(location_of(node)?);
    if let Some(use_) = attr(node, "use") {
        element = element.with_use(use_);
    }

    tracing::trace!(node = node.tag_name().name(), value = %element.value, "Read data element");
    Ok(Some(element))
}

pub fn read_text_content(node: Option<Node>) -> Result<Option<DataElement>> {
    read_data_element(node)
}

pub fn read_text_content_list(nodes: Vec<Node>) -> Result<Option<Vec<DataElement>>> {
    if nodes.is_empty() {
        return Ok(None);
    }
    let mut values = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Some(value) = read_text_content(Some(node))? {
            values.push(value);
        }
    }
    Ok(Some(values))
}

/// Interval when `low` or `high` carries a value, otherwise a point read from
/// the element itself.
pub fn read_effective_time(node: Option<Node>) -> Result<Option<EffectiveTime>> {
    let Some(node) = node else {
        return Ok(None);
    };

    let low = read_data_element(child(node, "low"))?;
    let high = read_data_element(child(node, "high"))?;

    if low.is_none() && high.is_none() {
        return Ok(Some(EffectiveTime {
            value: read_data_element(Some(node))?,
            low: None,
            high: None,
        }));
    }

    Ok(Some(EffectiveTime::interval(low, high)))
}

pub fn read_quantity(node: Option<Node>) -> Option<Quantity> {
    let node = node?;
    Some(Quantity {
        value: attr(node, "value").map(str::to_string),
        units: attr(node, "unit").map(str::to_string),
        xsi_type: Some("PQ".to_string()),
    })
}

pub fn read_frequency(node: Option<Node>) -> Option<Frequency> {
    let node = node?;
    let period = node
        .descendants()
        .find(|n| *n != node && n.is_element() && n.tag_name().name() == "period");

    Some(Frequency {
        operator: attr(node, "operator").map(str::to_string),
        institution_specified: attr(node, "institutionSpecified")
            .map(|v| v.trim().eq_ignore_ascii_case("true")),
        period_value: period.and_then(|p| attr(p, "value")).map(str::to_string),
        period_unit: period.and_then(|p| attr(p, "unit")).map(str::to_string),
    })
}

// ============================================================================
// Composites
// ============================================================================

pub fn read_address(node: Option<Node>) -> Result<Option<Address>> {
    let Some(node) = node else {
        return Ok(None);
    };

    let use_ = match attr(node, "use") {
        Some(use_) => Some(DataElement::new(use_).with_location(location_of(node)?)),
        None => None,
    };
    let lines = children(node, "streetAddressLine");

    Ok(Some(Address {
        use_,
        line1: read_text_content(lines.first().copied())?,
        line2: read_text_content(lines.get(1).copied())?,
        city: read_text_content(child(node, "city"))?,
        state: read_text_content(child(node, "state"))?,
        postal_code: read_text_content(child(node, "postalCode"))?,
        country: read_text_content(child(node, "country"))?,
    }))
}

pub fn read_address_list(nodes: Vec<Node>) -> Result<Option<Vec<Address>>> {
    if nodes.is_empty() {
        return Ok(None);
    }
    tracing::debug!(count = nodes.len(), "Address list found");
    let mut addresses = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Some(address) = read_address(Some(node))? {
            addresses.push(address);
        }
    }
    Ok(Some(addresses))
}

/// `author` stamp: template ids, time, assigned author id and address,
/// represented organization name.
pub fn read_author(node: Option<Node>) -> Result<Option<Author>> {
    let Some(node) = node else {
        return Ok(None);
    };

    let assigned = child(node, "assignedAuthor");

    Ok(Some(Author {
        template_ids: read_template_ids(children(node, "templateId")),
        time: read_effective_time(child(node, "time"))?,
        author_id: read_template_id(assigned.and_then(|a| child(a, "id"))),
        addresses: match assigned {
            Some(a) => read_address_list(children(a, "addr"))?,
            None => None,
        },
        organization: read_text_content(
            assigned.and_then(|a| path(a, &["representedOrganization", "name"])),
        )?,
    }))
}
