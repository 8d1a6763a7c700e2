//! SBOL 2 RDF/XML serialization of [`SbolDocument`]s.
//!
//! Every part becomes a `sbol:ComponentDefinition`. Genes additionally carry one
//! `sbol:Component` per assembled part and a chain of `precedes` sequence constraints that
//! fixes their 5' to 3' order. The reader deserializes exactly what the writer produces, which
//! is enough to verify a written document.

use super::traits::DocumentFile;
use crate::core::models::document::{DocumentError, SbolConfig, SbolDocument};
use crate::core::models::ids::PartId;
use crate::core::models::part::{BIOPAX_DNA_REGION, Part, PartRole};
use quick_xml::Writer;
use quick_xml::de::DeError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SBOL_NS: &str = "http://sbols.org/v2#";
pub const BQBIOL_NS: &str = "http://biomodels.net/biology-qualifiers/";
pub const UNIPROT_PREFIX: &str = "http://identifiers.org/uniprot/";
pub const PRECEDES: &str = "http://sbols.org/v2#precedes";
pub const ACCESS_PUBLIC: &str = "http://sbols.org/v2#public";

const ANNOTATION_PREFIX: &str = "sbml2sbol";
const TARGET_STRENGTH_ELEMENT: &str = "target_tir";

#[derive(Debug, Error)]
pub enum SbolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("XML serialization error: {0}")]
    Serialization(#[from] quick_xml::Error),
    #[error("Malformed SBOL RDF/XML: {0}")]
    Deserialize(#[from] DeError),
    #[error("ComponentDefinition '{0}' has no recognized role")]
    UnknownRole(String),
    #[error("Invalid value for '{field}': '{value}'")]
    InvalidValue { field: &'static str, value: String },
    #[error("Identity '{found}' does not match the expected identity '{expected}'")]
    IdentityMismatch { expected: String, found: String },
    #[error("Reference to undefined ComponentDefinition '{0}'")]
    DanglingReference(String),
    #[error("Sequence constraints of '{0}' do not form a single linear order")]
    BrokenAssembly(String),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub struct SbolFile;

impl DocumentFile for SbolFile {
    type Document = SbolDocument;
    type Error = SbolError;

    fn read_from(reader: &mut impl BufRead) -> Result<SbolDocument, SbolError> {
        let rdf: RdfXml = quick_xml::de::from_reader(reader)?;
        let config = match rdf.definitions.first() {
            Some(first) => infer_config(first)?,
            None => SbolConfig::default(),
        };
        let mut document = SbolDocument::new(config);

        let mut pending_assemblies: Vec<(PartId, Vec<String>)> = Vec::new();
        for definition in &rdf.definitions {
            let part = read_component_definition(definition)?;
            let expected = document.identity_of(&part);
            if expected != definition.about {
                return Err(SbolError::IdentityMismatch {
                    expected,
                    found: definition.about.clone(),
                });
            }
            let is_gene = part.role() == PartRole::Gene;
            let id = document.get_or_insert(part);
            if is_gene {
                let order = component_definition_order(definition)?;
                if !order.is_empty() {
                    pending_assemblies.push((id, order));
                }
            }
        }

        for (gene_id, definition_uris) in pending_assemblies {
            let members = definition_uris
                .into_iter()
                .map(|uri| {
                    document
                        .part_id_by_identity(&uri)
                        .ok_or(SbolError::DanglingReference(uri))
                })
                .collect::<Result<Vec<_>, _>>()?;
            document.assemble_primary_structure(gene_id, &members)?;
        }

        Ok(document)
    }

    fn write_to(document: &SbolDocument, writer: &mut impl Write) -> Result<(), SbolError> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let annotation_ns = annotation_namespace(document.config());
        let annotation_xmlns = format!("xmlns:{}", ANNOTATION_PREFIX);
        let root = BytesStart::new("rdf:RDF").with_attributes([
            ("xmlns:rdf", RDF_NS),
            ("xmlns:sbol", SBOL_NS),
            ("xmlns:bqbiol", BQBIOL_NS),
            (annotation_xmlns.as_str(), annotation_ns.as_str()),
        ]);
        xml.write_event(Event::Start(root))?;

        for (id, part) in document.parts_iter() {
            write_component_definition(&mut xml, document, id, part)?;
        }

        xml.write_event(Event::End(BytesEnd::new("rdf:RDF")))?;
        writeln!(xml.get_mut())?;
        Ok(())
    }
}

fn annotation_namespace(config: &SbolConfig) -> String {
    format!("{}#", config.homespace.trim_end_matches('/'))
}

fn write_component_definition<W: Write>(
    xml: &mut Writer<W>,
    document: &SbolDocument,
    id: PartId,
    part: &Part,
) -> Result<(), SbolError> {
    let config = document.config();
    let persistent = config.persistent_identity(part.display_id());
    let identity = config.versioned(&persistent);

    xml.write_event(Event::Start(
        BytesStart::new("sbol:ComponentDefinition")
            .with_attributes([("rdf:about", identity.as_str())]),
    ))?;
    write_identified(xml, config, &persistent, part.display_id())?;
    write_resource(xml, "sbol:type", BIOPAX_DNA_REGION)?;
    write_resource(xml, "sbol:role", part.role().sequence_ontology_term())?;

    if let Some(uniprot_id) = part.uniprot_id() {
        let uri = format!("{}{}", UNIPROT_PREFIX, uniprot_id);
        write_resource(xml, "bqbiol:isInstanceOf", &uri)?;
    }
    if let Some(strength) = part.target_strength() {
        let name = format!("{}:{}", ANNOTATION_PREFIX, TARGET_STRENGTH_ELEMENT);
        write_text(xml, &name, &strength.to_string())?;
    }

    let members = document.assembly_parts(id);
    let component_uris: Vec<String> = members
        .iter()
        .map(|member| config.versioned(&format!("{}/{}", persistent, member.display_id())))
        .collect();

    for (member, component_uri) in members.iter().zip(&component_uris) {
        xml.write_event(Event::Start(BytesStart::new("sbol:component")))?;
        xml.write_event(Event::Start(
            BytesStart::new("sbol:Component")
                .with_attributes([("rdf:about", component_uri.as_str())]),
        ))?;
        write_identified(
            xml,
            config,
            &format!("{}/{}", persistent, member.display_id()),
            member.display_id(),
        )?;
        write_resource(
            xml,
            "sbol:definition",
            &config.identity(member.display_id()),
        )?;
        write_resource(xml, "sbol:access", ACCESS_PUBLIC)?;
        xml.write_event(Event::End(BytesEnd::new("sbol:Component")))?;
        xml.write_event(Event::End(BytesEnd::new("sbol:component")))?;
    }

    for (index, pair) in component_uris.windows(2).enumerate() {
        let display_id = format!("constraint_{}", index + 1);
        let constraint_persistent = format!("{}/{}", persistent, display_id);
        let constraint_uri = config.versioned(&constraint_persistent);

        xml.write_event(Event::Start(BytesStart::new("sbol:sequenceConstraint")))?;
        xml.write_event(Event::Start(
            BytesStart::new("sbol:SequenceConstraint")
                .with_attributes([("rdf:about", constraint_uri.as_str())]),
        ))?;
        write_identified(xml, config, &constraint_persistent, &display_id)?;
        write_resource(xml, "sbol:restriction", PRECEDES)?;
        write_resource(xml, "sbol:subject", &pair[0])?;
        write_resource(xml, "sbol:object", &pair[1])?;
        xml.write_event(Event::End(BytesEnd::new("sbol:SequenceConstraint")))?;
        xml.write_event(Event::End(BytesEnd::new("sbol:sequenceConstraint")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("sbol:ComponentDefinition")))?;
    Ok(())
}

fn write_identified<W: Write>(
    xml: &mut Writer<W>,
    config: &SbolConfig,
    persistent: &str,
    display_id: &str,
) -> Result<(), SbolError> {
    write_resource(xml, "sbol:persistentIdentity", persistent)?;
    write_text(xml, "sbol:displayId", display_id)?;
    if !config.version.is_empty() {
        write_text(xml, "sbol:version", &config.version)?;
    }
    Ok(())
}

fn write_resource<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    resource: &str,
) -> Result<(), SbolError> {
    xml.write_event(Event::Empty(
        BytesStart::new(name).with_attributes([("rdf:resource", resource)]),
    ))?;
    Ok(())
}

fn write_text<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<(), SbolError> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Root `rdf:RDF` element. Elements and attributes are matched by local name, so the
/// prefixes chosen by the writer do not matter.
#[derive(Debug, Deserialize)]
struct RdfXml {
    #[serde(rename = "ComponentDefinition", default)]
    definitions: Vec<ComponentDefinitionXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComponentDefinitionXml {
    #[serde(rename = "@about")]
    about: String,
    persistent_identity: ResourceXml,
    display_id: String,
    version: Option<String>,
    #[serde(default)]
    role: Vec<ResourceXml>,
    #[serde(default)]
    is_instance_of: Vec<ResourceXml>,
    #[serde(rename = "target_tir")]
    target_tir: Option<String>,
    #[serde(default)]
    component: Vec<ComponentProperty>,
    #[serde(default)]
    sequence_constraint: Vec<SequenceConstraintProperty>,
}

#[derive(Debug, Deserialize)]
struct ResourceXml {
    #[serde(rename = "@resource")]
    resource: String,
}

#[derive(Debug, Deserialize)]
struct ComponentProperty {
    #[serde(rename = "Component")]
    component: ComponentXml,
}

#[derive(Debug, Deserialize)]
struct ComponentXml {
    #[serde(rename = "@about")]
    about: String,
    definition: ResourceXml,
}

#[derive(Debug, Deserialize)]
struct SequenceConstraintProperty {
    #[serde(rename = "SequenceConstraint")]
    constraint: SequenceConstraintXml,
}

#[derive(Debug, Deserialize)]
struct SequenceConstraintXml {
    restriction: ResourceXml,
    subject: ResourceXml,
    object: ResourceXml,
}

fn infer_config(definition: &ComponentDefinitionXml) -> Result<SbolConfig, SbolError> {
    let persistent = definition.persistent_identity.resource.as_str();
    let homespace = persistent
        .strip_suffix(definition.display_id.as_str())
        .and_then(|prefix| prefix.strip_suffix('/'))
        .ok_or_else(|| SbolError::InvalidValue {
            field: "persistentIdentity",
            value: persistent.to_string(),
        })?;

    Ok(SbolConfig {
        homespace: homespace.to_string(),
        version: definition.version.clone().unwrap_or_default(),
        validate: false,
    })
}

fn read_component_definition(definition: &ComponentDefinitionXml) -> Result<Part, SbolError> {
    let display_id = definition.display_id.as_str();
    let role = definition
        .role
        .iter()
        .find_map(|role| PartRole::from_term(&role.resource, display_id))
        .ok_or_else(|| SbolError::UnknownRole(definition.about.clone()))?;

    let mut part = Part::new(display_id, role);
    if let Some(uniprot_id) = definition
        .is_instance_of
        .iter()
        .find_map(|instance| instance.resource.strip_prefix(UNIPROT_PREFIX))
    {
        part = part.with_uniprot_id(uniprot_id);
    }
    if let Some(text) = &definition.target_tir {
        let strength = text.trim().parse().map_err(|_| SbolError::InvalidValue {
            field: TARGET_STRENGTH_ELEMENT,
            value: text.clone(),
        })?;
        part = part.with_target_strength(strength);
    }
    Ok(part)
}

/// Orders a gene's component definitions by following its `precedes` constraints.
fn component_definition_order(
    definition: &ComponentDefinitionXml,
) -> Result<Vec<String>, SbolError> {
    let about = definition.about.as_str();
    let components: Vec<(&str, &str)> = definition
        .component
        .iter()
        .map(|property| {
            (
                property.component.about.as_str(),
                property.component.definition.resource.as_str(),
            )
        })
        .collect();
    if components.is_empty() {
        return Ok(Vec::new());
    }

    let mut next: HashMap<&str, &str> = HashMap::new();
    for property in &definition.sequence_constraint {
        let constraint = &property.constraint;
        if constraint.restriction.resource != PRECEDES {
            continue;
        }
        if next
            .insert(
                constraint.subject.resource.as_str(),
                constraint.object.resource.as_str(),
            )
            .is_some()
        {
            return Err(SbolError::BrokenAssembly(about.to_string()));
        }
    }

    let successors: HashSet<&str> = next.values().copied().collect();
    let (start, _) = components
        .iter()
        .find(|(uri, _)| !successors.contains(uri))
        .ok_or_else(|| SbolError::BrokenAssembly(about.to_string()))?;
    let definitions: HashMap<&str, &str> = components.iter().copied().collect();

    let mut ordered = Vec::with_capacity(components.len());
    let mut current = *start;
    loop {
        let definition_uri = definitions
            .get(current)
            .ok_or_else(|| SbolError::BrokenAssembly(about.to_string()))?;
        ordered.push(definition_uri.to_string());
        if ordered.len() > components.len() {
            return Err(SbolError::BrokenAssembly(about.to_string()));
        }
        match next.get(current) {
            Some(following) => current = *following,
            None => break,
        }
    }

    if ordered.len() != components.len() {
        return Err(SbolError::BrokenAssembly(about.to_string()));
    }
    Ok(ordered)
}
