//! Read-only view over the parts of an SBML document the converter needs: reactions, their
//! annotations, and the groups defined by the `groups` package.

use super::xml::{XmlElement, XmlError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SbmlError {
    #[error(transparent)]
    Xml(#[from] XmlError),
    #[error("Root element is '{0}', expected 'sbml'")]
    NotSbml(String),
    #[error("Document has no <model> element")]
    MissingModel,
    #[error("Model has no groups plugin (no <listOfGroups>)")]
    MissingGroups,
    #[error("Group '{0}' not found in model")]
    GroupNotFound(String),
    #[error("Group '{group_id}' references unknown reaction '{reaction_id}'")]
    UnknownReaction {
        group_id: String,
        reaction_id: String,
    },
}

impl SbmlError {
    /// Whether the error describes a structurally incomplete model rather than unreadable XML.
    pub fn is_malformed_model(&self) -> bool {
        !matches!(self, SbmlError::Xml(_))
    }
}

#[derive(Debug, Clone)]
pub struct SbmlDocument {
    root: XmlElement,
}

impl SbmlDocument {
    pub fn read_from(reader: impl BufRead) -> Result<Self, SbmlError> {
        let root = XmlElement::parse(reader)?;
        if root.name != "sbml" {
            return Err(SbmlError::NotSbml(root.name));
        }
        Ok(Self { root })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SbmlError> {
        let file = File::open(path).map_err(XmlError::from)?;
        Self::read_from(BufReader::new(file))
    }

    pub fn model(&self) -> Result<SbmlModel<'_>, SbmlError> {
        self.root
            .child("model")
            .map(|element| SbmlModel { element })
            .ok_or(SbmlError::MissingModel)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SbmlModel<'a> {
    element: &'a XmlElement,
}

impl<'a> SbmlModel<'a> {
    pub fn id(&self) -> Option<&'a str> {
        self.element.attribute("id")
    }

    pub fn reactions(&self) -> impl Iterator<Item = Reaction<'a>> + 'a {
        self.element
            .child("listOfReactions")
            .into_iter()
            .flat_map(|list| list.children_named("reaction"))
            .map(|element| Reaction { element })
    }

    pub fn reaction(&self, id: &str) -> Option<Reaction<'a>> {
        self.reactions().find(|r| r.id() == Some(id))
    }

    /// Locates a group of the `groups` package by id.
    ///
    /// # Errors
    ///
    /// Returns [`SbmlError::MissingGroups`] if the model carries no group list at all and
    /// [`SbmlError::GroupNotFound`] if none of its groups has the requested id.
    pub fn group(&self, id: &str) -> Result<Group<'a>, SbmlError> {
        let list = self
            .element
            .child("listOfGroups")
            .ok_or(SbmlError::MissingGroups)?;
        list.children_named("group")
            .map(|element| Group { element })
            .find(|g| g.id() == Some(id))
            .ok_or_else(|| SbmlError::GroupNotFound(id.to_string()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Reaction<'a> {
    element: &'a XmlElement,
}

impl<'a> Reaction<'a> {
    pub fn id(&self) -> Option<&'a str> {
        self.element.attribute("id")
    }

    pub fn annotation(&self) -> Option<&'a XmlElement> {
        self.element.child("annotation")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    element: &'a XmlElement,
}

impl<'a> Group<'a> {
    pub fn id(&self) -> Option<&'a str> {
        self.element.attribute("id")
    }

    /// The `idRef` of every member, in document order.
    pub fn member_refs(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.element
            .child("listOfMembers")
            .into_iter()
            .flat_map(|list| list.children_named("member"))
            .filter_map(|member| member.attribute("idRef"))
    }
}
