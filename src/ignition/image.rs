//! The Ignition image as seen by testcontainers.

use std::borrow::Cow;

use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::{CopyToContainer, Image};

use crate::ignition::error::{IgnitionError, Result};
use crate::ignition::plan::LaunchPlan;

/// Repository of the official Ignition image.
pub const IGNITION_IMAGE: &str = "inductiveautomation/ignition";
/// Tag used when none is given.
pub const DEFAULT_TAG: &str = "8.1.43";

/// A parsed `repository:tag` image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    name: String,
    tag: String,
}

impl Default for ImageName {
    fn default() -> Self {
        Self {
            name: IGNITION_IMAGE.to_string(),
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl ImageName {
    /// Split a reference into repository and tag. A missing tag means `latest`.
    ///
    /// A colon inside the registry host (`registry:5000/...`) is not a tag
    /// separator.
    pub fn parse(reference: &str) -> Self {
        match reference.rsplit_once(':') {
            Some((name, tag)) if !tag.contains('/') => Self {
                name: name.to_string(),
                tag: tag.to_string(),
            },
            _ => Self {
                name: reference.to_string(),
                tag: "latest".to_string(),
            },
        }
    }

    /// Parse `reference` and require it to be an Ignition image, possibly
    /// pulled through a registry mirror.
    pub fn parse_compatible(reference: &str) -> Result<Self> {
        let image = Self::parse(reference);
        if !image.is_compatible() {
            return Err(IgnitionError::IncompatibleImage {
                image: reference.to_string(),
                expected: IGNITION_IMAGE,
            });
        }
        Ok(image)
    }

    pub fn is_compatible(&self) -> bool {
        self.name == IGNITION_IMAGE || self.name.ends_with(&format!("/{IGNITION_IMAGE}"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl std::fmt::Display for ImageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

/// A fully configured Ignition image, ready to be started.
///
/// Produced by [`IgnitionContainer::prepare`](crate::IgnitionContainer::prepare);
/// the launch plan it carries is fixed.
#[derive(Debug)]
pub struct IgnitionImage {
    image: ImageName,
    plan: LaunchPlan,
    copies: Vec<CopyToContainer>,
    ports: Vec<ContainerPort>,
    ready_conditions: Vec<WaitFor>,
}

impl IgnitionImage {
    pub(crate) fn new(image: ImageName, plan: LaunchPlan, ready_conditions: Vec<WaitFor>) -> Self {
        let copies = plan
            .files
            .iter()
            .map(|file| CopyToContainer::new(file.source.clone(), file.target.clone()))
            .collect();
        let ports = plan
            .exposed_ports
            .iter()
            .map(|port| ContainerPort::Tcp(*port))
            .collect();

        Self {
            image,
            plan,
            copies,
            ports,
            ready_conditions,
        }
    }

    pub fn image_name(&self) -> &ImageName {
        &self.image
    }

    pub fn plan(&self) -> &LaunchPlan {
        &self.plan
    }
}

impl Image for IgnitionImage {
    fn name(&self) -> &str {
        self.image.name()
    }

    fn tag(&self) -> &str {
        self.image.tag()
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        self.ready_conditions.clone()
    }

    fn env_vars(
        &self,
    ) -> impl IntoIterator<Item = (impl Into<Cow<'_, str>>, impl Into<Cow<'_, str>>)> {
        &self.plan.env
    }

    fn copy_to_sources(&self) -> impl IntoIterator<Item = &CopyToContainer> {
        &self.copies
    }

    fn cmd(&self) -> impl IntoIterator<Item = impl Into<Cow<'_, str>>> {
        &self.plan.args
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        &self.ports
    }
}
