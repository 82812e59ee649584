//! Request documents.
//!
//! ```xml
//! <?xml version="1.0" encoding="IBM-1047"?>
//! <securityrequest xmlns="http://www.ibm.com/systems/zos/saf"
//!                  xmlns:racf="http://www.ibm.com/systems/zos/racf">
//!   <user name="SQUIDWRD" operation="set" requestid="UserRequest">
//!     <base><racf:special operation="set"/></base>
//!     <omvs><racf:uid operation="set">2424</racf:uid></omvs>
//!   </user>
//! </securityrequest>
//! ```
//!
//! Written without indentation.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::encoding::TextEncoding;
use crate::error::{AdminError, Result};
use crate::profile::BASE_SEGMENT;
use crate::traits::{Trait, TraitOperation};
use crate::types::{ProfileType, RequestOperation};

/// Default namespace of request documents.
pub const SAF_NAMESPACE: &str = "http://www.ibm.com/systems/zos/saf";

/// Namespace of trait elements.
pub const RACF_NAMESPACE: &str = "http://www.ibm.com/systems/zos/racf";

/// One request to the service.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityRequest {
    profile_type: ProfileType,
    operation: RequestOperation,
    name: String,
    class: Option<String>,
    traits: Vec<Trait>,
    segments: Vec<String>,
}

impl SecurityRequest {
    /// A request for profile `name` with no traits.
    pub fn new(profile_type: ProfileType, operation: RequestOperation, name: &str) -> Self {
        Self {
            profile_type,
            operation,
            name: name.to_string(),
            class: None,
            traits: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Name the resource class (general resources and permissions).
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Attach validated traits.
    pub fn with_traits(mut self, traits: Vec<Trait>) -> Self {
        self.traits = traits;
        self
    }

    /// Ask an extract to include these segments (`base` is always listed).
    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.segments = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| s != BASE_SEGMENT)
            .collect();
        self
    }

    pub fn profile_type(&self) -> ProfileType {
        self.profile_type
    }

    pub fn operation(&self) -> RequestOperation {
        self.operation
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    /// Segments requested by an extract, excluding `base`.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Render the request document. The declaration names `encoding`; the
    /// text itself is returned unencoded.
    pub fn to_xml(&self, encoding: TextEncoding) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(encoding.xml_name()),
                None,
            )))
            .map_err(xml_error)?;

        let root = BytesStart::new("securityrequest")
            .with_attributes([("xmlns", SAF_NAMESPACE), ("xmlns:racf", RACF_NAMESPACE)]);
        writer.write_event(Event::Start(root)).map_err(xml_error)?;

        let element = self.profile_type.element();
        let mut definition = BytesStart::new(element);
        definition.push_attribute(("name", self.name.as_str()));
        if let Some(class) = &self.class {
            definition.push_attribute(("class", class.as_str()));
        }
        definition.push_attribute(("operation", self.operation.attribute()));
        definition.push_attribute(("requestid", self.profile_type.request_id()));
        writer.write_event(Event::Start(definition)).map_err(xml_error)?;

        if self.operation == RequestOperation::Extract {
            for segment in &self.segments {
                writer
                    .write_event(Event::Empty(BytesStart::new(segment.as_str())))
                    .map_err(xml_error)?;
            }
        } else {
            self.write_traits(&mut writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(element)))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("securityrequest")))
            .map_err(xml_error)?;

        String::from_utf8(writer.into_inner()).map_err(|e| AdminError::Encoding {
            message: e.to_string(),
        })
    }

    /// Traits grouped by segment, segments in order of first appearance.
    /// Permission requests carry their base traits directly.
    fn write_traits(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut segments: Vec<&str> = Vec::new();
        for t in &self.traits {
            if !segments.contains(&t.segment.as_str()) {
                segments.push(&t.segment);
            }
        }

        for segment in segments {
            let wrapped = !(self.profile_type == ProfileType::Permission && segment == BASE_SEGMENT);
            if wrapped {
                writer
                    .write_event(Event::Start(BytesStart::new(segment)))
                    .map_err(xml_error)?;
            }
            for t in self.traits.iter().filter(|t| t.segment == segment) {
                write_trait(writer, t)?;
            }
            if wrapped {
                writer
                    .write_event(Event::End(BytesEnd::new(segment)))
                    .map_err(xml_error)?;
            }
        }
        Ok(())
    }
}

fn write_trait(writer: &mut Writer<Vec<u8>>, t: &Trait) -> Result<()> {
    let mut start = BytesStart::new(t.element.as_str());
    start.push_attribute(("operation", t.operation.attribute()));

    let text = match t.operation {
        TraitOperation::Delete => None,
        _ => t.value.text(),
    };
    match text {
        None => writer.write_event(Event::Empty(start)).map_err(xml_error)?,
        Some(text) => {
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(t.element.as_str())))
                .map_err(xml_error)?;
        }
    }
    Ok(())
}

fn xml_error(err: impl std::fmt::Display) -> AdminError {
    AdminError::Encoding {
        message: format!("could not write request XML: {err}"),
    }
}
