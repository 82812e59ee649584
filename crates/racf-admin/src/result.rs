//! Decoded service results.
//!
//! ```xml
//! <securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">
//!   <resource name="TESTING" class="ELIJTEST" operation="listdata" requestid="ResourceRequest">
//!     <command>
//!       <safreturncode>0</safreturncode>
//!       <returncode>0</returncode>
//!       <reasoncode>0</reasoncode>
//!       <image>RLIST   ELIJTEST             (TESTING) </image>
//!       <message>CLASS      NAME</message>
//!       ...
//!     </command>
//!   </resource>
//!   <returncode>0</returncode>
//!   <reasoncode>0</reasoncode>
//! </securityresult>
//! ```
//!
//! Element order is kept: message elements are report lines.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};
use serde::Serialize;

use crate::cursor::ReportLine;
use crate::error::{AdminError, Result};
use crate::profile::Value;
use crate::types::ProfileType;

/// One command the service ran for a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CommandResult {
    /// Report lines in order. Empty `<message/>` elements are `None`.
    pub messages: Vec<ReportLine>,
    /// Every other child (`safreturncode`, `image`, ...), integer when it
    /// parses as one.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Body of the definition element: either the commands that ran, or the
/// service's explanation of why the request was refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultPayload {
    /// Commands issued for the request.
    Commands(Vec<CommandResult>),
    /// Request-level error details (`xmlreasoncode`, `textinerror`, ...).
    Error(BTreeMap<String, Value>),
}

/// A decoded security result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityResult {
    /// Local name of the definition element (`user`, `resource`, ...).
    pub definition: String,
    /// Attributes of the definition element (`name`, `class`, `operation`, ...).
    pub attributes: BTreeMap<String, String>,
    /// Leading `<info>` texts (the command audit trail).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
    /// Commands or error details.
    #[serde(flatten)]
    pub payload: ResultPayload,
    /// Top-level return code.
    #[serde(rename = "returncode")]
    pub return_code: i64,
    /// Top-level reason code.
    #[serde(rename = "reasoncode")]
    pub reason_code: i64,
}

impl SecurityResult {
    /// Decode a result document.
    pub fn from_xml(text: &str) -> Result<Self> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "securityresult" {
            return Err(AdminError::malformed_result(format!(
                "expected <securityresult>, found <{}>",
                root.tag_name().name()
            )));
        }

        let definition = elements(root)
            .next()
            .ok_or_else(|| AdminError::malformed_result("result has no definition element"))?;
        let attributes = definition
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        let mut children = elements(definition).peekable();
        let mut info = Vec::new();
        while let Some(item) = children.next_if(|c| c.tag_name().name() == "info") {
            info.push(item.text().unwrap_or_default().to_string());
        }

        let payload = match children.peek() {
            Some(first) if first.tag_name().name() == "error" => {
                ResultPayload::Error(elements(*first).map(named_value).collect())
            }
            _ => ResultPayload::Commands(children.map(decode_command).collect()),
        };

        Ok(Self {
            definition: definition.tag_name().name().to_string(),
            attributes,
            info,
            payload,
            return_code: top_level_code(root, "returncode")?,
            reason_code: top_level_code(root, "reasoncode")?,
        })
    }

    /// Profile type named by the definition element.
    pub fn profile_type(&self) -> Option<ProfileType> {
        ProfileType::from_element(&self.definition)
    }

    /// Check if both codes are zero and no error payload came back.
    pub fn is_success(&self) -> bool {
        self.return_code == 0 && self.reason_code == 0 && !self.is_error()
    }

    /// Check if the definition carries an error payload.
    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResultPayload::Error(_))
    }

    /// The commands that ran (empty for an error payload).
    pub fn commands(&self) -> &[CommandResult] {
        match &self.payload {
            ResultPayload::Commands(commands) => commands,
            ResultPayload::Error(_) => &[],
        }
    }

    /// Report lines of the first command.
    pub fn messages(&self) -> &[ReportLine] {
        self.commands()
            .first()
            .map(|command| command.messages.as_slice())
            .unwrap_or_default()
    }

    /// Error details, when the service refused the request.
    pub fn error_details(&self) -> Option<&BTreeMap<String, Value>> {
        match &self.payload {
            ResultPayload::Error(details) => Some(details),
            ResultPayload::Commands(_) => None,
        }
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|c| c.is_element())
}

/// Integer when the trimmed text parses as one, text otherwise, null when empty.
fn element_value(node: Node<'_, '_>) -> Value {
    match node.text() {
        None => Value::Null,
        Some(text) => match text.trim().parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Str(text.to_string()),
        },
    }
}

fn named_value(node: Node<'_, '_>) -> (String, Value) {
    (node.tag_name().name().to_string(), element_value(node))
}

fn decode_command(node: Node<'_, '_>) -> CommandResult {
    let mut command = CommandResult::default();
    for item in elements(node) {
        if item.tag_name().name() == "message" {
            command
                .messages
                .push(item.text().filter(|t| !t.is_empty()).map(str::to_string));
        } else {
            let (name, value) = named_value(item);
            command.fields.insert(name, value);
        }
    }
    command
}

fn top_level_code(root: Node<'_, '_>, name: &str) -> Result<i64> {
    let node = elements(root)
        .skip(1)
        .find(|c| c.tag_name().name() == name)
        .ok_or_else(|| AdminError::malformed_result(format!("result has no <{name}>")))?;
    let text = node.text().unwrap_or_default().trim();
    text.parse().map_err(|_| {
        AdminError::malformed_result(format!("<{name}> is not a number: '{text}'"))
    })
}
