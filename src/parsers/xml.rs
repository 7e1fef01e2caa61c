//! XML parser
//!
//! `tag` selects the elements; `attr` reads an attribute instead of the
//! element text; `idAttr` names the identifier attribute. Without an
//! identifier attribute the row id is the first raw line containing both
//! `<tag` and the value, falling back to the element's own start line.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::core::models::{Arguments, ParsedLine, ParserArgument};
use crate::core::ports::{ParseError, ParserCapability};

const TAG: &str = "tag";
const ATTR: &str = "attr";
const ID_ATTR: &str = "idAttr";

/// XML file parser
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

/// Raw line with the basic entities decoded
fn unescape(line: &str) -> String {
    line.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

fn element_value(node: Node<'_, '_>, attr: Option<&str>) -> String {
    match attr {
        Some(attr) => node.attribute(attr).unwrap_or_default().trim().to_string(),
        None => node.text().unwrap_or_default().trim().to_string(),
    }
}

/// Extract lines from XML content
pub fn read_xml(content: &str, arguments: &Arguments, resource: &str) -> Result<Vec<ParsedLine>, ParseError> {
    let tag = arguments.require(TAG)?;
    let attr = arguments.get(ATTR).filter(|a| !a.is_empty());
    let id_attr = arguments.get(ID_ATTR).filter(|a| !a.is_empty());

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(content, options).map_err(|e| ParseError::resource(resource, e))?;
    let raw_lines: Vec<String> = content.lines().map(unescape).collect();
    let opening = format!("<{tag}");

    let lines = doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == tag)
        .filter_map(|node| {
            let value = element_value(node, attr);
            if value.is_empty() {
                return None;
            }
            let row_id = id_attr
                .and_then(|id| node.attribute(id))
                .map(|id| id.trim().to_string())
                .unwrap_or_else(|| {
                    raw_lines
                        .iter()
                        .position(|raw| raw.contains(&opening) && raw.contains(&value))
                        .map_or_else(
                            || doc.text_pos_at(node.range().start).row.to_string(),
                            |i| (i + 1).to_string(),
                        )
                });
            Some(ParsedLine::new(row_id, value))
        })
        .collect();
    Ok(lines)
}

impl ParserCapability for XmlParser {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn arguments(&self) -> Vec<ParserArgument> {
        vec![
            ParserArgument::required(TAG),
            ParserArgument::optional(ATTR),
            ParserArgument::optional(ID_ATTR),
        ]
    }

    fn parse(&self, resource: &str, arguments: &Arguments) -> Result<Vec<ParsedLine>, ParseError> {
        arguments.require(TAG)?;
        let content = fs::read_to_string(resource).map_err(|e| ParseError::resource(resource, e))?;
        read_xml(&content, arguments, resource)
    }

    fn validate_resource(&self, resource: &str) -> Option<bool> {
        Some(
            Path::new(resource)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml")),
        )
    }
}
