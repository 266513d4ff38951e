//! DOCX body text via `zip` + `roxmltree`.
//!
//! Output layout:
//!
//! - every top-level body paragraph, each followed by `\n`
//! - then every top-level table, row by row: each cell's text followed by a
//!   space, each row followed by `\n`
//!
//! A cell's text is its paragraphs joined with `\n`. Headers, footers,
//! footnotes and text boxes are not read.

use crate::{CvHarvestError, Result};
use roxmltree::{Document, Node};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text_from_path(path: &Path) -> Result<String> {
    // IO errors must bubble up unchanged
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let xml = read_document_part(bytes)?;
    let doc = Document::parse(&xml)?;

    let body = doc
        .root_element()
        .children()
        .find(|n| is_w(n, "body"))
        .ok_or_else(|| CvHarvestError::parsing("DOCX document has no body"))?;

    let mut text = String::new();

    for paragraph in body.children().filter(|n| is_w(n, "p")) {
        text.push_str(&paragraph_text(paragraph));
        text.push('\n');
    }

    for table in body.children().filter(|n| is_w(n, "tbl")) {
        for row in table.children().filter(|n| is_w(n, "tr")) {
            for cell in row.children().filter(|n| is_w(n, "tc")) {
                text.push_str(&cell_text(cell));
                text.push(' ');
            }
            text.push('\n');
        }
    }

    Ok(text)
}

fn read_document_part(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(CvHarvestError::parsing(format!("DOCX is missing {}", DOCUMENT_PART)));
        }
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| CvHarvestError::parsing_with_source(format!("Failed to read {}", DOCUMENT_PART), e))?;
    Ok(xml)
}

fn is_w(node: &Node, local_name: &str) -> bool {
    node.is_element() && node.has_tag_name((WORDPROCESSING_NS, local_name))
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants().filter(|n| n.is_element()) {
        if is_w(&node, "t") {
            text.push_str(node.text().unwrap_or_default());
        } else if is_w(&node, "tab") {
            text.push('\t');
        } else if is_w(&node, "cr") || (is_w(&node, "br") && is_line_break(&node)) {
            text.push('\n');
        }
    }
    text
}

fn is_line_break(br: &Node) -> bool {
    matches!(
        br.attribute((WORDPROCESSING_NS, "type")),
        None | Some("textWrapping")
    )
}

fn cell_text(cell: Node) -> String {
    cell.children()
        .filter(|n| is_w(n, "p"))
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}
