use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::docx::body::{BlockItem, Document, Table};
use crate::error::Result;

pub const CELL_SEPARATOR: &str = " | ";
pub const ROW_SEPARATOR: &str = "\n";

/// One unit of extracted content, serialized as `{"type": ..., "content": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractedElement {
    Text { content: String },
    Table { content: String },
}

impl ExtractedElement {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Table { .. } => "table",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Text { content } | Self::Table { content } => content,
        }
    }
}

/// Opens the `.docx` at `path` and returns its paragraphs and tables in body order.
///
/// Paragraphs that are empty after trimming are dropped; every table yields one
/// element, even an empty one.
pub fn extract(path: &Path) -> Result<Vec<ExtractedElement>> {
    let doc = Document::open(path)?;
    Ok(extract_document(&doc))
}

pub fn extract_document(doc: &Document) -> Vec<ExtractedElement> {
    let mut elements = Vec::new();
    for block in doc.blocks() {
        match block {
            BlockItem::Paragraph(p) => {
                let text = p.text.trim();
                if !text.is_empty() {
                    elements.push(ExtractedElement::Text {
                        content: text.to_string(),
                    });
                }
            }
            BlockItem::Table(t) => elements.push(ExtractedElement::Table {
                content: flatten_table(t),
            }),
        }
    }
    elements
}

pub fn flatten_table(table: &Table) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.trim())
                .collect::<Vec<_>>()
                .join(CELL_SEPARATOR)
        })
        .collect::<Vec<_>>()
        .join(ROW_SEPARATOR)
}

pub fn write_elements_json(elements: &[ExtractedElement], output_json: &Path) -> anyhow::Result<()> {
    fs::write(
        output_json,
        serde_json::to_vec_pretty(elements).context("serialize elements json")?,
    )
    .with_context(|| format!("write elements json: {}", output_json.display()))?;
    Ok(())
}
