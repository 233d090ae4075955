//! Document model over `word/document.xml`.
//!
//! The body is read into a list of [`BlockItem`]s in source order. Only
//! top-level paragraphs and tables become blocks; section properties,
//! content controls and any other body child are dropped here.

use std::path::Path;

use anyhow::{anyhow, Context};

use crate::error::{Error, Result};

use super::package::{DocxPackage, DOCUMENT_PART};
use super::xml::{parse_xml_part, XmlElement};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockItem {
    Paragraph(Paragraph),
    Table(Table),
}

/// Raw paragraph text, untrimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
}

/// Cell texts per row, one entry per grid column a cell covers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct Document {
    blocks: Vec<BlockItem>,
}

impl Document {
    pub fn open(path: &Path) -> Result<Self> {
        DocxPackage::read(path)
            .and_then(|pkg| Self::parse_package(&pkg))
            .map_err(|e| open_error(Some(path), e))
    }

    /// Reads a whole `.docx` package held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        DocxPackage::from_bytes(bytes)
            .and_then(|pkg| Self::parse_package(&pkg))
            .map_err(|e| open_error(None, e))
    }

    /// Parses a bare `document.xml` part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        Self::parse_document_xml(xml).map_err(|e| open_error(None, e))
    }

    fn parse_package(pkg: &DocxPackage) -> anyhow::Result<Self> {
        let xml = pkg
            .part(DOCUMENT_PART)
            .ok_or_else(|| anyhow!("missing {DOCUMENT_PART}"))?;
        Self::parse_document_xml(xml)
    }

    fn parse_document_xml(xml: &[u8]) -> anyhow::Result<Self> {
        let part = parse_xml_part(DOCUMENT_PART, xml)
            .with_context(|| format!("parse {DOCUMENT_PART}"))?;
        let root = part.root()?;
        let body = root
            .child("body")
            .ok_or_else(|| anyhow!("{DOCUMENT_PART} has no w:body"))?;

        let blocks = body
            .elements()
            .filter_map(|child| match child.local_name() {
                "p" => Some(BlockItem::Paragraph(Paragraph {
                    text: paragraph_text(child),
                })),
                "tbl" => Some(BlockItem::Table(Table {
                    rows: table_rows(child),
                })),
                _ => None,
            })
            .collect();
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[BlockItem] {
        &self.blocks
    }
}

fn open_error(path: Option<&Path>, err: anyhow::Error) -> Error {
    Error::DocumentOpen {
        path: path.map(Path::to_path_buf),
        reason: format!("{err:#}"),
    }
}

fn paragraph_text(p: &XmlElement) -> String {
    let mut out = String::new();
    for child in p.elements() {
        match child.local_name() {
            "r" => run_text(child, &mut out),
            "hyperlink" => {
                for r in child.elements_named("r") {
                    run_text(r, &mut out);
                }
            }
            _ => {}
        }
    }
    out
}

fn run_text(r: &XmlElement, out: &mut String) {
    for child in r.elements() {
        match child.local_name() {
            "t" => out.push_str(&child.text()),
            "tab" | "ptab" => out.push('\t'),
            "cr" => out.push('\n'),
            "br" => {
                // Page and column breaks are layout, not text.
                if child.attr("type").unwrap_or("textWrapping") == "textWrapping" {
                    out.push('\n');
                }
            }
            "noBreakHyphen" => out.push('-'),
            _ => {}
        }
    }
}

fn cell_text(tc: &XmlElement) -> String {
    tc.elements_named("p")
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn int_val(el: Option<&XmlElement>) -> Option<usize> {
    el.and_then(|e| e.attr("val"))
        .and_then(|v| v.trim().parse::<usize>().ok())
}

/// Word caps a table at 63 grid columns.
const MAX_GRID_COLUMNS: usize = 63;

/// Upper bound for `gridBefore`/`gridSpan`: the declared `w:tblGrid` width,
/// or [`MAX_GRID_COLUMNS`] when the grid is missing or wider than that.
fn grid_width(tbl: &XmlElement) -> usize {
    tbl.child("tblGrid")
        .map(|g| g.elements_named("gridCol").count())
        .filter(|&n| n > 0)
        .unwrap_or(MAX_GRID_COLUMNS)
        .min(MAX_GRID_COLUMNS)
}

fn table_rows(tbl: &XmlElement) -> Vec<Vec<String>> {
    let max_cols = grid_width(tbl);
    let mut rows: Vec<Vec<String>> = Vec::new();
    // Text per grid column of the previous row, for vertical merges.
    let mut above: Vec<String> = Vec::new();

    for tr in tbl.elements_named("tr") {
        let grid_before = int_val(tr.child("trPr").and_then(|p| p.child("gridBefore")))
            .unwrap_or(0)
            .min(max_cols);
        let mut by_col: Vec<String> = vec![String::new(); grid_before];
        let mut cells: Vec<String> = Vec::new();

        for tc in tr.elements_named("tc") {
            let tc_pr = tc.child("tcPr");
            let span = int_val(tc_pr.and_then(|p| p.child("gridSpan")))
                .unwrap_or(1)
                .clamp(1, max_cols);
            let continues_merge = tc_pr
                .and_then(|p| p.child("vMerge"))
                .map(|v| v.attr("val").unwrap_or("continue") != "restart")
                .unwrap_or(false);

            let own = if continues_merge {
                None
            } else {
                Some(cell_text(tc))
            };
            for _ in 0..span {
                let text = match &own {
                    Some(t) => t.clone(),
                    None => above.get(by_col.len()).cloned().unwrap_or_default(),
                };
                by_col.push(text.clone());
                cells.push(text);
            }
        }

        above = by_col;
        rows.push(cells);
    }
    rows
}
