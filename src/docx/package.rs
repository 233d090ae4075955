use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use anyhow::Context;
use zip::ZipArchive;

pub const DOCUMENT_PART: &str = "word/document.xml";

/// All non-directory entries of a `.docx` container, loaded into memory.
pub struct DocxPackage {
    pub entries: Vec<DocxEntry>,
}

pub struct DocxEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl DocxPackage {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let f = File::open(path).with_context(|| format!("open docx: {}", path.display()))?;
        Self::from_reader(f)
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> anyhow::Result<Self> {
        let mut zip = ZipArchive::new(reader).context("read zip")?;
        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let mut file = zip.by_index(i).context("zip entry")?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .with_context(|| format!("read zip entry: {}", file.name()))?;
            entries.push(DocxEntry {
                name: file.name().to_string(),
                data,
            });
        }
        Ok(Self { entries })
    }

    /// Looks up a part by name. Zip entry names are compared case-insensitively
    /// since some producers write `Word/Document.xml`.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .or_else(|| self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name)))
            .map(|e| e.data.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::{DocxPackage, DOCUMENT_PART};

    fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zout = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, data) in entries {
            zout.start_file(*name, SimpleFileOptions::default())
                .expect("start file");
            zout.write_all(data).expect("write");
        }
        zout.finish().expect("finish").into_inner()
    }

    #[test]
    fn part_lookup_falls_back_to_case_insensitive() {
        let bytes = zip_with(&[
            ("Word/Document.xml", &b"<x/>"[..]),
            ("[Content_Types].xml", &b""[..]),
        ]);
        let pkg = DocxPackage::from_bytes(&bytes).expect("read");
        assert_eq!(pkg.entries.len(), 2);
        assert_eq!(pkg.part(DOCUMENT_PART), Some(&b"<x/>"[..]));
        assert!(pkg.part("word/styles.xml").is_none());
    }

    #[test]
    fn rejects_non_zip_bytes() {
        assert!(DocxPackage::from_bytes(b"definitely not a zip").is_err());
    }
}
