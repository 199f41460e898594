//! `document.xml` generation using quick-xml.

use chrono::NaiveDateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use uuid::Uuid;

use crate::core::DatevError;

/// One attachment listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub guid: Uuid,
    pub file_name: String,
    /// `2` sales, `1` purchase, omitted otherwise.
    pub document_type: Option<u8>,
}

/// Generate the `document.xml` content listing the embedded attachments.
pub fn generate_document_xml(
    documents: &[DocumentEntry],
    created_at: NaiveDateTime,
) -> Result<String, DatevError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("DocumentList")))
        .map_err(xml_err)?;

    let created = created_at.format("%Y-%m-%dT%H:%M:%S").to_string();
    write_text_element(&mut writer, "DateCreated", &created)?;

    for doc in documents {
        writer
            .write_event(Event::Start(BytesStart::new("Document")))
            .map_err(xml_err)?;
        write_text_element(&mut writer, "GUID", &doc.guid.to_string())?;
        write_text_element(&mut writer, "Filename", &doc.file_name)?;
        if let Some(t) = doc.document_type {
            write_text_element(&mut writer, "DocumentType", &t.to_string())?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("Document")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("DocumentList")))
        .map_err(xml_err)?;

    let buf = writer.into_inner().into_inner();
    String::from_utf8(buf).map_err(|e| DatevError::Xml(format!("UTF-8 error: {e}")))
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    tag: &str,
    text: &str,
) -> Result<(), DatevError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)?;
    Ok(())
}

fn xml_err(e: std::io::Error) -> DatevError {
    DatevError::Xml(format!("XML generation error: {e}"))
}
