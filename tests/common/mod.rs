//! Shared fixture builders for integration tests.
#![allow(dead_code)]

use docx_redline::{Package, PartUri};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Route library debug logs into the test harness.
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const CONTENT_TYPES: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "<Override PartName=\"/word/settings.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml\"/>",
    "<Override PartName=\"/word/comments.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.comments+xml\"/>",
    "</Types>"
);

const ROOT_RELS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "</Relationships>"
);

const DOCUMENT: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n",
    "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
    "<w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"
);

/// A settings part the way Word writes one, with or without the
/// track-revisions marker in the middle of the element list.
pub fn settings_xml(tracked: bool) -> String {
    let marker = if tracked { "<w:trackRevisions/>" } else { "" };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n\
         <w:settings xmlns:w=\"{W_NS}\">\
         <w:zoom w:percent=\"100\"/>\
         <w:proofState w:spelling=\"clean\" w:grammar=\"clean\"/>{marker}\
         <w:defaultTabStop w:val=\"708\"/>\
         </w:settings>"
    )
}

/// A comments part with one comment per author, in the given order.
pub fn comments_xml(authors: &[&str]) -> String {
    let mut body = String::new();
    for (i, author) in authors.iter().enumerate() {
        let initials: String = author
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect();
        body.push_str(&format!(
            "<w:comment w:id=\"{i}\" w:author=\"{author}\" \
             w:date=\"2024-03-01T09:0{i}:00Z\" w:initials=\"{initials}\">\
             <w:p><w:r><w:t>Comment {i}</w:t></w:r></w:p></w:comment>"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n\
         <w:comments xmlns:w=\"{W_NS}\">{body}</w:comments>"
    )
}

/// Build a DOCX container with the standard plumbing parts plus the
/// given settings and comments parts.
pub fn docx_with(settings: Option<&str>, comments: Option<&str>) -> Vec<u8> {
    let mut entries: Vec<(&str, &str)> = vec![
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", DOCUMENT),
    ];
    if let Some(settings) = settings {
        entries.push(("word/settings.xml", settings));
    }
    if let Some(comments) = comments {
        entries.push(("word/comments.xml", comments));
    }

    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    for (name, content) in entries {
        zip.start_file(name, SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
    buffer.into_inner()
}

/// Extract one part of a serialized document as text.
pub fn part_text(bytes: &[u8], name: &str) -> String {
    let package = Package::from_bytes(bytes).expect("reopen package");
    let uri = PartUri::new(name).expect("part uri");
    let part = package.part(&uri).unwrap_or_else(|| panic!("part {} missing", name));
    String::from_utf8(part.data().to_vec()).expect("part is UTF-8")
}
