//! In-memory PDF and DOCX fixtures shared by the integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PDF: &str = "application/pdf";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// ToUnicode map for the Arabic test font: 1 ب, 2 ا, 3 م, 4 ل.
const ARABIC_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CMapName /Arabic-Test def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
4 beginbfchar
<0001> <0628>
<0002> <0627>
<0003> <0645>
<0004> <0644>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

// ============================================================================
// PDF
// ============================================================================

/// Build a PDF with one page per entry. `F1` is Helvetica, `F2` an Arabic
/// Type0 font with 2-byte codes; both are inherited from the page tree.
pub fn build_pdf(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let helvetica = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let arabic = arabic_font(&mut doc);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => helvetica, "F2" => arabic },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn arabic_font(doc: &mut Document) -> ObjectId {
    let to_unicode = doc.add_object(Stream::new(dictionary! {}, ARABIC_CMAP.as_bytes().to_vec()));
    let cid_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => "ArabicSans",
        "DW" => 600,
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "ArabicSans",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![cid_font.into()],
        "ToUnicode" => to_unicode,
    })
}

/// `BT /F1 12 Tf 1 0 0 1 x y Tm (text) Tj ET`
pub fn latin_at(text: &str, x: i64, y: i64) -> Vec<Operation> {
    show_at("F1", Object::string_literal(text), x, y)
}

/// Arabic run from 2-byte codes of the test font.
pub fn arabic_at(codes: &[u16], x: i64, y: i64) -> Vec<Operation> {
    let bytes = codes.iter().flat_map(|c| c.to_be_bytes()).collect();
    show_at("F2", Object::String(bytes, StringFormat::Hexadecimal), x, y)
}

fn show_at(font: &str, text: Object, x: i64, y: i64) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), 12.into()]),
        Operation::new("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), x.into(), y.into()]),
        Operation::new("Tj", vec![text]),
        Operation::new("ET", vec![]),
    ]
}

/// Flatten per-run operation lists into one page.
pub fn page(runs: Vec<Vec<Operation>>) -> Vec<Operation> {
    runs.into_iter().flatten().collect()
}

// ============================================================================
// DOCX
// ============================================================================

/// Wrap body XML in a `word/document.xml` part.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    )
}

/// Zip the given parts into a DOCX archive.
pub fn build_zip(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Minimal DOCX whose body is `body`.
pub fn build_docx(body: &str) -> Vec<u8> {
    build_zip(&[
        ("[Content_Types].xml", r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#),
        ("word/document.xml", &document_xml(body)),
    ])
}
