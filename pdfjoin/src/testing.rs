//! In-memory PDF fixtures for unit tests.
//!
//! Page widths double as page labels: merged order is checked by reading
//! `MediaBox` widths back.

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::document::SourceDocument;

fn media_box(width: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(792),
    ])
}

fn save(
    mut doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    extra: lopdf::Dictionary,
) -> Vec<u8> {
    let count = kids.len() as i64;
    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    for (key, value) in extra.iter() {
        pages.set(key.clone(), value.clone());
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn add_content(doc: &mut Document, width: i64) -> ObjectId {
    let content = format!("BT /F1 12 Tf 72 720 Td (page {width}) Tj ET");
    doc.add_object(Stream::new(dictionary! {}, content.into_bytes()))
}

fn add_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    })
}

/// A PDF with one page per entry of `widths`.
pub(crate) fn pdf_with_pages(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc);

    let mut kids = Vec::new();
    for &width in widths {
        let content_id = add_content(&mut doc, width);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box(width),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    save(doc, pages_id, kids, dictionary! {})
}

/// A PDF whose pages inherit `MediaBox` and `Resources` from the root node.
pub(crate) fn pdf_with_inherited_media_box(width: i64, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = add_resources(&mut doc);

    let mut kids = Vec::new();
    for _ in 0..pages {
        let content_id = add_content(&mut doc, width);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    save(
        doc,
        pages_id,
        kids,
        dictionary! {
            "MediaBox" => media_box(width),
            "Resources" => resources_id,
        },
    )
}

/// Width of a page's `MediaBox`.
pub(crate) fn page_width(doc: &Document, page_id: ObjectId) -> i64 {
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    media_box[2].as_i64().unwrap()
}

/// Widths of every page of a serialized PDF, in page order.
pub(crate) fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| page_width(&doc, id))
        .collect()
}

/// A named source document with one page per width.
pub(crate) fn source(name: &str, widths: &[i64]) -> SourceDocument {
    SourceDocument::new(name, pdf_with_pages(widths))
}

/// A named source document that is not a PDF.
pub(crate) fn garbage(name: &str) -> SourceDocument {
    SourceDocument::new(name, b"this is not a pdf".to_vec())
}
