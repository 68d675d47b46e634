//! PDF fixtures generated with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// A run of text placed with its own BT/ET block.
pub struct Run {
    pub font: &'static str,
    pub text: &'static str,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

pub fn run(font: &'static str, text: &'static str, size: f32, y: f32) -> Run {
    Run {
        font,
        text,
        size,
        x: 72.0,
        y,
    }
}

pub fn run_at(font: &'static str, text: &'static str, size: f32, x: f32, y: f32) -> Run {
    Run {
        font,
        text,
        size,
        x,
        y,
    }
}

pub fn body(text: &'static str, y: f32) -> Run {
    run("F1", text, 11.0, y)
}

fn page_content(runs: &[Run]) -> Vec<u8> {
    let mut operations = Vec::new();
    for r in runs {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![r.font.into(), r.size.into()]));
        operations.push(Operation::new("Td", vec![r.x.into(), r.y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(r.text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }.encode().unwrap()
}

/// Build a PDF with Helvetica as F1 and Helvetica-Bold as F2.
pub fn build_pdf(title: Option<&str>, pages: &[Vec<Run>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for runs in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(runs)));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
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
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
