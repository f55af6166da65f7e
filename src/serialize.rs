//! Writing the object graph with `pdf-writer`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use log::trace;
use pdf_writer::{Chunk, Filter, Finish, Obj, Pdf, Ref};

use crate::document::Page;
use crate::error::TileResult;
use crate::object::{Dict, Object, Stream};
use crate::util::{check_finite, deflate_encode, NameExt};

/// The PDF version of the written file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PdfVersion {
    /// PDF 1.4.
    Pdf14,
    /// PDF 1.7.
    #[default]
    Pdf17,
}

impl PdfVersion {
    /// The version as it appears in the file header.
    pub fn as_str(&self) -> &str {
        match self {
            PdfVersion::Pdf14 => "PDF-1.4",
            PdfVersion::Pdf17 => "PDF-1.7",
        }
    }

    pub(crate) fn set_version(&self, pdf: &mut Pdf) {
        match self {
            PdfVersion::Pdf14 => pdf.set_version(1, 4),
            PdfVersion::Pdf17 => pdf.set_version(1, 7),
        };
    }
}

/// Settings that should be applied when writing a PDF document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeSettings {
    /// Whether the content streams of pages should be compressed.
    ///
    /// The payload of tiling patterns is always written exactly as it was given,
    /// regardless of this setting.
    pub compress_content_streams: bool,
    /// The PDF version that should be used for export.
    pub pdf_version: PdfVersion,
}

impl Default for SerializeSettings {
    fn default() -> Self {
        Self {
            compress_content_streams: false,
            pdf_version: PdfVersion::default(),
        }
    }
}

/// Keeps track of references while writing a document.
pub(crate) struct SerializeContext {
    settings: SerializeSettings,
    cur_ref: Ref,
    chunks: Vec<Chunk>,
    streams: HashMap<*const Stream, Ref>,
}

impl SerializeContext {
    pub(crate) fn new(settings: SerializeSettings) -> Self {
        Self {
            settings,
            cur_ref: Ref::new(1),
            chunks: Vec::new(),
            streams: HashMap::new(),
        }
    }

    pub(crate) fn new_ref(&mut self) -> Ref {
        self.cur_ref.bump()
    }

    /// Write a stream as an indirect object. A stream that is shared by several
    /// parents is only written once.
    pub(crate) fn add_stream(&mut self, stream: &Arc<Stream>) -> TileResult<Ref> {
        if let Some(root_ref) = self.streams.get(&Arc::as_ptr(stream)) {
            return Ok(*root_ref);
        }

        let root_ref = self.new_ref();
        self.streams.insert(Arc::as_ptr(stream), root_ref);
        trace!("writing stream {:?} with {} bytes", root_ref, stream.data().len());

        let mut chunk = Chunk::new();
        let mut writer = chunk.stream(root_ref, stream.data());
        for (key, value) in stream.dict().iter() {
            write_object(writer.insert(key.to_pdf_name()), value, self)?;
        }
        writer.finish();

        self.chunks.push(chunk);

        Ok(root_ref)
    }

    pub(crate) fn add_page(&mut self, page: &Page, page_tree_ref: Ref) -> TileResult<Ref> {
        let page_ref = self.new_ref();
        let content_ref = self.new_ref();
        trace!("writing page {:?}", page_ref);

        let mut chunk = Chunk::new();

        let mut writer = chunk.page(page_ref);
        writer.media_box(pdf_writer::Rect::new(0.0, 0.0, page.width(), page.height()));
        writer.parent(page_tree_ref);
        writer.contents(content_ref);
        write_dict(
            writer.insert(pdf_writer::Name(b"Resources")).dict(),
            page.resources().as_dict(),
            self,
        )?;
        writer.finish();

        let compress = self.settings.compress_content_streams;
        let content = if compress {
            Cow::Owned(deflate_encode(page.content_bytes()))
        } else {
            Cow::Borrowed(page.content_bytes())
        };

        let mut stream = chunk.stream(content_ref, &content);
        if compress {
            stream.filter(Filter::FlateDecode);
        }
        stream.finish();

        self.chunks.push(chunk);

        Ok(page_ref)
    }

    pub(crate) fn finish(self, catalog_ref: Ref, page_tree_ref: Ref, page_refs: Vec<Ref>) -> Pdf {
        let mut pdf = Pdf::new();
        self.settings.pdf_version.set_version(&mut pdf);

        pdf.catalog(catalog_ref).pages(page_tree_ref);
        pdf.pages(page_tree_ref)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for chunk in &self.chunks {
            pdf.extend(chunk);
        }

        pdf
    }
}

/// Write a node of the object graph. Fails if it contains a number that can't be
/// written in PDF syntax.
fn write_object(obj: Obj<'_>, object: &Object, sc: &mut SerializeContext) -> TileResult<()> {
    match object {
        Object::Bool(b) => obj.primitive(*b),
        Object::Integer(i) => obj.primitive(*i),
        Object::Real(r) => obj.primitive(check_finite(*r, "real number")?),
        Object::Name(n) => obj.primitive(n.to_pdf_name()),
        Object::Array(items) => {
            let mut array = obj.array();
            for item in items {
                write_object(array.push(), item, sc)?;
            }
        }
        Object::Dict(dict) => write_dict(obj.dict(), dict, sc)?,
        Object::Stream(stream) => {
            let stream_ref = sc.add_stream(stream)?;
            obj.primitive(stream_ref);
        }
    }

    Ok(())
}

fn write_dict(
    mut writer: pdf_writer::Dict<'_>,
    dict: &Dict,
    sc: &mut SerializeContext,
) -> TileResult<()> {
    for (key, value) in dict.iter() {
        write_object(writer.insert(key.to_pdf_name()), value, sc)?;
    }

    Ok(())
}
