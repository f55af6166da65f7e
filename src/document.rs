//! Creating PDF documents.
//!
//! This is a thin layer on top of the pattern builders: a [`Document`] is a list of
//! pages, each with a size, a resource dictionary and a content stream. Patterns and
//! color spaces are registered in a page's resources, and the returned names are
//! then used in the page's content stream.
//!
//! ```
//! use pdftile::color::{DeviceColorSpace, PatternColorSpace};
//! use pdftile::document::Document;
//! use pdftile::geom::BBox;
//! use pdftile::path::{FillRule, PaintMode};
//! use pdftile::pattern::{PaintType, TilingPatternBuilder, TilingType};
//!
//! # fn main() -> pdftile::error::TileResult<()> {
//! let pattern = TilingPatternBuilder::new(
//!     PaintType::Uncolored,
//!     TilingType::ConstantSpacing,
//!     BBox::from_size(12.0, 12.0),
//!     10.0,
//!     10.0,
//!     "2 J 0 0 m 12 12 l S",
//! )
//! .build()?;
//!
//! let mut document = Document::new();
//! let page = document.start_page(100.0, 100.0)?;
//! let (resources, mut content) = page.resources_and_content();
//! let cs = resources.add_color_space(PatternColorSpace::uncolored(DeviceColorSpace::Cmyk))?;
//! let p = resources.add_pattern(&pattern)?;
//!
//! content.set_fill_color_space(&cs);
//! content.set_fill_pattern(&p, Some(&[1.0, 0.0, 0.0, 0.0]))?;
//! content.rect(10.0, 10.0, 80.0, 80.0)?;
//! content.paint(PaintMode::Fill(FillRule::NonZero));
//!
//! let pdf = document.finish()?;
//! assert!(pdf.starts_with(b"%PDF-1.7"));
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::content::ContentEmitter;
use crate::error::{TileError, TileResult};
use crate::resource::ResourceDictionary;
use crate::serialize::{SerializeContext, SerializeSettings};

/// A PDF document.
pub struct Document {
    settings: SerializeSettings,
    pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document with default settings.
    pub fn new() -> Self {
        Self::new_with(SerializeSettings::default())
    }

    /// Create a new document with specific serialization settings.
    pub fn new_with(settings: SerializeSettings) -> Self {
        Self {
            settings,
            pages: Vec::new(),
        }
    }

    /// Add a new page with the given size in points and return it.
    pub fn start_page(&mut self, width: f32, height: f32) -> TileResult<&mut Page> {
        let page = Page::new(width, height)?;
        self.pages.push(page);

        // Just pushed.
        let index = self.pages.len() - 1;
        Ok(&mut self.pages[index])
    }

    /// The pages added so far.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Write the document to a PDF.
    ///
    /// Fails with an [`EncodingError`] if a resource contains a number that isn't
    /// finite.
    ///
    /// [`EncodingError`]: TileError::EncodingError
    pub fn finish(mut self) -> TileResult<Vec<u8>> {
        // Write empty page if none has been created yet.
        if self.pages.is_empty() {
            self.start_page(595.0, 842.0)?;
        }

        debug!("writing document with {} pages", self.pages.len());

        let mut sc = SerializeContext::new(self.settings);
        let catalog_ref = sc.new_ref();
        let page_tree_ref = sc.new_ref();
        let page_refs = self
            .pages
            .iter()
            .map(|page| sc.add_page(page, page_tree_ref))
            .collect::<TileResult<Vec<_>>>()?;

        Ok(sc.finish(catalog_ref, page_tree_ref, page_refs).finish())
    }
}

/// A single page.
///
/// The page owns its resource dictionary and its content stream. Operators are
/// appended to the content stream in the order they are emitted.
#[derive(Debug, Clone)]
pub struct Page {
    width: f32,
    height: f32,
    resources: ResourceDictionary,
    content: Vec<u8>,
}

impl Page {
    fn new(width: f32, height: f32) -> TileResult<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(TileError::InvalidParameter(format!(
                "invalid page size {width}x{height}"
            )));
        }

        Ok(Self {
            width,
            height,
            resources: ResourceDictionary::new(),
            content: Vec::new(),
        })
    }

    /// The width of the page.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// The height of the page.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The resource dictionary of the page.
    pub fn resources(&self) -> &ResourceDictionary {
        &self.resources
    }

    /// The resource dictionary of the page, mutably.
    pub fn resources_mut(&mut self) -> &mut ResourceDictionary {
        &mut self.resources
    }

    /// An emitter that appends to the content stream of the page.
    pub fn content(&mut self) -> ContentEmitter<'_, Vec<u8>> {
        ContentEmitter::new(&mut self.content)
    }

    /// The resource dictionary and a content emitter at the same time.
    pub fn resources_and_content(
        &mut self,
    ) -> (&mut ResourceDictionary, ContentEmitter<'_, Vec<u8>>) {
        (&mut self.resources, ContentEmitter::new(&mut self.content))
    }

    /// The bytes of the content stream emitted so far.
    pub fn content_bytes(&self) -> &[u8] {
        &self.content
    }
}
