//! Dealing with PDF resources.
//!
//! Content streams refer to color spaces, patterns and graphics states by name. The
//! names are looked up in the resource dictionary of the page (or pattern) that owns
//! the content stream. [`ResourceDictionary`] adds new resources to such a dictionary
//! under freshly allocated names, while leaving every entry that is already present
//! untouched.

use log::debug;

use crate::error::{TileError, TileResult};
use crate::object::{Dict, Name, Object};
use crate::pattern::TilingPattern;

/// The maximum number of candidate names that are tried for a single resource.
pub const MAX_NAME_CANDIDATES: u32 = 65_536;

pub(crate) trait ResourceKind {
    /// The key of the category in the resource dictionary.
    fn get_key() -> &'static str;
    /// The prefix of generated names.
    fn get_prefix() -> &'static str;
}

pub(crate) struct ColorSpace;

impl ResourceKind for ColorSpace {
    fn get_key() -> &'static str {
        "ColorSpace"
    }

    fn get_prefix() -> &'static str {
        "cs"
    }
}

pub(crate) struct Pattern;

impl ResourceKind for Pattern {
    fn get_key() -> &'static str {
        "Pattern"
    }

    fn get_prefix() -> &'static str {
        "p"
    }
}

pub(crate) struct ExtGState;

impl ResourceKind for ExtGState {
    fn get_key() -> &'static str {
        "ExtGState"
    }

    fn get_prefix() -> &'static str {
        "gs"
    }
}

/// A resource dictionary.
///
/// Names are never reused or removed: every call returns a name that is not yet
/// used in its category. If a call fails, the dictionary is left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDictionary {
    dict: Dict,
}

impl ResourceDictionary {
    /// Create a new, empty resource dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing resource dictionary. All of its entries are preserved.
    pub fn from_dict(dict: Dict) -> Self {
        Self { dict }
    }

    /// The underlying dictionary.
    pub fn as_dict(&self) -> &Dict {
        &self.dict
    }

    /// Return the underlying dictionary.
    pub fn into_dict(self) -> Dict {
        self.dict
    }

    /// Look up a resource by its category and name.
    pub fn get(&self, category: &str, name: &Name) -> Option<&Object> {
        self.dict
            .get(category)?
            .as_dict()?
            .get(name.as_str())
    }

    /// Add a color space, e.g. a [`PatternColorSpace`], and return its name.
    ///
    /// [`PatternColorSpace`]: crate::color::PatternColorSpace
    pub fn add_color_space(&mut self, color_space: impl Into<Object>) -> TileResult<Name> {
        self.add::<ColorSpace>(color_space.into(), MAX_NAME_CANDIDATES)
    }

    /// Add a tiling pattern and return its name.
    ///
    /// The pattern is shared, not copied, so adding the same pattern to several
    /// dictionaries references one stream object.
    pub fn add_pattern(&mut self, pattern: &TilingPattern) -> TileResult<Name> {
        self.add::<Pattern>(pattern.to_object(), MAX_NAME_CANDIDATES)
    }

    /// Add an external graphics state and return its name.
    pub fn add_ext_g_state(&mut self, ext_g_state: Dict) -> TileResult<Name> {
        self.add::<ExtGState>(Object::Dict(ext_g_state), MAX_NAME_CANDIDATES)
    }

    fn add<R: ResourceKind>(&mut self, object: Object, max_candidates: u32) -> TileResult<Name> {
        let key = R::get_key();
        // Only inserted if the key is missing, so it never replaces anything.
        let category = match self
            .dict
            .get_or_insert_with(Name::from_static(key), || Object::Dict(Dict::new()))
        {
            Object::Dict(category) => category,
            other => {
                return Err(TileError::InvalidParameter(format!(
                    "/{key} entry of resource dictionary is a {}, not a dictionary",
                    other.type_name()
                )))
            }
        };

        let name = next_free_name(category, R::get_prefix(), max_candidates)?;
        category.insert(name.clone(), object);
        debug!("registered /{key} resource as {name}");

        Ok(name)
    }
}

impl From<Dict> for ResourceDictionary {
    fn from(value: Dict) -> Self {
        Self::from_dict(value)
    }
}

impl From<ResourceDictionary> for Object {
    fn from(value: ResourceDictionary) -> Self {
        Object::Dict(value.dict)
    }
}

/// Find the first name `<prefix><n>`, with `n` counting up from 1, that is not a key
/// of `dict`.
fn next_free_name(dict: &Dict, prefix: &'static str, max_candidates: u32) -> TileResult<Name> {
    for index in 1..=max_candidates {
        let candidate = format!("{prefix}{index}");
        if !dict.contains_key(&candidate) {
            return Name::new(candidate);
        }
    }

    Err(TileError::ResourceExhausted {
        prefix,
        attempts: max_candidates,
    })
}
