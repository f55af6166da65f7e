//! The PDF object graph.
//!
//! Patterns, color spaces and resource dictionaries are built as a small tree of
//! [`Object`] nodes. The graph is only ever constructed, never parsed. Streams are
//! shared through an [`Arc`] and can't be changed anymore once they have been
//! created, so the same pattern can safely be referenced from several pages.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{TileError, TileResult};

/// The maximum length of a name in bytes.
pub(crate) const NAME_LEN: usize = 127;

/// A PDF name, written as `/Name` in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Create a new name.
    ///
    /// Returns an error if the name is empty, longer than 127 bytes or contains
    /// a NUL byte, since such a name can't be written to a PDF file.
    pub fn new(name: impl Into<String>) -> TileResult<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(TileError::EncodingError("empty name".to_string()));
        }

        if name.len() > NAME_LEN {
            return Err(TileError::EncodingError(format!(
                "name `{name}` is longer than {NAME_LEN} bytes"
            )));
        }

        if name.bytes().any(|b| b == 0) {
            return Err(TileError::EncodingError(format!(
                "name `{}` contains a NUL byte",
                name.escape_default()
            )));
        }

        Ok(Self(name))
    }

    /// Names of well-known dictionary keys, known to be valid.
    pub(crate) fn from_static(name: &'static str) -> Self {
        Self(name.to_string())
    }

    /// Return the name without the leading slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// A node in the object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i32),
    /// A real number.
    Real(f32),
    /// A name.
    Name(Name),
    /// An array of objects.
    Array(Vec<Object>),
    /// A dictionary.
    Dict(Dict),
    /// A stream. Streams are always written as indirect objects.
    Stream(Arc<Stream>),
}

impl Object {
    /// Create a number object. Integral values that fit into an `i32` are stored as
    /// integers, everything else as reals. No rounding happens in either case.
    pub fn number(value: f32) -> Self {
        // `i32::MAX as f32` rounds up to 2^31, which is out of range.
        if value.fract() == 0.0 && value >= i32::MIN as f32 && value < i32::MAX as f32 {
            Object::Integer(value as i32)
        } else {
            Object::Real(value)
        }
    }

    /// Create an array of numbers.
    pub fn numbers(values: impl IntoIterator<Item = f32>) -> Self {
        Object::Array(values.into_iter().map(Object::number).collect())
    }

    /// Return the value of a numeric object.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Return the value of an integer object.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Return the name, if the object is one.
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Return the items, if the object is an array.
    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Return the dictionary, if the object is one.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Return the stream, if the object is one.
    pub fn as_stream(&self) -> Option<&Arc<Stream>> {
        match self {
            Object::Stream(s) => Some(s),
            _ => None,
        }
    }

    /// A short description of the node type, used in error messages.
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Object::Bool(_) => "boolean",
            Object::Integer(_) => "integer",
            Object::Real(_) => "real",
            Object::Name(_) => "name",
            Object::Array(_) => "array",
            Object::Dict(_) => "dictionary",
            Object::Stream(_) => "stream",
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Bool(value)
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Object::Integer(value)
    }
}

impl From<f32> for Object {
    fn from(value: f32) -> Self {
        Object::number(value)
    }
}

impl From<Name> for Object {
    fn from(value: Name) -> Self {
        Object::Name(value)
    }
}

impl From<Vec<Object>> for Object {
    fn from(value: Vec<Object>) -> Self {
        Object::Array(value)
    }
}

impl From<Dict> for Object {
    fn from(value: Dict) -> Self {
        Object::Dict(value)
    }
}

impl From<Arc<Stream>> for Object {
    fn from(value: Arc<Stream>) -> Self {
        Object::Stream(value)
    }
}

impl From<Stream> for Object {
    fn from(value: Stream) -> Self {
        Object::Stream(Arc::new(value))
    }
}

/// A dictionary. Keys are unique and iterate in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict(IndexMap<Name, Object>);

impl Dict {
    /// Create a new, empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a key.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.0.get(key)
    }

    /// Whether the dictionary contains a key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the previous value of the key.
    pub fn insert(&mut self, key: Name, value: impl Into<Object>) -> Option<Object> {
        self.0.insert(key, value.into())
    }

    /// Get the value of a key, inserting the result of `default` if the key is missing.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: Name,
        default: impl FnOnce() -> Object,
    ) -> &mut Object {
        self.0.entry(key).or_insert_with(default)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Object)> {
        self.0.iter()
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Name> {
        self.0.keys()
    }
}

impl FromIterator<(Name, Object)> for Dict {
    fn from_iter<T: IntoIterator<Item = (Name, Object)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A stream: a dictionary together with a byte payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    dict: Dict,
    data: Vec<u8>,
}

impl Stream {
    /// Create a new stream. The data is stored exactly as given.
    pub fn new(dict: Dict, data: Vec<u8>) -> Self {
        Self { dict, data }
    }

    /// The stream dictionary.
    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
