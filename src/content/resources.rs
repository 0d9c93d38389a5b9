//! Helpers over the `lopdf` object model.
//!
//! Page dictionaries, resource dictionaries and font dictionaries are full
//! of indirect references and number objects that may be either integers
//! or reals. These helpers resolve both uniformly.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Maximum chain of indirect references followed before giving up.
const MAX_REFERENCE_CHAIN: usize = 32;

/// Follow indirect references until a direct object is reached.
pub fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    let mut current = object;
    for _ in 0..MAX_REFERENCE_CHAIN {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    log::warn!("Indirect reference chain too long, giving up");
    None
}

/// Resolve `key` in `dict`.
pub fn get<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    dict.get(key).ok().and_then(|obj| resolve(doc, obj))
}

/// Resolve `key` in `dict` to a dictionary. Streams yield their dictionary.
pub fn get_dict<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    match get(doc, dict, key)? {
        Object::Dictionary(d) => Some(d),
        Object::Stream(s) => Some(&s.dict),
        _ => None,
    }
}

/// Resolve `key` in `dict` to an array.
pub fn get_array<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a [Object]> {
    match get(doc, dict, key)? {
        Object::Array(items) => Some(items.as_slice()),
        _ => None,
    }
}

/// Resolve `key` in `dict` to a stream.
pub fn get_stream<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Stream> {
    match get(doc, dict, key)? {
        Object::Stream(s) => Some(s),
        _ => None,
    }
}

/// Resolve `key` in `dict` to a name.
pub fn get_name<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a [u8]> {
    match get(doc, dict, key)? {
        Object::Name(name) => Some(name.as_slice()),
        _ => None,
    }
}

/// Resolve `key` in `dict` to a number.
pub fn get_number(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<f32> {
    get(doc, dict, key).and_then(number)
}

/// Numeric value of an integer or real object.
pub fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Numeric values of a whole operand list, or `None` if any is not a number.
pub fn numbers(objects: &[Object]) -> Option<Vec<f32>> {
    objects.iter().map(number).collect()
}

/// Stream payload with filters applied.
///
/// Unfiltered streams are returned as stored.
pub fn stream_data(stream: &Stream) -> Vec<u8> {
    if stream.dict.get(b"Filter").is_err() {
        return stream.content.clone();
    }
    match stream.decompressed_content() {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to decode stream, using raw bytes: {}", e);
            stream.content.clone()
        },
    }
}

/// Resource dictionary of a page, following `Parent` inheritance.
pub fn page_resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..MAX_REFERENCE_CHAIN {
        if let Some(resources) = get_dict(doc, node, b"Resources") {
            return Some(resources);
        }
        node = get_dict(doc, node, b"Parent")?;
    }
    None
}
