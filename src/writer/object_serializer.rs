//! PDF object serialization.
//!
//! Converts [`Object`] values to their byte representation following the PDF
//! syntax rules. Dictionary keys are written in sorted order so that the same
//! object graph always serializes to the same bytes.

use std::collections::HashMap;
use std::io::Write;

use crate::object::{Object, ObjectRef};

use super::format_number;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        self.write_object(&mut buf, obj).expect("write to Vec");
        buf
    }

    /// Serialize an object to a string (for tests and debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).to_string()
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} 0 obj\n{object}\nendobj\n\n`
    pub fn serialize_indirect(&self, id: u32, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        writeln!(buf, "{} 0 obj", id).expect("write to Vec");
        self.write_object(&mut buf, obj).expect("write to Vec");
        write!(buf, "\nendobj\n\n").expect("write to Vec");
        buf
    }

    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write!(w, "{}", format_number(*r)),
            Object::String(s) => self.write_string(w, s),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    /// Write a literal string `(...)` with `(`, `)` and `\` escaped.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> std::io::Result<()> {
        write!(w, "(")?;
        for &byte in data {
            if byte == b'(' || byte == b')' || byte == b'\\' {
                w.write_all(b"\\")?;
            }
            w.write_all(&[byte])?;
        }
        write!(w, ")")
    }

    /// Write a name, escaping delimiters and non-regular bytes as `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> std::io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            let regular = byte.is_ascii_graphic()
                && !matches!(byte, b'#' | b'/' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'%');
            if regular {
                w.write_all(&[byte])?;
            } else {
                write!(w, "#{:02X}", byte)?;
            }
        }
        Ok(())
    }

    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    fn write_dictionary<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
    ) -> std::io::Result<()> {
        write!(w, "<<")?;

        // Sorted keys keep the output deterministic.
        let mut keys: Vec<_> = dict.keys().collect();
        keys.sort();

        for key in keys {
            if let Some(value) = dict.get(key) {
                write!(w, " ")?;
                self.write_name(w, key)?;
                write!(w, " ")?;
                self.write_object(w, value)?;
            }
        }
        write!(w, " >>")
    }

    fn write_stream<W: Write>(
        &self,
        w: &mut W,
        dict: &HashMap<String, Object>,
        data: &[u8],
    ) -> std::io::Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length
            .entry("Length".to_string())
            .or_insert(Object::Integer(data.len() as i64));

        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Helper constructors for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a String object from a Rust string.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create a Real object.
    pub fn real(r: f64) -> Object {
        Object::Real(r)
    }

    /// Create an Array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Create a Dictionary object from `(key, value)` pairs.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        let map: HashMap<String, Object> = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Object::Dictionary(map)
    }

    /// Create a Reference object.
    pub fn reference(id: u32) -> Object {
        Object::Reference(ObjectRef::new(id, 0))
    }

    /// Create a rectangle array `[llx lly urx ury]`.
    pub fn rect(llx: f64, lly: f64, urx: f64, ury: f64) -> Object {
        Object::Array(vec![
            Object::Real(llx),
            Object::Real(lly),
            Object::Real(urx),
            Object::Real(ury),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_scalars() {
        let s = ObjectSerializer::new();
        assert_eq!(s.serialize_to_string(&Object::Null), "null");
        assert_eq!(s.serialize_to_string(&Object::Boolean(true)), "true");
        assert_eq!(s.serialize_to_string(&Object::Integer(-123)), "-123");
        assert_eq!(s.serialize_to_string(&Object::Real(1.0)), "1");
        assert_eq!(s.serialize_to_string(&Object::Real(0.5)), "0.5");
    }

    #[test]
    fn test_serialize_string_escapes() {
        let s = ObjectSerializer::new();
        assert_eq!(s.serialize_to_string(&ObjectSerializer::string("Hello")), "(Hello)");
        assert_eq!(
            s.serialize_to_string(&ObjectSerializer::string("(a(b)c)")),
            r"(\(a\(b\)c\))"
        );
        assert_eq!(
            s.serialize_to_string(&ObjectSerializer::string(r"back\slash")),
            r"(back\\slash)"
        );
    }

    #[test]
    fn test_serialize_name() {
        let s = ObjectSerializer::new();
        assert_eq!(s.serialize_to_string(&ObjectSerializer::name("Type")), "/Type");
        assert_eq!(
            s.serialize_to_string(&ObjectSerializer::name("With Space")),
            "/With#20Space"
        );
    }

    #[test]
    fn test_serialize_array() {
        let s = ObjectSerializer::new();
        let arr = ObjectSerializer::array(vec![
            Object::Integer(1),
            Object::Integer(2),
            ObjectSerializer::reference(3),
        ]);
        assert_eq!(s.serialize_to_string(&arr), "[1 2 3 0 R]");
    }

    #[test]
    fn test_serialize_dictionary_sorted_keys() {
        let s = ObjectSerializer::new();
        let dict = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Count", ObjectSerializer::integer(2)),
        ]);
        assert_eq!(s.serialize_to_string(&dict), "<< /Count 2 /Type /Pages >>");
    }

    #[test]
    fn test_serialize_stream_with_length() {
        let s = ObjectSerializer::new();
        let stream = Object::Stream {
            dict: HashMap::new(),
            data: bytes::Bytes::from_static(b"q Q"),
        };
        let out = s.serialize_to_string(&stream);
        assert!(out.contains("/Length 3"));
        assert!(out.contains("stream\nq Q\nendstream"));
    }

    #[test]
    fn test_serialize_indirect_format() {
        let s = ObjectSerializer::new();
        let bytes = s.serialize_indirect(4, &Object::Integer(7));
        assert_eq!(String::from_utf8_lossy(&bytes), "4 0 obj\n7\nendobj\n\n");
    }

    #[test]
    fn test_rect_helper() {
        let s = ObjectSerializer::new();
        let rect = ObjectSerializer::rect(0.0, 0.0, 595.276, 841.890);
        assert_eq!(s.serialize_to_string(&rect), "[0 0 595.276 841.89]");
    }
}
