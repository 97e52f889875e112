//! The closed registry of primitive kinds and their lexical conversions.

use std::collections::HashMap;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::value::PrimitiveValue;

/// One of the scalar or string types the store understands.
///
/// The set is closed. Each kind has a single canonical lowercase name, used as
/// the key in persisted constant pools, and one or more source type tags used
/// to classify literals and parameter types.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// A single Unicode code point.
    Character,
    /// 32-bit IEEE 754 float.
    Float,
    /// 64-bit IEEE 754 float.
    Double,
    /// Boolean.
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// Arbitrary text.
    String,
}

/// Static description of one kind: its canonical name and recognized type tags.
#[derive(Debug)]
struct KindRecord {
    kind: PrimitiveKind,
    name: &'static str,
    tags: &'static [&'static str],
}

static KIND_RECORDS: [KindRecord; 9] = [
    KindRecord {
        kind: PrimitiveKind::Short,
        name: "short",
        tags: &["short", "Short", "java.lang.Short"],
    },
    KindRecord {
        kind: PrimitiveKind::Integer,
        name: "integer",
        tags: &["int", "Integer", "java.lang.Integer"],
    },
    KindRecord {
        kind: PrimitiveKind::Long,
        name: "long",
        tags: &["long", "Long", "java.lang.Long"],
    },
    KindRecord {
        kind: PrimitiveKind::Character,
        name: "character",
        tags: &["char", "Character", "java.lang.Character"],
    },
    KindRecord {
        kind: PrimitiveKind::Float,
        name: "float",
        tags: &["float", "Float", "java.lang.Float"],
    },
    KindRecord {
        kind: PrimitiveKind::Double,
        name: "double",
        tags: &["double", "Double", "java.lang.Double"],
    },
    KindRecord {
        kind: PrimitiveKind::Boolean,
        name: "boolean",
        tags: &["boolean", "Boolean", "java.lang.Boolean"],
    },
    KindRecord {
        kind: PrimitiveKind::Byte,
        name: "byte",
        tags: &["byte", "Byte", "java.lang.Byte"],
    },
    KindRecord {
        kind: PrimitiveKind::String,
        name: "string",
        tags: &["String", "java.lang.String"],
    },
];

/// Lookup maps derived from [`KIND_RECORDS`], built on first use and never mutated.
struct Lookup {
    by_name: HashMap<&'static str, PrimitiveKind>,
    by_tag: HashMap<&'static str, PrimitiveKind>,
}

fn lookup() -> &'static Lookup {
    static LOOKUP: OnceLock<Lookup> = OnceLock::new();
    LOOKUP.get_or_init(|| {
        let mut by_name = HashMap::with_capacity(KIND_RECORDS.len());
        let mut by_tag = HashMap::new();
        for record in &KIND_RECORDS {
            by_name.insert(record.name, record.kind);
            for tag in record.tags {
                by_tag.insert(*tag, record.kind);
            }
        }
        Lookup { by_name, by_tag }
    })
}

impl PrimitiveKind {
    /// All kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Short,
        PrimitiveKind::Integer,
        PrimitiveKind::Long,
        PrimitiveKind::Character,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::String,
    ];

    fn record(self) -> &'static KindRecord {
        &KIND_RECORDS[self as usize]
    }

    /// Returns the canonical lowercase name (e.g. `"integer"`).
    pub fn name(self) -> &'static str {
        self.record().name
    }

    /// Returns the source type tags that classify as this kind.
    pub fn type_tags(self) -> &'static [&'static str] {
        self.record().tags
    }

    /// Looks up a kind by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        lookup().by_name.get(name).copied()
    }

    /// Looks up a kind by a source type tag such as `int` or `java.lang.String`.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        lookup().by_tag.get(tag).copied()
    }

    /// Parses `raw` according to this kind's lexical grammar.
    ///
    /// Integer kinds reject non-numeric text and values outside their width.
    /// Floating kinds accept `NaN` and `Infinity` along with an optional
    /// `f`/`d` suffix. Boolean is lenient: anything other than a
    /// case-insensitive `true` is `false`. Character takes the first code
    /// point. String is returned unchanged.
    pub fn convert(self, raw: &str) -> Result<PrimitiveValue, ParseError> {
        match self {
            PrimitiveKind::Short => parse_int::<i16>(self, raw).map(PrimitiveValue::Short),
            PrimitiveKind::Integer => parse_int::<i32>(self, raw).map(PrimitiveValue::Integer),
            PrimitiveKind::Long => parse_int::<i64>(self, raw).map(PrimitiveValue::Long),
            PrimitiveKind::Byte => parse_int::<i8>(self, raw).map(PrimitiveValue::Byte),
            PrimitiveKind::Float => parse_float::<f32>(self, raw).map(PrimitiveValue::Float),
            PrimitiveKind::Double => parse_float::<f64>(self, raw).map(PrimitiveValue::Double),
            PrimitiveKind::Boolean => Ok(PrimitiveValue::Boolean(raw.eq_ignore_ascii_case("true"))),
            PrimitiveKind::Character => raw
                .chars()
                .next()
                .map(PrimitiveValue::Character)
                .ok_or(ParseError::Empty { kind: self }),
            PrimitiveKind::String => Ok(PrimitiveValue::String(raw.to_string())),
        }
    }
}

fn parse_int<T>(kind: PrimitiveKind, raw: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::Overflow {
            kind,
            input: raw.to_string(),
        },
        _ => ParseError::Invalid {
            kind,
            input: raw.to_string(),
        },
    })
}

fn parse_float<T: FromStr>(kind: PrimitiveKind, raw: &str) -> Result<T, ParseError> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<T>() {
        return Ok(v);
    }
    // Type suffix, as in `1.5f` or `2d`. Tried second so `inf` keeps its `f`.
    s.strip_suffix(['f', 'F', 'd', 'D'])
        .filter(|rest| !rest.is_empty())
        .and_then(|rest| rest.parse::<T>().ok())
        .ok_or_else(|| ParseError::Invalid {
            kind,
            input: raw.to_string(),
        })
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_in_declaration_order() {
        for (i, kind) in PrimitiveKind::ALL.iter().enumerate() {
            assert_eq!(KIND_RECORDS[i].kind, *kind);
        }
    }

    #[test]
    fn every_tag_maps_to_exactly_one_kind() {
        let total_tags: usize = KIND_RECORDS.iter().map(|r| r.tags.len()).sum();
        assert_eq!(lookup().by_tag.len(), total_tags);
        for kind in PrimitiveKind::ALL {
            for tag in kind.type_tags() {
                assert_eq!(PrimitiveKind::from_type_tag(tag), Some(kind));
            }
        }
    }

    #[test]
    fn name_lookup_roundtrip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("int"), None);
        assert_eq!(PrimitiveKind::from_name("Integer"), None);
    }

    #[test]
    fn tag_lookup() {
        assert_eq!(PrimitiveKind::from_type_tag("int"), Some(PrimitiveKind::Integer));
        assert_eq!(
            PrimitiveKind::from_type_tag("java.lang.String"),
            Some(PrimitiveKind::String)
        );
        assert_eq!(PrimitiveKind::from_type_tag("string"), None);
        assert_eq!(PrimitiveKind::from_type_tag("java.util.List"), None);
    }

    #[test]
    fn serde_uses_canonical_name() {
        let json = serde_json::to_string(&PrimitiveKind::Character).unwrap();
        assert_eq!(json, "\"character\"");
    }

    #[test]
    fn integer_non_numeric_fails() {
        let err = PrimitiveKind::Integer.convert("abc").unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }));
    }

    #[test]
    fn integer_overflow_per_width() {
        assert_eq!(
            PrimitiveKind::Short.convert("32767").unwrap(),
            PrimitiveValue::Short(i16::MAX)
        );
        assert!(matches!(
            PrimitiveKind::Short.convert("32768"),
            Err(ParseError::Overflow { .. })
        ));
        assert!(matches!(
            PrimitiveKind::Byte.convert("-129"),
            Err(ParseError::Overflow { .. })
        ));
        assert!(matches!(
            PrimitiveKind::Integer.convert("2147483648"),
            Err(ParseError::Overflow { .. })
        ));
        assert_eq!(
            PrimitiveKind::Long.convert("2147483648").unwrap(),
            PrimitiveValue::Long(2_147_483_648)
        );
    }

    #[test]
    fn integer_empty_is_invalid() {
        assert!(matches!(
            PrimitiveKind::Long.convert(""),
            Err(ParseError::Invalid { .. })
        ));
    }

    #[test]
    fn signed_integers() {
        assert_eq!(
            PrimitiveKind::Integer.convert("-42").unwrap(),
            PrimitiveValue::Integer(-42)
        );
        assert_eq!(
            PrimitiveKind::Integer.convert("+7").unwrap(),
            PrimitiveValue::Integer(7)
        );
    }

    #[test]
    fn float_special_values() {
        assert_eq!(
            PrimitiveKind::Double.convert("Infinity").unwrap(),
            PrimitiveValue::Double(f64::INFINITY)
        );
        assert_eq!(
            PrimitiveKind::Float.convert("-Infinity").unwrap(),
            PrimitiveValue::Float(f32::NEG_INFINITY)
        );
        assert_eq!(
            PrimitiveKind::Double.convert("NaN").unwrap(),
            PrimitiveValue::Double(f64::NAN)
        );
        assert_eq!(
            PrimitiveKind::Float.convert("inf").unwrap(),
            PrimitiveValue::Float(f32::INFINITY)
        );
    }

    #[test]
    fn float_suffix_and_whitespace() {
        assert_eq!(
            PrimitiveKind::Float.convert("1.5f").unwrap(),
            PrimitiveValue::Float(1.5)
        );
        assert_eq!(
            PrimitiveKind::Double.convert(" 2.5D ").unwrap(),
            PrimitiveValue::Double(2.5)
        );
        assert_eq!(
            PrimitiveKind::Double.convert("1e3").unwrap(),
            PrimitiveValue::Double(1000.0)
        );
    }

    #[test]
    fn float_invalid() {
        assert!(matches!(
            PrimitiveKind::Double.convert("one"),
            Err(ParseError::Invalid { .. })
        ));
        assert!(matches!(
            PrimitiveKind::Float.convert("f"),
            Err(ParseError::Invalid { .. })
        ));
    }

    #[test]
    fn boolean_is_lenient() {
        assert_eq!(
            PrimitiveKind::Boolean.convert("TRUE").unwrap(),
            PrimitiveValue::Boolean(true)
        );
        assert_eq!(
            PrimitiveKind::Boolean.convert("false").unwrap(),
            PrimitiveValue::Boolean(false)
        );
        assert_eq!(
            PrimitiveKind::Boolean.convert("yes").unwrap(),
            PrimitiveValue::Boolean(false)
        );
        assert_eq!(
            PrimitiveKind::Boolean.convert("").unwrap(),
            PrimitiveValue::Boolean(false)
        );
    }

    #[test]
    fn character_takes_first_code_point() {
        assert_eq!(
            PrimitiveKind::Character.convert("xyz").unwrap(),
            PrimitiveValue::Character('x')
        );
        assert_eq!(
            PrimitiveKind::Character.convert("é!").unwrap(),
            PrimitiveValue::Character('é')
        );
    }

    #[test]
    fn character_empty_fails() {
        assert_eq!(
            PrimitiveKind::Character.convert("").unwrap_err(),
            ParseError::Empty {
                kind: PrimitiveKind::Character
            }
        );
    }

    #[test]
    fn string_is_unchanged() {
        assert_eq!(
            PrimitiveKind::String.convert("  hello ").unwrap(),
            PrimitiveValue::String("  hello ".to_string())
        );
        assert_eq!(
            PrimitiveKind::String.convert("").unwrap(),
            PrimitiveValue::String(String::new())
        );
    }
}
