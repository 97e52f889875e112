//! Typed literal values produced by [`PrimitiveKind::convert`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::primitive::PrimitiveKind;

/// A literal value of one primitive kind.
///
/// Equality for floating values is bitwise after collapsing every NaN to one
/// canonical NaN, so `NaN == NaN` and `0.0 != -0.0`. This is the equality
/// used when constant pools dedup values. Values are totally ordered by kind
/// first and then by value.
#[derive(Clone, Debug)]
pub enum PrimitiveValue {
    /// A `short` value.
    Short(i16),
    /// An `integer` value.
    Integer(i32),
    /// A `long` value.
    Long(i64),
    /// A `character` value.
    Character(char),
    /// A `float` value.
    Float(f32),
    /// A `double` value.
    Double(f64),
    /// A `boolean` value.
    Boolean(bool),
    /// A `byte` value.
    Byte(i8),
    /// A `string` value.
    String(String),
}

impl PrimitiveValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveValue::Short(_) => PrimitiveKind::Short,
            PrimitiveValue::Integer(_) => PrimitiveKind::Integer,
            PrimitiveValue::Long(_) => PrimitiveKind::Long,
            PrimitiveValue::Character(_) => PrimitiveKind::Character,
            PrimitiveValue::Float(_) => PrimitiveKind::Float,
            PrimitiveValue::Double(_) => PrimitiveKind::Double,
            PrimitiveValue::Boolean(_) => PrimitiveKind::Boolean,
            PrimitiveValue::Byte(_) => PrimitiveKind::Byte,
            PrimitiveValue::String(_) => PrimitiveKind::String,
        }
    }

    /// Renders the value as literal text that converts back to an equal value.
    ///
    /// Special floats are written as `NaN`, `Infinity` and `-Infinity`.
    pub fn to_raw(&self) -> String {
        match self {
            PrimitiveValue::Short(v) => v.to_string(),
            PrimitiveValue::Integer(v) => v.to_string(),
            PrimitiveValue::Long(v) => v.to_string(),
            PrimitiveValue::Character(c) => c.to_string(),
            PrimitiveValue::Float(v) => special_float(f64::from(*v)).unwrap_or_else(|| v.to_string()),
            PrimitiveValue::Double(v) => special_float(*v).unwrap_or_else(|| v.to_string()),
            PrimitiveValue::Boolean(b) => b.to_string(),
            PrimitiveValue::Byte(v) => v.to_string(),
            PrimitiveValue::String(s) => s.clone(),
        }
    }
}

/// Text for non-finite floats, `None` for finite ones.
fn special_float(v: f64) -> Option<String> {
    if v.is_nan() {
        Some("NaN".to_string())
    } else if v == f64::INFINITY {
        Some("Infinity".to_string())
    } else if v == f64::NEG_INFINITY {
        Some("-Infinity".to_string())
    } else {
        None
    }
}

fn canonical_f32(v: f32) -> f32 {
    if v.is_nan() {
        f32::NAN
    } else {
        v
    }
}

fn canonical_f64(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

impl Ord for PrimitiveValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use PrimitiveValue::*;
        match (self, other) {
            (Short(a), Short(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Long(a), Long(b)) => a.cmp(b),
            (Character(a), Character(b)) => a.cmp(b),
            (Float(a), Float(b)) => canonical_f32(*a).total_cmp(&canonical_f32(*b)),
            (Double(a), Double(b)) => canonical_f64(*a).total_cmp(&canonical_f64(*b)),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Byte(a), Byte(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for PrimitiveValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PrimitiveValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PrimitiveValue {}

impl Hash for PrimitiveValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            PrimitiveValue::Short(v) => v.hash(state),
            PrimitiveValue::Integer(v) => v.hash(state),
            PrimitiveValue::Long(v) => v.hash(state),
            PrimitiveValue::Character(v) => v.hash(state),
            PrimitiveValue::Float(v) => canonical_f32(*v).to_bits().hash(state),
            PrimitiveValue::Double(v) => canonical_f64(*v).to_bits().hash(state),
            PrimitiveValue::Boolean(v) => v.hash(state),
            PrimitiveValue::Byte(v) => v.hash(state),
            PrimitiveValue::String(v) => v.hash(state),
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashSet};

    fn reparse(v: &PrimitiveValue) -> PrimitiveValue {
        v.kind().convert(&v.to_raw()).unwrap()
    }

    #[test]
    fn nan_values_are_equal() {
        let a = PrimitiveValue::Double(f64::NAN);
        let b = PrimitiveValue::Double(-f64::NAN);
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn signed_zeros_are_distinct() {
        assert_ne!(PrimitiveValue::Float(0.0), PrimitiveValue::Float(-0.0));
    }

    #[test]
    fn different_kinds_never_equal() {
        assert_ne!(PrimitiveValue::Integer(1), PrimitiveValue::Long(1));
        assert_ne!(PrimitiveValue::Short(1), PrimitiveValue::Byte(1));
    }

    #[test]
    fn ordering_groups_by_kind() {
        let set: BTreeSet<_> = [
            PrimitiveValue::String("a".to_string()),
            PrimitiveValue::Integer(3),
            PrimitiveValue::Short(9),
            PrimitiveValue::Integer(-1),
        ]
        .into_iter()
        .collect();
        let kinds: Vec<_> = set.iter().map(|v| v.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PrimitiveKind::Short,
                PrimitiveKind::Integer,
                PrimitiveKind::Integer,
                PrimitiveKind::String
            ]
        );
    }

    #[test]
    fn special_floats_render_and_reparse() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let value = PrimitiveValue::Double(v);
            assert_eq!(reparse(&value), value);
        }
        assert_eq!(PrimitiveValue::Float(f32::INFINITY).to_raw(), "Infinity");
        assert_eq!(PrimitiveValue::Double(f64::NEG_INFINITY).to_raw(), "-Infinity");
        assert_eq!(PrimitiveValue::Float(f32::NAN).to_raw(), "NaN");
    }

    #[test]
    fn character_and_boolean_reparse() {
        assert_eq!(
            reparse(&PrimitiveValue::Character('🦀')),
            PrimitiveValue::Character('🦀')
        );
        assert_eq!(
            reparse(&PrimitiveValue::Boolean(true)),
            PrimitiveValue::Boolean(true)
        );
    }

    proptest! {
        #[test]
        fn integers_reparse(v in any::<i64>()) {
            let value = PrimitiveKind::Long.convert(&v.to_string()).unwrap();
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn shorts_reparse(v in any::<i16>()) {
            let value = PrimitiveKind::Short.convert(&v.to_string()).unwrap();
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn ints_reparse(v in any::<i32>()) {
            let value = PrimitiveKind::Integer.convert(&v.to_string()).unwrap();
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn bytes_reparse(v in any::<i8>()) {
            let value = PrimitiveKind::Byte.convert(&v.to_string()).unwrap();
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn booleans_reparse(b in any::<bool>()) {
            let value = PrimitiveKind::Boolean.convert(&b.to_string()).unwrap();
            prop_assert_eq!(&value, &PrimitiveValue::Boolean(b));
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn suffixed_floats_reparse(v in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
            let value = PrimitiveKind::Float.convert(&format!("{v}f")).unwrap();
            prop_assert_eq!(&value, &PrimitiveValue::Float(v));
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn suffixed_doubles_reparse(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let value = PrimitiveKind::Double.convert(&format!("{v}D")).unwrap();
            prop_assert_eq!(&value, &PrimitiveValue::Double(v));
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn floats_reparse(v in any::<f32>()) {
            let value = PrimitiveValue::Float(v);
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn doubles_reparse(v in any::<f64>()) {
            let value = PrimitiveValue::Double(v);
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn strings_reparse(s in ".*") {
            let value = PrimitiveKind::String.convert(&s).unwrap();
            prop_assert_eq!(reparse(&value), value);
        }

        #[test]
        fn characters_reparse(c in any::<char>()) {
            let value = PrimitiveValue::Character(c);
            prop_assert_eq!(reparse(&value), value);
        }
    }
}
