use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::Value;
use crate::evaluator::EvalErrorKind;
use crate::guard;

/// A host-supplied record of named values.
///
/// Objects are immutable once built and cheap to clone. There is no
/// unguarded read: [`Object::member`] runs the member check before looking
/// at the map, so prototype-chain names are refused whether or not the host
/// happened to store something under them.
#[derive(Clone, Default, PartialEq)]
pub struct Object(Arc<BTreeMap<String, Value>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a member, subject to the member guard.
    pub fn member(&self, name: &str) -> Result<&Value, EvalErrorKind> {
        guard::check_member(name)?;
        self.0.get(name).ok_or_else(|| EvalErrorKind::UnknownMember {
            name: name.to_string(),
        })
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Member names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: ")?;
            value.fmt_nested(f)?;
        }
        write!(f, "}}")
    }
}
