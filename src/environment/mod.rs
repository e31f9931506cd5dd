use crate::value::Object;
use compact_str::{CompactString, ToCompactString};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A chained, lexically scoped name-to-value mapping.
///
/// Cloning shares the underlying scope: multiple closures captured in the
/// same scope all see (and outlive) one mapping, which is exactly what
/// lexical closure semantics need.
#[derive(Debug, Clone)]
pub struct Environment {
    inner: Rc<RefCell<EnvironmentImpl>>,
}

#[derive(Debug)]
struct EnvironmentImpl {
    store: HashMap<CompactString, Object>,
    outer: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(EnvironmentImpl {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    /// A fresh scope whose lookups fall through to this one.
    pub fn new_scope(&self) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EnvironmentImpl {
                store: HashMap::new(),
                outer: Some(self.clone()),
            })),
        }
    }

    /// Walks the scope chain, innermost first.
    pub fn get(&self, name: &str) -> Option<Object> {
        let inner = self.inner.borrow();
        if let Some(value) = inner.store.get(name) {
            Some(value.clone())
        } else if let Some(outer) = &inner.outer {
            outer.get(name)
        } else {
            None
        }
    }

    /// Binds in this scope only; never touches an outer one.
    pub fn set(&self, name: &str, value: Object) {
        self.inner
            .borrow_mut()
            .store
            .insert(name.to_compact_string(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
