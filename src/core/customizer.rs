use crate::domain::model::{Cause, StructuredEntry};
use crate::domain::ports::LogEntryCustomizer;
use crate::utils::error::{ObservabilityError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Name of the field holding the text message.
pub const MESSAGE_FIELD: &str = "message";

/// Name of the field holding the cause, when written into the entry.
pub const CAUSE_FIELD: &str = "cause";

/// State shared by a root customizer and all of its namespaces.
#[derive(Default)]
struct Shared {
    cause: Option<(Vec<String>, Cause)>,
    error: Option<ObservabilityError>,
}

impl Shared {
    fn record(&mut self, error: ObservabilityError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// Default [`LogEntryCustomizer`], building a tree of namespaces and values.
pub struct DefaultLogEntryCustomizer {
    path: Vec<String>,
    values: BTreeMap<String, Value>,
    namespaces: BTreeMap<String, DefaultLogEntryCustomizer>,
    shared: Rc<RefCell<Shared>>,
}

impl DefaultLogEntryCustomizer {
    /// Create a customizer seeded with the text `message`.
    pub fn create(message: &str) -> Self {
        let mut customizer = Self::node(Vec::new(), Rc::new(RefCell::new(Shared::default())));
        customizer.with_value(MESSAGE_FIELD, Value::String(message.to_string()));
        customizer
    }

    fn node(path: Vec<String>, shared: Rc<RefCell<Shared>>) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
            namespaces: BTreeMap::new(),
            shared,
        }
    }

    /// Build the entry.
    ///
    /// Null values and empty namespaces are dropped. When `cause_in_message`
    /// is set, any cause is written as a `cause` field in the namespace it
    /// was attached to. Fails with the first misuse recorded while the entry
    /// was being customized, or if that namespace already uses the `cause` key.
    pub fn build(&self, cause_in_message: bool) -> Result<StructuredEntry> {
        let shared = self.shared.borrow();
        if let Some(error) = &shared.error {
            return Err(error.clone());
        }

        let cause = if cause_in_message {
            shared.cause.as_ref()
        } else {
            None
        };
        self.build_node(cause)
    }

    /// The cause attached anywhere in the entry, if any.
    pub fn cause(&self) -> Option<Cause> {
        self.shared
            .borrow()
            .cause
            .as_ref()
            .map(|(_, cause)| cause.clone())
    }

    fn build_node(&self, cause: Option<&(Vec<String>, Cause)>) -> Result<StructuredEntry> {
        let mut entry: StructuredEntry = self
            .values
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for (name, namespace) in &self.namespaces {
            let nested = namespace.build_node(cause)?;
            if !nested.is_empty() {
                entry.insert(name.clone(), Value::Object(nested));
            }
        }

        if let Some((path, cause)) = cause {
            if *path == self.path {
                // Null values and empty namespaces still reserve the key.
                if self.values.contains_key(CAUSE_FIELD)
                    || self.namespaces.contains_key(CAUSE_FIELD)
                {
                    return Err(ObservabilityError::CauseClashesWithKey {
                        key: CAUSE_FIELD.to_string(),
                    });
                }
                entry.insert(CAUSE_FIELD.to_string(), Value::String(cause.text()));
            }
        }

        Ok(entry)
    }
}

impl LogEntryCustomizer for DefaultLogEntryCustomizer {
    fn ns(&mut self, namespace: &str) -> &mut dyn LogEntryCustomizer {
        if self.values.contains_key(namespace) {
            self.record_error(ObservabilityError::NamespaceClashesWithKey {
                namespace: namespace.to_string(),
            });
            return self;
        }
        if namespace.trim().is_empty() {
            self.record_error(ObservabilityError::BlankNamespace);
            return self;
        }

        let shared = Rc::clone(&self.shared);
        let mut path = self.path.clone();
        path.push(namespace.to_string());
        self.namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| DefaultLogEntryCustomizer::node(path, shared))
    }

    fn with_value(&mut self, key: &str, value: Value) -> &mut dyn LogEntryCustomizer {
        if key.trim().is_empty() {
            self.record_error(ObservabilityError::BlankKey);
        } else if self.namespaces.contains_key(key) {
            self.record_error(ObservabilityError::KeyClashesWithNamespace {
                key: key.to_string(),
            });
        } else if self.values.contains_key(key) {
            self.record_error(ObservabilityError::DuplicateKey {
                key: key.to_string(),
            });
        } else {
            self.values.insert(key.to_string(), value);
        }
        self
    }

    fn with_cause(&mut self, cause: Cause) -> &mut dyn LogEntryCustomizer {
        let mut shared = self.shared.borrow_mut();
        if shared.cause.is_some() {
            shared.record(ObservabilityError::CauseAlreadySet);
        } else {
            shared.cause = Some((self.path.clone(), cause));
        }
        drop(shared);
        self
    }

    fn record_error(&mut self, error: ObservabilityError) {
        self.shared.borrow_mut().record(error);
    }
}
