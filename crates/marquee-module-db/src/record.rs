use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct TypeDecl {
    pub namespace: String,
    pub name: String,
}

impl TypeDecl {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub name: String,
    pub types: Vec<TypeDecl>,
    /// Set when the manifest could only be partially read; `types` then
    /// holds the subset that parsed.
    pub partial: bool,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>, types: Vec<TypeDecl>) -> Self {
        Self {
            name: name.into(),
            types,
            partial: false,
        }
    }

    pub fn partial(name: impl Into<String>, types: Vec<TypeDecl>) -> Self {
        let mut record = Self::new(name, types);
        record.partial = true;
        record
    }

    pub fn declares_namespace(&self, namespace: &str) -> bool {
        self.types.iter().any(|decl| decl.namespace == namespace)
    }
}

/// Modules visible to the host at one instant. A snapshot is taken once
/// per pass; bundles installed afterwards are only seen by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSnapshot {
    modules: Vec<ModuleRecord>,
}

impl ModuleSnapshot {
    pub fn new(modules: Vec<ModuleRecord>) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &[ModuleRecord] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn contains_namespace(&self, namespace: &str) -> bool {
        self.modules
            .iter()
            .any(|module| module.declares_namespace(namespace))
    }

    /// Name of the first module declaring a type under `namespace`.
    pub fn module_declaring(&self, namespace: &str) -> Option<&str> {
        self.modules
            .iter()
            .find(|module| module.declares_namespace(namespace))
            .map(|module| module.name.as_str())
    }
}
