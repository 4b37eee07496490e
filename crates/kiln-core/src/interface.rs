//! Component interfaces extracted from type-declaration text.

use indexmap::IndexMap;

/// Declared property contract of one component.
///
/// Built from a declaration such as:
///
/// ```text
/// interface Button {
///   styleMap: { "--button-bg-color": string; };
///   data: { buttonContent: string; };
///   children?: React.ReactNode;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentInterface {
    /// Component name as declared.
    pub name: String,
    /// CSS variable name -> declared type, when a `styleMap` block was found.
    pub style_fields: Option<IndexMap<String, String>>,
    /// Data field name -> declared type, when a `data` block was found.
    pub data_fields: Option<IndexMap<String, String>>,
    /// Whether a `children` member was declared.
    pub accepts_children: bool,
}

impl ComponentInterface {
    /// An interface with no declared fields.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a style field (CSS variable name).
    pub fn with_style_field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.style_fields
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), ty.into());
        self
    }

    /// Add a data field.
    pub fn with_data_field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.data_fields
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), ty.into());
        self
    }

    /// Mark the interface as accepting nested content.
    pub fn with_children(mut self) -> Self {
        self.accepts_children = true;
        self
    }

    /// Declared style fields in declaration order.
    pub fn style_field_names(&self) -> impl Iterator<Item = &str> {
        self.style_fields.iter().flat_map(|m| m.keys().map(String::as_str))
    }

    /// Declared data fields in declaration order.
    pub fn data_field_names(&self) -> impl Iterator<Item = &str> {
        self.data_fields.iter().flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn has_style_fields(&self) -> bool {
        self.style_fields.as_ref().is_some_and(|m| !m.is_empty())
    }

    pub fn has_data_fields(&self) -> bool {
        self.data_fields.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Whether any style or data field is declared.
    pub fn has_fields(&self) -> bool {
        self.has_style_fields() || self.has_data_fields()
    }
}

/// All interfaces known to one generation run, keyed by component name.
#[derive(Debug, Clone, Default)]
pub struct InterfaceTable {
    interfaces: IndexMap<String, ComponentInterface>,
}

impl InterfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an interface, replacing any earlier one with the same name.
    pub fn insert(&mut self, interface: ComponentInterface) -> Option<ComponentInterface> {
        self.interfaces.insert(interface.name.clone(), interface)
    }

    /// Look up an interface by component name.
    pub fn get(&self, name: &str) -> Option<&ComponentInterface> {
        self.interfaces.get(name)
    }

    /// The declared interface, or an empty one when the name is unknown.
    pub fn get_or_empty(&self, name: &str) -> ComponentInterface {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| ComponentInterface::empty(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentInterface> {
        self.interfaces.values()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl FromIterator<ComponentInterface> for InterfaceTable {
    fn from_iter<I: IntoIterator<Item = ComponentInterface>>(iter: I) -> Self {
        let mut table = InterfaceTable::new();
        for interface in iter {
            table.insert(interface);
        }
        table
    }
}
