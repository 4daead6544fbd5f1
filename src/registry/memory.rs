use super::SizeRegistry;
use crate::models::Dimensions;
use std::collections::HashMap;

/// In-memory size registry for tests and the demo host.
#[derive(Debug, Clone, Default)]
pub struct InMemorySizeRegistry {
    names: Vec<String>,
    additional: HashMap<String, Dimensions>,
    options: HashMap<String, u32>,
}

impl InMemorySizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builtin-style size backed by `{name}_size_w`/`{name}_size_h`
    /// options.
    pub fn with_builtin_size(mut self, name: &str, width: u32, height: u32) -> Self {
        self.names.push(name.to_string());
        self.options.insert(format!("{}_size_w", name), width);
        self.options.insert(format!("{}_size_h", name), height);
        self
    }

    /// Register a custom size stored in the additional-size table.
    pub fn with_additional_size(mut self, name: &str, width: u32, height: u32) -> Self {
        self.names.push(name.to_string());
        self.additional
            .insert(name.to_string(), Dimensions::new(width, height));
        self
    }

    /// Register a size name without backing dimensions anywhere. Hosts can end
    /// up in this state when a plugin registers a name but never sets options.
    pub fn with_orphan_name(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self
    }

    /// Registry seeded with the host's stock install defaults.
    pub fn with_host_defaults() -> Self {
        Self::new()
            .with_builtin_size("thumbnail", 150, 150)
            .with_builtin_size("medium", 300, 300)
            .with_builtin_size("large", 1024, 1024)
    }
}

impl SizeRegistry for InMemorySizeRegistry {
    fn intermediate_size_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn additional_size(&self, name: &str) -> Option<Dimensions> {
        self.additional.get(name).copied()
    }

    fn option_u32(&self, name: &str) -> Option<u32> {
        self.options.get(name).copied()
    }
}
