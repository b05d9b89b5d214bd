//! Function registry for looking up pixel functions by name.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::error::{FunctionResult, PixelFunctionError};
use crate::core::function::{Category, FunctionMetadata, PixelFunction};
use indexmap::IndexMap;
use std::sync::Arc;

/// Shared handle to a registered pixel function.
pub type SharedFunction = Arc<dyn PixelFunction>;

/// Registry entry containing the function and its metadata.
#[derive(Clone)]
pub struct RegistryEntry {
    /// The function itself.
    pub function: SharedFunction,
    /// Cached metadata (avoids calling into the function for lookups).
    pub metadata: FunctionMetadata,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Registry of available pixel functions.
///
/// Built once, then shared by reference with whatever needs lookups. The
/// registry is append-only: there is no unregistration. Registering a name
/// that already exists replaces the earlier function in place, keeping its
/// position in iteration order.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    /// Functions indexed by their registered name.
    functions: IndexMap<String, RegistryEntry>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with built-in functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        // Register built-in functions
        crate::functions::builtin::register_all(&mut registry);

        registry
    }

    /// Register a pixel function under its metadata name.
    pub fn register<F>(&mut self, function: F)
    where
        F: PixelFunction + 'static,
    {
        self.register_shared(Arc::new(function));
    }

    /// Register an already shared pixel function.
    pub fn register_shared(&mut self, function: SharedFunction) {
        let metadata = function.metadata();
        let entry = RegistryEntry { function, metadata };

        if self.functions.insert(metadata.name.to_string(), entry).is_some() {
            log::warn!("pixel function '{}' re-registered; previous entry replaced", metadata.name);
        } else {
            log::debug!(
                "registered pixel function '{}' ({}, {} source(s))",
                metadata.name,
                metadata.category.display_name(),
                metadata.arity
            );
        }
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> FunctionResult<SharedFunction> {
        self.functions
            .get(name)
            .map(|e| Arc::clone(&e.function))
            .ok_or_else(|| PixelFunctionError::NotFound(name.to_string()))
    }

    /// Get metadata for a function.
    pub fn get_metadata(&self, name: &str) -> Option<&FunctionMetadata> {
        self.functions.get(name).map(|e| &e.metadata)
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Look up `name` and apply it.
    pub fn apply(
        &self,
        name: &str,
        sources: &SourceBands<'_>,
        dest: &mut DestinationBuffer<'_>,
        size: RasterSize,
    ) -> FunctionResult<()> {
        let entry = self
            .functions
            .get(name)
            .ok_or_else(|| PixelFunctionError::NotFound(name.to_string()))?;

        log::trace!(
            "applying '{}' to {} {} band(s), {}x{} -> {}",
            name,
            sources.len(),
            sources.kind(),
            size.width,
            size.height,
            dest.kind()
        );
        entry.function.apply(sources, dest, size)
    }

    /// Get all registered function names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|s| s.as_str())
    }

    /// Get functions by category.
    pub fn names_by_category(&self, category: Category) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|(_, e)| e.metadata.category == category)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Search functions by name or description.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();

        self.functions
            .iter()
            .filter(|(name, entry)| {
                name.to_lowercase().contains(&query)
                    || entry.metadata.description.to_lowercase().contains(&query)
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Get the total number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Get functions grouped by category, in category display order.
    pub fn grouped_by_category(&self) -> IndexMap<Category, Vec<&FunctionMetadata>> {
        let mut grouped: IndexMap<Category, Vec<&FunctionMetadata>> = IndexMap::new();

        for category in Category::all() {
            let members: Vec<&FunctionMetadata> = self
                .functions
                .values()
                .filter(|e| e.metadata.category == *category)
                .map(|e| &e.metadata)
                .collect();
            if !members.is_empty() {
                grouped.insert(*category, members);
            }
        }

        grouped
    }
}

/// Builder for creating a customized registry.
pub struct RegistryBuilder {
    registry: FunctionRegistry,
    include_builtins: bool,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
            include_builtins: true,
        }
    }

    /// Include or exclude built-in functions.
    pub fn with_builtins(mut self, include: bool) -> Self {
        self.include_builtins = include;
        self
    }

    /// Register a custom function.
    ///
    /// Custom functions are registered after the built-ins, so a custom
    /// function named like a built-in replaces it.
    pub fn register<F>(mut self, function: F) -> Self
    where
        F: PixelFunction + 'static,
    {
        self.registry.register(function);
        self
    }

    /// Build the registry.
    pub fn build(self) -> FunctionRegistry {
        if !self.include_builtins {
            return self.registry;
        }

        let mut registry = FunctionRegistry::with_builtins();
        for (_, entry) in self.registry.functions {
            registry.register_shared(entry.function);
        }
        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::NumericKind;
    use crate::functions::kernel;
    use crate::functions::test_support::real_band;

    struct Twice(&'static str);

    impl PixelFunction for Twice {
        fn metadata(&self) -> FunctionMetadata {
            FunctionMetadata::new(self.0, Category::Custom).description("Double a band")
        }

        fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
            kernel::map_real(size, dest, |ii| 2.0 * sources.real(0, ii));
        }
    }

    const BUILTIN_NAMES: [&str; 20] = [
        "real",
        "imag",
        "mod",
        "phase",
        "conj",
        "sum",
        "diff",
        "mul",
        "cmul",
        "inv",
        "intensity",
        "sqrt",
        "log10",
        "dB2amp",
        "dB2pow",
        "BetaSigmaToIncidence",
        "UVToMagnitude",
        "UVToDirectionTo",
        "UVToDirectionFrom",
        "Sigma0HHIncidenceToSigma0VV",
    ];

    #[test]
    fn test_builtin_names_are_stable() {
        let registry = FunctionRegistry::with_builtins();
        assert_eq!(registry.names().collect::<Vec<_>>(), BUILTIN_NAMES);
    }

    #[test]
    fn test_builtin_arities() {
        use crate::core::function::Arity;

        let registry = FunctionRegistry::with_builtins();
        let arity = |name| registry.get_metadata(name).unwrap().arity;

        assert_eq!(arity("real"), Arity::Exactly(1));
        assert_eq!(arity("sum"), Arity::AtLeast(2));
        assert_eq!(arity("mul"), Arity::AtLeast(2));
        assert_eq!(arity("diff"), Arity::Exactly(2));
        assert_eq!(arity("cmul"), Arity::Exactly(2));
        assert_eq!(arity("UVToMagnitude"), Arity::Exactly(2));
        assert!(!registry.get_metadata("sqrt").unwrap().accepts_complex);
        assert!(registry.get_metadata("log10").unwrap().accepts_complex);
    }

    #[test]
    fn test_lookup_not_found() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.get("mod").is_ok());
        assert_eq!(
            registry.get("modulus").err(),
            Some(PixelFunctionError::NotFound("modulus".to_string()))
        );
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut registry = FunctionRegistry::new();
        registry.register(Twice("a"));
        registry.register(Twice("b"));
        registry.register(Twice("a"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_apply_by_name() {
        let registry = RegistryBuilder::new().register(Twice("twice")).build();
        let band = real_band(NumericKind::INT16, &[3.0, -4.0]);
        let bands: [&[u8]; 1] = [&band];
        let mut out = vec![0u8; 4];

        let mut dest = DestinationBuffer::packed(&mut out, NumericKind::INT16, 2);
        registry
            .apply(
                "twice",
                &SourceBands::new(&bands, NumericKind::INT16),
                &mut dest,
                RasterSize::new(2, 1),
            )
            .unwrap();

        assert_eq!(out, real_band(NumericKind::INT16, &[6.0, -8.0]));
    }

    #[test]
    fn test_builder_override_builtin() {
        let registry = RegistryBuilder::new().register(Twice("real")).build();
        assert_eq!(registry.len(), BUILTIN_NAMES.len());
        assert_eq!(registry.get_metadata("real").unwrap().description, "Double a band");
    }

    #[test]
    fn test_builder_without_builtins() {
        let registry = RegistryBuilder::new()
            .with_builtins(false)
            .register(Twice("twice"))
            .build();
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("sum"));
    }

    #[test]
    fn test_category_grouping_and_search() {
        let registry = FunctionRegistry::with_builtins();

        let geo = registry.names_by_category(Category::Geophysical);
        assert_eq!(geo.len(), 5);
        assert!(geo.contains(&"UVToDirectionFrom"));

        let grouped = registry.grouped_by_category();
        assert_eq!(grouped.keys().next(), Some(&Category::Complex));
        assert!(!grouped.contains_key(&Category::Custom));

        assert!(registry.search("conjugate").contains(&"conj"));
        assert!(registry.search("nothing-like-this").is_empty());
    }
}
