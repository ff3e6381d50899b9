/// External resolver-pipeline boundary
///
/// The transformer hands generated templates to whatever execution or
/// deployment layer hosts them. [`TransformerContext`] is that seam;
/// [`ResolverOutput`] is the in-memory implementation used by the CLI and
/// by tests.
use crate::resolvers::generate_resolver_key;
use indexmap::IndexMap;

/// Proxy compute binding shared by the generated resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub name: String,
}

/// One generated resolver: request/response templates plus any pipeline
/// slot templates that run ahead of the request.
#[derive(Debug, Clone)]
pub struct Resolver {
    pub data_source: String,
    pub request_template: String,
    pub response_template: String,
    /// (slot name, template) pairs in pipeline order.
    pub slots: Vec<(String, String)>,
}

/// Registration surface exposed by the external stack/resolver manager.
pub trait TransformerContext {
    fn has_data_source(&self, name: &str) -> bool;
    fn add_data_source(&mut self, data_source: DataSource);
    fn has_resolver(&self, type_name: &str, field_name: &str) -> bool;
    fn add_resolver(&mut self, type_name: &str, field_name: &str, resolver: Resolver);
}

/// In-memory resolver registry, insertion-ordered.
#[derive(Debug, Default)]
pub struct ResolverOutput {
    data_sources: IndexMap<String, DataSource>,
    resolvers: IndexMap<String, Resolver>,
}

impl ResolverOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolvers in first-registration order, keyed `"{Type}.{field}"`.
    pub fn resolvers(&self) -> impl Iterator<Item = (&String, &Resolver)> {
        self.resolvers.iter()
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &DataSource> {
        self.data_sources.values()
    }

    pub fn resolver(&self, type_name: &str, field_name: &str) -> Option<&Resolver> {
        self.resolvers
            .get(&generate_resolver_key(type_name, field_name))
    }

    /// Flatten into named template files: `"{Type}.{field}.req"` /
    /// `".res"` for every resolver, plus one entry per slot.
    pub fn templates(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (key, resolver) in &self.resolvers {
            out.push((format!("{}.req", key), resolver.request_template.clone()));
            out.push((format!("{}.res", key), resolver.response_template.clone()));
            for (slot, template) in &resolver.slots {
                out.push((format!("{}.{}", key, slot), template.clone()));
            }
        }
        out
    }
}

impl TransformerContext for ResolverOutput {
    fn has_data_source(&self, name: &str) -> bool {
        self.data_sources.contains_key(name)
    }

    fn add_data_source(&mut self, data_source: DataSource) {
        self.data_sources
            .entry(data_source.name.clone())
            .or_insert(data_source);
    }

    fn has_resolver(&self, type_name: &str, field_name: &str) -> bool {
        self.resolvers
            .contains_key(&generate_resolver_key(type_name, field_name))
    }

    fn add_resolver(&mut self, type_name: &str, field_name: &str, resolver: Resolver) {
        let key = generate_resolver_key(type_name, field_name);
        if self.resolvers.contains_key(&key) {
            tracing::warn!("resolver {} already registered, keeping the first", key);
            return;
        }
        self.resolvers.insert(key, resolver);
    }
}
