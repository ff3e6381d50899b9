/// `@model` directive transformer
///
/// Two-phase: `scan` walks the parsed document and only records directive
/// occurrences with their arguments; `generate` iterates the recorded
/// occurrences once, in discovery order, lazily creates the shared proxy
/// data source and registers one resolver per (type, field).
use crate::error::{GraphsmithError, Result};
use crate::resolvers::generate_default_response_template;
use crate::resolvers::mutation::{
    generate_condition_slot_template, generate_create_init_slot_template,
    generate_create_request_template, generate_delete_request_template,
    generate_update_init_slot_template, generate_update_request_template,
};
use crate::resolvers::query::{
    generate_get_request_template, generate_get_response_template, generate_list_request_template,
    generate_sync_request_template,
};
use crate::transformer::directive::ModelDirectiveConfig;
use crate::transformer::{ensure_data_source, pluralize, DATA_SOURCE_NAME};
use crate::transformer::context::{Resolver, TransformerContext};
use async_graphql::parser::types::{ServiceDocument, TypeKind, TypeSystemDefinition};
use indexmap::IndexMap;

pub const MODEL_DIRECTIVE_NAME: &str = "model";

#[derive(Debug, Default)]
pub struct ModelTransformer {
    /// Directive occurrences keyed by type name, in discovery order.
    configs: IndexMap<String, ModelDirectiveConfig>,
}

impl ModelTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded occurrences in discovery order.
    pub fn configs(&self) -> impl Iterator<Item = (&String, &ModelDirectiveConfig)> {
        self.configs.iter()
    }

    /// Phase 1: record `@model` occurrences. No resolver is generated here.
    pub fn scan(&mut self, document: &ServiceDocument) -> Result<()> {
        for definition in &document.definitions {
            let TypeSystemDefinition::Type(ty) = definition else {
                continue;
            };
            let type_def = &ty.node;
            let type_name = type_def.name.node.as_str();

            for directive in &type_def.directives {
                if directive.node.name.node.as_str() != MODEL_DIRECTIVE_NAME {
                    continue;
                }
                if !matches!(type_def.kind, TypeKind::Object(_)) {
                    return Err(GraphsmithError::InvalidDirective(format!(
                        "@model must be placed on an object type. See {}",
                        type_name
                    )));
                }
                let config = ModelDirectiveConfig::from_directive(&directive.node);
                tracing::debug!("recorded @model on {}", type_name);
                self.configs.entry(type_name.to_string()).or_insert(config);
            }
        }
        Ok(())
    }

    /// Phase 2: generate and register the CRUD (and, when enabled, sync)
    /// resolvers for every recorded model.
    pub fn generate(
        &self,
        ctx: &mut impl TransformerContext,
        is_sync_enabled: bool,
    ) -> Result<()> {
        for (type_name, config) in &self.configs {
            ensure_data_source(ctx);
            tracing::info!("generating resolvers for model {}", type_name);

            self.add_mutation_resolvers(ctx, type_name, config, is_sync_enabled);
            self.add_query_resolvers(ctx, type_name, is_sync_enabled);
        }
        Ok(())
    }

    fn add_mutation_resolvers(
        &self,
        ctx: &mut impl TransformerContext,
        type_name: &str,
        config: &ModelDirectiveConfig,
        is_sync_enabled: bool,
    ) {
        let create_field = format!("create{}", type_name);
        if !ctx.has_resolver("Mutation", &create_field) {
            ctx.add_resolver(
                "Mutation",
                &create_field,
                Resolver {
                    data_source: DATA_SOURCE_NAME.to_string(),
                    request_template: generate_create_request_template(type_name),
                    response_template: generate_default_response_template(is_sync_enabled),
                    slots: vec![
                        (
                            "init".to_string(),
                            generate_create_init_slot_template(config),
                        ),
                        (
                            "condition".to_string(),
                            // create precondition: the key must not exist yet
                            generate_condition_slot_template(false),
                        ),
                    ],
                },
            );
        }

        let update_field = format!("update{}", type_name);
        if !ctx.has_resolver("Mutation", &update_field) {
            ctx.add_resolver(
                "Mutation",
                &update_field,
                Resolver {
                    data_source: DATA_SOURCE_NAME.to_string(),
                    request_template: generate_update_request_template(type_name),
                    response_template: generate_default_response_template(is_sync_enabled),
                    slots: vec![
                        (
                            "init".to_string(),
                            generate_update_init_slot_template(config),
                        ),
                        (
                            "condition".to_string(),
                            generate_condition_slot_template(true),
                        ),
                    ],
                },
            );
        }

        let delete_field = format!("delete{}", type_name);
        if !ctx.has_resolver("Mutation", &delete_field) {
            ctx.add_resolver(
                "Mutation",
                &delete_field,
                Resolver {
                    data_source: DATA_SOURCE_NAME.to_string(),
                    request_template: generate_delete_request_template(type_name),
                    response_template: generate_default_response_template(is_sync_enabled),
                    slots: vec![(
                        "condition".to_string(),
                        generate_condition_slot_template(true),
                    )],
                },
            );
        }
    }

    fn add_query_resolvers(
        &self,
        ctx: &mut impl TransformerContext,
        type_name: &str,
        is_sync_enabled: bool,
    ) {
        let get_field = format!("get{}", type_name);
        if !ctx.has_resolver("Query", &get_field) {
            ctx.add_resolver(
                "Query",
                &get_field,
                Resolver {
                    data_source: DATA_SOURCE_NAME.to_string(),
                    request_template: generate_get_request_template(),
                    response_template: generate_get_response_template(is_sync_enabled),
                    slots: Vec::new(),
                },
            );
        }

        let plural = pluralize(type_name);
        let list_field = format!("list{}", plural);
        if !ctx.has_resolver("Query", &list_field) {
            ctx.add_resolver(
                "Query",
                &list_field,
                Resolver {
                    data_source: DATA_SOURCE_NAME.to_string(),
                    request_template: generate_list_request_template(type_name),
                    response_template: generate_default_response_template(is_sync_enabled),
                    slots: Vec::new(),
                },
            );
        }

        if is_sync_enabled {
            let sync_field = format!("sync{}", plural);
            if !ctx.has_resolver("Query", &sync_field) {
                ctx.add_resolver(
                    "Query",
                    &sync_field,
                    Resolver {
                        data_source: DATA_SOURCE_NAME.to_string(),
                        request_template: generate_sync_request_template(),
                        response_template: generate_default_response_template(is_sync_enabled),
                        slots: Vec::new(),
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::context::ResolverOutput;
    use async_graphql::parser::parse_schema;

    const POST_SDL: &str = r#"
        type Post @model {
            id: ID!
            title: String
        }
    "#;

    #[test]
    fn test_scan_records_occurrence() {
        let doc = parse_schema(POST_SDL).unwrap();
        let mut transformer = ModelTransformer::new();
        transformer.scan(&doc).unwrap();
        assert_eq!(transformer.configs().count(), 1);
    }

    #[test]
    fn test_scan_rejects_model_on_enum() {
        let doc = parse_schema("enum Color @model { RED }").unwrap();
        let mut transformer = ModelTransformer::new();
        let err = transformer.scan(&doc).unwrap_err();
        assert!(err.to_string().contains("Color"));
    }

    #[test]
    fn test_generate_produces_crud_resolvers() {
        let doc = parse_schema(POST_SDL).unwrap();
        let mut transformer = ModelTransformer::new();
        transformer.scan(&doc).unwrap();

        let mut output = ResolverOutput::new();
        transformer.generate(&mut output, false).unwrap();

        let keys: Vec<_> = output.resolvers().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                "Mutation.createPost",
                "Mutation.updatePost",
                "Mutation.deletePost",
                "Query.getPost",
                "Query.listPosts",
            ]
        );
        assert_eq!(output.data_sources().count(), 1);
    }

    #[test]
    fn test_sync_resolver_only_when_enabled() {
        let doc = parse_schema(POST_SDL).unwrap();
        let mut transformer = ModelTransformer::new();
        transformer.scan(&doc).unwrap();

        let mut output = ResolverOutput::new();
        transformer.generate(&mut output, true).unwrap();
        assert!(output.resolver("Query", "syncPosts").is_some());

        let mut output = ResolverOutput::new();
        transformer.generate(&mut output, false).unwrap();
        assert!(output.resolver("Query", "syncPosts").is_none());
    }

    #[test]
    fn test_double_scan_generates_once() {
        let doc = parse_schema(POST_SDL).unwrap();
        let mut transformer = ModelTransformer::new();
        transformer.scan(&doc).unwrap();
        transformer.scan(&doc).unwrap();

        let mut output = ResolverOutput::new();
        transformer.generate(&mut output, false).unwrap();
        assert_eq!(output.resolvers().count(), 5);
    }

    #[test]
    fn test_generate_is_idempotent_against_context() {
        let doc = parse_schema(POST_SDL).unwrap();
        let mut transformer = ModelTransformer::new();
        transformer.scan(&doc).unwrap();

        let mut output = ResolverOutput::new();
        transformer.generate(&mut output, false).unwrap();
        transformer.generate(&mut output, false).unwrap();
        assert_eq!(output.resolvers().count(), 5);
    }

    #[test]
    fn test_delete_resolver_requires_existing_key() {
        let doc = parse_schema(POST_SDL).unwrap();
        let mut transformer = ModelTransformer::new();
        transformer.scan(&doc).unwrap();

        let mut output = ResolverOutput::new();
        transformer.generate(&mut output, false).unwrap();

        let delete = output.resolver("Mutation", "deletePost").unwrap();
        let (slot, template) = &delete.slots[0];
        assert_eq!(slot, "condition");
        assert!(template.contains("\"attributeExists\": true"));

        let create = output.resolver("Mutation", "createPost").unwrap();
        let condition = &create.slots[1].1;
        assert!(condition.contains("\"attributeExists\": false"));
    }
}
