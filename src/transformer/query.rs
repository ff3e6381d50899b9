/// `@query` directive transformer
///
/// Binds a raw statement to one Query field. Placement on an interface's
/// field is rejected during scan, before any resolver is generated.
use crate::error::{GraphsmithError, Result};
use crate::resolvers::generate_default_response_template;
use crate::resolvers::query::generate_query_request_template;
use crate::transformer::context::{Resolver, TransformerContext};
use crate::transformer::directive::{FieldRef, QueryDirectiveConfig};
use crate::transformer::{ensure_data_source, DATA_SOURCE_NAME};
use async_graphql::parser::types::{ServiceDocument, TypeKind, TypeSystemDefinition};
use indexmap::IndexMap;

pub const QUERY_DIRECTIVE_NAME: &str = "query";

#[derive(Debug, Default)]
pub struct QueryTransformer {
    /// Occurrences in discovery order, value-keyed for dedup.
    queries: IndexMap<FieldRef, QueryDirectiveConfig>,
}

impl QueryTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> impl Iterator<Item = (&FieldRef, &QueryDirectiveConfig)> {
        self.queries.iter()
    }

    /// Phase 1: record `@query` occurrences and their statements.
    pub fn scan(&mut self, document: &ServiceDocument) -> Result<()> {
        for definition in &document.definitions {
            let TypeSystemDefinition::Type(ty) = definition else {
                continue;
            };
            let type_def = &ty.node;
            let type_name = type_def.name.node.as_str();

            let (fields, is_interface) = match &type_def.kind {
                TypeKind::Object(object) => (&object.fields, false),
                TypeKind::Interface(interface) => (&interface.fields, true),
                _ => continue,
            };

            for field in fields {
                let field_name = field.node.name.node.as_str();
                for directive in &field.node.directives {
                    if directive.node.name.node.as_str() != QUERY_DIRECTIVE_NAME {
                        continue;
                    }
                    if is_interface {
                        return Err(GraphsmithError::InvalidDirective(format!(
                            "The @query directive cannot be placed on an interface's field. See {}.{}",
                            type_name, field_name
                        )));
                    }
                    let config = QueryDirectiveConfig::from_directive(&directive.node);
                    tracing::debug!("recorded @query on {}.{}", type_name, field_name);
                    self.queries
                        .entry(FieldRef::new(type_name, field_name))
                        .or_insert(config);
                }
            }
        }
        Ok(())
    }

    /// Phase 2: one RAW resolver per recorded occurrence.
    pub fn generate(
        &self,
        ctx: &mut impl TransformerContext,
        is_sync_enabled: bool,
    ) -> Result<()> {
        for (field_ref, config) in &self.queries {
            ensure_data_source(ctx);
            if ctx.has_resolver(&field_ref.type_name, &field_ref.field_name) {
                continue;
            }
            tracing::info!(
                "generating raw-query resolver for {}.{}",
                field_ref.type_name,
                field_ref.field_name
            );
            ctx.add_resolver(
                &field_ref.type_name,
                &field_ref.field_name,
                Resolver {
                    data_source: DATA_SOURCE_NAME.to_string(),
                    request_template: generate_query_request_template(&config.statement),
                    response_template: generate_default_response_template(is_sync_enabled),
                    slots: Vec::new(),
                },
            );
        }
        Ok(())
    }
}
