/// Resolver template generators
///
/// Pure functions from declarative inputs (model name, directive
/// configuration, sync enablement) to printed mapping-template text. Each
/// generator builds an ordered expression sequence through [`crate::vtl`]
/// and prints it under a descriptive block header.
pub mod mutation;
pub mod query;

use crate::vtl::expr::{compound, iff, method_call, reference, set, to_json, Expression};
use crate::vtl::print_block;

/// Page size used by sync requests when the caller omits `limit`.
pub const DEFAULT_SYNC_QUERY_PAGE_LIMIT: i64 = 100;

/// Invoke-style request envelope version.
pub const INVOKE_VERSION: &str = "2017-02-28";

/// Store-operation request envelope version.
pub const STORE_VERSION: &str = "2018-05-29";

/// Composite string key identifying one resolver. Value-based on purpose:
/// two occurrences that resolve to the same (type, field) pair must collide.
pub fn generate_resolver_key(type_name: &str, field_name: &str) -> String {
    format!("{}.{}", type_name, field_name)
}

/// `$args` initialization shared by request templates: a prior pipeline
/// stage may have rewritten the caller arguments into the stash.
pub(crate) fn set_args() -> Expression {
    set(
        reference("args"),
        reference("util.defaultIfNull($ctx.stash.transformedArgs, $ctx.args)"),
    )
}

/// Response template shared by every operation without bespoke response
/// logic: surface an upstream error, otherwise forward the result.
///
/// When incremental sync is enabled the error path carries `ctx.result` so
/// sync clients still receive tombstone/version data.
pub fn generate_default_response_template(is_sync_enabled: bool) -> String {
    let error_call = if is_sync_enabled {
        method_call(
            reference("util.error"),
            vec![
                reference("ctx.error.message"),
                reference("ctx.error.type"),
                reference("ctx.result"),
            ],
        )
    } else {
        method_call(
            reference("util.error"),
            vec![reference("ctx.error.message"), reference("ctx.error.type")],
        )
    };
    let statements = vec![
        iff(reference("ctx.error"), error_call),
        to_json(reference("ctx.result")),
    ];
    print_block("Default Response template", &compound(statements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_key_is_value_based() {
        assert_eq!(
            generate_resolver_key("Query", "getPost"),
            generate_resolver_key("Query", "getPost")
        );
        assert_ne!(
            generate_resolver_key("Query", "getPost"),
            generate_resolver_key("Mutation", "getPost")
        );
    }

    #[test]
    fn test_default_response_forwards_result() {
        let template = generate_default_response_template(false);
        assert!(template.contains("#if( $ctx.error )"));
        assert!(template.contains("$util.error($ctx.error.message, $ctx.error.type)"));
        assert!(template.contains("$util.toJson($ctx.result)"));
    }

    #[test]
    fn test_default_response_carries_result_when_sync_enabled() {
        let template = generate_default_response_template(true);
        assert!(template
            .contains("$util.error($ctx.error.message, $ctx.error.type, $ctx.result)"));
    }
}
