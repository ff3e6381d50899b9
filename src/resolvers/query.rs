/// Query, sync and raw-query request/response templates
use crate::resolvers::{set_args, DEFAULT_SYNC_QUERY_PAGE_LIMIT, INVOKE_VERSION, STORE_VERSION};
use crate::vtl::expr::{
    and, compound, equals, for_each, if_else, iff, int, is_null_or_empty, list, method_call, not,
    null, obj, qref, raw, reference, set, str, to_json, Expression,
};
use crate::vtl::print_block;

fn auth_filter() -> Expression {
    reference("ctx.stash.authFilter")
}

/// Get request: single-item lookup keyed by the per-request key metadata
/// binding when present, otherwise a direct equality on `id`.
pub fn generate_get_request_template() -> String {
    let statements = vec![
        set(
            reference("GetRequest"),
            obj(vec![
                ("version", str(STORE_VERSION)),
                ("operation", str("Query")),
            ]),
        ),
        if_else(
            reference("ctx.stash.metadata.modelObjectKey"),
            compound(vec![
                set(reference("expression"), str("")),
                set(reference("expressionNames"), obj(vec![])),
                set(reference("expressionValues"), obj(vec![])),
                for_each(
                    reference("item"),
                    reference("ctx.stash.metadata.modelObjectKey.entrySet()"),
                    vec![
                        set(
                            reference("expression"),
                            str("$expression#keyCount$velocityCount = :valueCount$velocityCount AND "),
                        ),
                        qref(method_call(
                            reference("expressionNames.put"),
                            vec![str("#keyCount$velocityCount"), reference("item.key")],
                        )),
                        qref(method_call(
                            reference("expressionValues.put"),
                            vec![str(":valueCount$velocityCount"), reference("item.value")],
                        )),
                    ],
                ),
                // trim the trailing conjunction
                set(
                    reference("expression"),
                    method_call(
                        reference("expression.replaceAll"),
                        vec![str("AND $"), str("")],
                    ),
                ),
                set(
                    reference("query"),
                    obj(vec![
                        ("expression", reference("expression")),
                        ("expressionNames", reference("expressionNames")),
                        ("expressionValues", reference("expressionValues")),
                    ]),
                ),
            ]),
            set(
                reference("query"),
                obj(vec![
                    ("expression", str("id = :id")),
                    (
                        "expressionValues",
                        obj(vec![(
                            ":id",
                            method_call(
                                reference("util.parseJson"),
                                vec![method_call(
                                    reference("util.dynamodb.toDynamoDBJson"),
                                    vec![reference("ctx.args.id")],
                                )],
                            ),
                        )]),
                    ),
                ]),
            ),
        ),
        qref(method_call(
            reference("GetRequest.put"),
            vec![str("query"), reference("query")],
        )),
        iff(
            not(is_null_or_empty(auth_filter())),
            qref(method_call(
                reference("GetRequest.put"),
                vec![
                    str("filter"),
                    method_call(
                        reference("util.parseJson"),
                        vec![method_call(
                            reference("util.transform.toDynamoDBFilterExpression"),
                            vec![auth_filter()],
                        )],
                    ),
                ],
            )),
        ),
        to_json(reference("GetRequest")),
    ];

    print_block("Get Request template", &compound(statements))
}

/// Get response with scanned-count-aware unauthorized detection.
///
/// Zero items after scanning exactly one record means the record exists but
/// the caller cannot see it — unauthorized. Zero items after scanning zero
/// records means the record genuinely does not exist — null, not an error.
pub fn generate_get_response_template(is_sync_enabled: bool) -> String {
    let mut statements = Vec::new();
    if is_sync_enabled {
        statements.push(iff(
            reference("ctx.error"),
            method_call(
                reference("util.error"),
                vec![
                    reference("ctx.error.message"),
                    reference("ctx.error.type"),
                    reference("ctx.result"),
                ],
            ),
        ));
    } else {
        statements.push(iff(
            reference("ctx.error"),
            method_call(
                reference("util.error"),
                vec![reference("ctx.error.message"), reference("ctx.error.type")],
            ),
        ));
    }
    statements.push(if_else(
        and(vec![
            not(reference("ctx.result.items.isEmpty()")),
            equals(reference("ctx.result.scannedCount"), int(1)),
        ]),
        to_json(reference("ctx.result.items[0]")),
        compound(vec![
            iff(
                and(vec![
                    reference("ctx.result.items.isEmpty()"),
                    equals(reference("ctx.result.scannedCount"), int(1)),
                ]),
                raw("$util.unauthorized()"),
            ),
            to_json(null()),
        ]),
    ));

    print_block("Get Response template", &compound(statements))
}

/// List request: invoke-style pass-through with operation tag `GET`.
pub fn generate_list_request_template(model_name: &str) -> String {
    let statements = vec![
        set(
            reference("lambdaArgs"),
            obj(vec![(
                "detail",
                obj(vec![
                    ("args", reference("context.arguments")),
                    ("info", reference("context.info")),
                    ("tableName", str(model_name)),
                    ("operation", str("GET")),
                ]),
            )]),
        ),
        obj(vec![
            ("version", str(INVOKE_VERSION)),
            ("operation", str("Invoke")),
            (
                "payload",
                method_call(reference("util.toJson"), vec![reference("lambdaArgs")]),
            ),
        ]),
    ];
    print_block("List Request", &compound(statements))
}

/// Sync request: merges the authorization filter with the caller filter,
/// strips an empty values clause (an empty values map fails store-side
/// validation), and applies pagination defaults.
pub fn generate_sync_request_template() -> String {
    let statements = vec![
        set_args(),
        if_else(
            not(is_null_or_empty(auth_filter())),
            compound(vec![
                set(reference("filter"), auth_filter()),
                iff(
                    not(is_null_or_empty(reference("args.filter"))),
                    set(
                        reference("filter"),
                        obj(vec![(
                            "and",
                            list(vec![reference("filter"), reference("args.filter")]),
                        )]),
                    ),
                ),
            ]),
            iff(
                not(is_null_or_empty(reference("args.filter"))),
                set(reference("filter"), reference("args.filter")),
            ),
        ),
        iff(
            not(is_null_or_empty(reference("filter"))),
            compound(vec![
                set(
                    reference("filterExpression"),
                    method_call(
                        reference("util.parseJson"),
                        vec![method_call(
                            reference("util.transform.toDynamoDBFilterExpression"),
                            vec![reference("filter")],
                        )],
                    ),
                ),
                iff(
                    not(method_call(
                        reference("util.isNullOrBlank"),
                        vec![reference("filterExpression.expression")],
                    )),
                    compound(vec![
                        iff(
                            equals(
                                method_call(
                                    reference("filterExpression.expressionValues.size"),
                                    vec![],
                                ),
                                int(0),
                            ),
                            qref(method_call(
                                reference("filterExpression.remove"),
                                vec![str("expressionValues")],
                            )),
                        ),
                        set(reference("filter"), reference("filterExpression")),
                    ]),
                ),
            ]),
        ),
        obj(vec![
            ("version", str(STORE_VERSION)),
            ("operation", str("Sync")),
            (
                "filter",
                if_else(reference("filter"), reference("util.toJson($filter)"), null()),
            ),
            (
                "limit",
                reference(format!(
                    "util.defaultIfNull($args.limit, {})",
                    DEFAULT_SYNC_QUERY_PAGE_LIMIT
                )),
            ),
            (
                "lastSync",
                reference("util.toJson($util.defaultIfNull($args.lastSync, null))"),
            ),
            (
                "nextToken",
                reference("util.toJson($util.defaultIfNull($args.nextToken, null))"),
            ),
        ]),
    ];

    print_block("Sync Request template", &compound(statements))
}

/// Raw-query request: operation tag is always `RAW` and the payload carries
/// the literal statement text from the directive.
pub fn generate_query_request_template(statement: &str) -> String {
    let statements = vec![
        set(
            reference("lambdaArgs"),
            obj(vec![(
                "detail",
                obj(vec![
                    ("args", reference("context.arguments")),
                    ("info", reference("context.info")),
                    ("query", str(statement)),
                    ("operation", str("RAW")),
                ]),
            )]),
        ),
        obj(vec![
            ("version", str(INVOKE_VERSION)),
            ("operation", str("Invoke")),
            (
                "payload",
                method_call(reference("util.toJson"), vec![reference("lambdaArgs")]),
            ),
        ]),
    ];
    print_block("Query Request", &compound(statements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_request_composite_key_path() {
        let template = generate_get_request_template();
        assert!(template.contains("#if( $ctx.stash.metadata.modelObjectKey )"));
        assert!(template
            .contains("\"$expression#keyCount$velocityCount = :valueCount$velocityCount AND \""));
        // trailing conjunction trimmed
        assert!(template.contains("$expression.replaceAll(\"AND $\", \"\")"));
    }

    #[test]
    fn test_get_request_id_fallback_encodes_raw_id() {
        let template = generate_get_request_template();
        assert!(template.contains("\"expression\": \"id = :id\""));
        assert!(template
            .contains("$util.parseJson($util.dynamodb.toDynamoDBJson($ctx.args.id))"));
    }

    #[test]
    fn test_get_request_attaches_auth_filter_when_present() {
        let template = generate_get_request_template();
        assert!(template.contains("#if( !$util.isNullOrEmpty($ctx.stash.authFilter) )"));
        assert!(template.contains(
            "$util.parseJson($util.transform.toDynamoDBFilterExpression($ctx.stash.authFilter))"
        ));
    }

    #[test]
    fn test_get_response_unauthorized_requires_scanned_count_one() {
        let template = generate_get_response_template(false);

        // single scanned item unwraps
        assert!(template.contains(
            "#if( (!$ctx.result.items.isEmpty() && $ctx.result.scannedCount == 1) )"
        ));
        assert!(template.contains("$util.toJson($ctx.result.items[0])"));

        // unauthorized only when something was scanned but nothing returned
        let unauthorized_gate =
            "#if( ($ctx.result.items.isEmpty() && $ctx.result.scannedCount == 1) )";
        assert!(template.contains(unauthorized_gate));
        let gate_pos = template.find(unauthorized_gate).unwrap();
        let unauth_pos = template.find("$util.unauthorized()").unwrap();
        assert!(gate_pos < unauth_pos);

        // zero scanned items renders null instead of erroring
        assert!(template.contains("$util.toJson(null)"));
    }

    #[test]
    fn test_get_response_error_context_only_with_sync() {
        let plain = generate_get_response_template(false);
        let synced = generate_get_response_template(true);
        assert!(plain.contains("$util.error($ctx.error.message, $ctx.error.type)"));
        assert!(synced.contains("$util.error($ctx.error.message, $ctx.error.type, $ctx.result)"));
    }

    #[test]
    fn test_list_request_operation_tag() {
        let template = generate_list_request_template("Post");
        assert!(template.contains("\"operation\": \"GET\""));
        assert!(template.contains("\"tableName\": \"Post\""));
    }

    #[test]
    fn test_sync_filter_merge_is_conjunction() {
        let template = generate_sync_request_template();
        // both present: auth AND caller filter
        assert!(template.contains("\"and\": [$filter, $args.filter]"));
        // auth absent: caller filter alone
        assert!(template.contains("#set( $filter = $args.filter )"));
    }

    #[test]
    fn test_sync_strips_empty_values_clause() {
        let template = generate_sync_request_template();
        assert!(template.contains("#if( $filterExpression.expressionValues.size() == 0 )"));
        assert!(template.contains("$filterExpression.remove(\"expressionValues\")"));
    }

    #[test]
    fn test_sync_pagination_defaults() {
        let template = generate_sync_request_template();
        assert!(template.contains("$util.defaultIfNull($args.limit, 100)"));
        // lastSync and nextToken default to explicit null, never omitted
        assert!(template.contains(
            "\"lastSync\": $util.toJson($util.defaultIfNull($args.lastSync, null))"
        ));
        assert!(template.contains(
            "\"nextToken\": $util.toJson($util.defaultIfNull($args.nextToken, null))"
        ));
    }

    #[test]
    fn test_raw_query_carries_statement_literal() {
        let template = generate_query_request_template("SELECT * FROM Posts");
        assert!(template.contains("\"query\": \"SELECT * FROM Posts\""));
        assert!(template.contains("\"operation\": \"RAW\""));
    }

    #[test]
    fn test_templates_are_deterministic() {
        assert_eq!(
            generate_sync_request_template(),
            generate_sync_request_template()
        );
        assert_eq!(
            generate_get_request_template(),
            generate_get_request_template()
        );
    }
}
