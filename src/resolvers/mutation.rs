/// Mutation request templates and pipeline slot templates
///
/// Create/update/delete requests are invoke-style pass-throughs: the caller
/// arguments, field-selection info, target table and an operation tag are
/// wrapped into a single payload for the proxy compute function. The init
/// slots stamp default values ahead of the request, and the condition slot
/// builds the conditional-write key condition.
use crate::resolvers::{INVOKE_VERSION, STORE_VERSION};
use crate::transformer::directive::ModelDirectiveConfig;
use crate::vtl::expr::{
    boolean, comment, compound, for_each, if_else, method_call, obj, qref, reference, set, str,
    to_json, Expression,
};
use crate::vtl::print_block;

fn invoke_request(model_name: &str, operation: &str, args: Expression) -> Vec<Expression> {
    vec![
        set(
            reference("lambdaArgs"),
            obj(vec![(
                "detail",
                obj(vec![
                    ("args", args),
                    ("info", reference("context.info")),
                    ("tableName", str(model_name)),
                    ("operation", str(operation)),
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
    ]
}

/// Create mutation request: operation tag `INSERT`, caller input merged
/// over the stamped defaults.
pub fn generate_create_request_template(model_name: &str) -> String {
    let mut statements = vec![generate_apply_defaults_expression("mergedArgs")];
    statements.extend(invoke_request(model_name, "INSERT", reference("mergedArgs")));
    print_block("Create Request template", &compound(statements))
}

/// Update mutation request: operation tag `UPDATE`, caller input merged
/// over the stamped defaults.
pub fn generate_update_request_template(model_name: &str) -> String {
    let mut statements = vec![generate_apply_defaults_expression("mergedArgs")];
    statements.extend(invoke_request(model_name, "UPDATE", reference("mergedArgs")));
    print_block("Update Request template", &compound(statements))
}

/// Delete mutation request: operation tag `DELETE`.
pub fn generate_delete_request_template(model_name: &str) -> String {
    print_block(
        "Delete Request template",
        &compound(invoke_request(
            model_name,
            "DELETE",
            reference("context.arguments"),
        )),
    )
}

/// Idempotent `defaultValues` stash initialization: reuse the map when a
/// prior pipeline stage already created it.
fn init_default_values() -> Expression {
    qref(method_call(
        reference("ctx.stash.put"),
        vec![
            str("defaultValues"),
            method_call(
                reference("util.defaultIfNull"),
                vec![reference("ctx.stash.defaultValues"), obj(vec![])],
            ),
        ],
    ))
}

fn slot_result() -> Expression {
    to_json(obj(vec![
        ("version", str(STORE_VERSION)),
        ("payload", obj(vec![])),
    ]))
}

/// Init slot for create mutations.
///
/// When timestamp tracking is configured, `now` is computed exactly once and
/// reused for both the created-at and updated-at fields so the two stamps
/// are bit-identical.
pub fn generate_create_init_slot_template(config: &ModelDirectiveConfig) -> String {
    let mut statements = vec![init_default_values()];

    if let Some(timestamps) = &config.timestamps {
        statements.push(set(
            reference("createdAt"),
            method_call(reference("util.time.nowISO8601"), vec![]),
        ));
        statements.push(qref(method_call(
            reference("ctx.stash.defaultValues.put"),
            vec![
                str("id"),
                method_call(reference("util.autoId"), vec![]),
            ],
        )));
        if let Some(created_at) = &timestamps.created_at {
            statements.push(qref(method_call(
                reference("ctx.stash.defaultValues.put"),
                vec![str(created_at.as_str()), reference("createdAt")],
            )));
        }
        if let Some(updated_at) = &timestamps.updated_at {
            statements.push(qref(method_call(
                reference("ctx.stash.defaultValues.put"),
                vec![str(updated_at.as_str()), reference("createdAt")],
            )));
        }
    }
    statements.push(slot_result());

    print_block("Initialization default values", &compound(statements))
}

/// Init slot for update mutations: updated-at only, never created-at.
pub fn generate_update_init_slot_template(config: &ModelDirectiveConfig) -> String {
    let mut statements = vec![init_default_values()];

    if let Some(timestamps) = &config.timestamps {
        if let Some(updated_at) = &timestamps.updated_at {
            statements.push(set(
                reference("updatedAt"),
                method_call(reference("util.time.nowISO8601"), vec![]),
            ));
            statements.push(qref(method_call(
                reference("ctx.stash.defaultValues.put"),
                vec![str(updated_at.as_str()), reference("updatedAt")],
            )));
        }
    }
    statements.push(slot_result());

    print_block("Initialization default values", &compound(statements))
}

/// Merge stamped defaults into the caller's `input`, then rebuild the full
/// arguments map as `$target` with the merged input in place. Defaults go
/// in first and caller-supplied input overwrites them; arguments other than
/// `input` (conditions, client metadata) pass through untouched.
pub fn generate_apply_defaults_expression(target: &str) -> Expression {
    compound(vec![
        set(
            reference("mergedInput"),
            method_call(
                reference("util.defaultIfNull"),
                vec![reference("ctx.stash.defaultValues"), obj(vec![])],
            ),
        ),
        qref(method_call(
            reference("mergedInput.putAll"),
            vec![method_call(
                reference("util.defaultIfNull"),
                vec![reference("ctx.args.input"), obj(vec![])],
            )],
        )),
        set(reference(target), obj(vec![])),
        qref(method_call(
            reference(format!("{}.putAll", target)),
            vec![reference("ctx.args")],
        )),
        qref(method_call(
            reference(format!("{}.put", target)),
            vec![str("input"), reference("mergedInput")],
        )),
    ])
}

/// Key-condition statements for conditional writes.
///
/// With a composite/custom primary key (the per-request key metadata
/// binding is present) one `attributeExists` condition is built per key
/// component, positionally numbered; otherwise a single condition on `id`.
/// `attribute_exists` is true for update/delete preconditions, false for
/// create preconditions — the caller decides, nothing is inferred.
pub fn key_condition_statements(attribute_exists: bool) -> Vec<Expression> {
    vec![
        comment("Begin - key condition"),
        if_else(
            reference("ctx.stash.metadata.modelObjectKey"),
            compound(vec![
                set(reference("keyConditionExpr"), obj(vec![])),
                set(reference("keyConditionExprNames"), obj(vec![])),
                for_each(
                    reference("entry"),
                    reference("ctx.stash.metadata.modelObjectKey.entrySet()"),
                    vec![
                        qref(method_call(
                            reference("keyConditionExpr.put"),
                            vec![
                                str("keyCondition$velocityCount"),
                                obj(vec![("attributeExists", boolean(attribute_exists))]),
                            ],
                        )),
                        qref(method_call(
                            reference("keyConditionExprNames.put"),
                            vec![str("#keyCondition$velocityCount"), str("$entry.key")],
                        )),
                    ],
                ),
                qref(method_call(
                    reference("ctx.stash.conditions.add"),
                    vec![reference("keyConditionExpr")],
                )),
            ]),
            compound(vec![qref(method_call(
                reference("ctx.stash.conditions.add"),
                vec![obj(vec![(
                    "id",
                    obj(vec![("attributeExists", boolean(attribute_exists))]),
                )])],
            ))]),
        ),
        comment("End - key condition"),
    ]
}

/// Printed condition slot wrapping [`key_condition_statements`].
pub fn generate_condition_slot_template(attribute_exists: bool) -> String {
    let mut statements = key_condition_statements(attribute_exists);
    statements.push(slot_result());
    print_block("Key condition template", &compound(statements))
}
