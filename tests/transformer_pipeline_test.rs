/// End-to-end tests for the directive-to-template pipeline
///
/// These tests verify the full compile path:
/// 1. An annotated GraphQL schema parses
/// 2. The scan phase records @model and @query occurrences
/// 3. The generate phase registers the expected resolvers
/// 4. The generated templates carry the right operation tags and key logic

mod pipeline_tests {
    use async_graphql::parser::parse_schema;
    use graphsmith::transformer::{ModelTransformer, QueryTransformer, ResolverOutput};

    const SCHEMA: &str = r#"
        type Post @model {
            id: ID!
            title: String
        }

        type Comment @model(timestamps: null) {
            id: ID!
            body: String
        }

        type Query {
            topAuthors: [String] @query(statement: "SELECT author FROM posts GROUP BY author")
        }
    "#;

    fn compile(sync_enabled: bool) -> ResolverOutput {
        let document = parse_schema(SCHEMA).expect("schema should parse");

        let mut models = ModelTransformer::new();
        models.scan(&document).expect("model scan should succeed");
        let mut queries = QueryTransformer::new();
        queries.scan(&document).expect("query scan should succeed");

        let mut output = ResolverOutput::new();
        models
            .generate(&mut output, sync_enabled)
            .expect("model generate should succeed");
        queries
            .generate(&mut output, sync_enabled)
            .expect("query generate should succeed");
        output
    }

    #[test]
    fn test_resolver_registry_contents() {
        let output = compile(false);

        let keys: Vec<_> = output.resolvers().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                "Mutation.createPost",
                "Mutation.updatePost",
                "Mutation.deletePost",
                "Query.getPost",
                "Query.listPosts",
                "Mutation.createComment",
                "Mutation.updateComment",
                "Mutation.deleteComment",
                "Query.getComment",
                "Query.listComments",
                "Query.topAuthors",
            ]
        );

        // every resolver shares the single proxy data source
        for (_, resolver) in output.resolvers() {
            assert_eq!(resolver.data_source, "SqlProxyDataSource");
        }
        assert_eq!(output.data_sources().count(), 1);
    }

    #[test]
    fn test_mutation_templates_carry_operation_tags() {
        let output = compile(false);

        let create = output.resolver("Mutation", "createPost").unwrap();
        assert!(create.request_template.contains("\"operation\": \"INSERT\""));
        assert!(create.request_template.contains("\"tableName\": \"Post\""));

        let update = output.resolver("Mutation", "updatePost").unwrap();
        assert!(update.request_template.contains("\"operation\": \"UPDATE\""));

        let delete = output.resolver("Mutation", "deletePost").unwrap();
        assert!(delete.request_template.contains("\"operation\": \"DELETE\""));
    }

    #[test]
    fn test_create_slots_stamp_defaults_and_guard_key() {
        let output = compile(false);
        let create = output.resolver("Mutation", "createPost").unwrap();

        let slot_names: Vec<_> = create.slots.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(slot_names, vec!["init", "condition"]);

        let init = &create.slots[0].1;
        assert!(init.contains("$util.time.nowISO8601()"));
        assert!(init.contains("$ctx.stash.defaultValues.put(\"createdAt\", $createdAt)"));

        // create precondition: the key must not already exist
        let condition = &create.slots[1].1;
        assert!(condition.contains("\"attributeExists\": false"));
    }

    #[test]
    fn test_timestamps_null_disables_stamping() {
        let output = compile(false);
        let create = output.resolver("Mutation", "createComment").unwrap();

        let init = &create.slots[0].1;
        assert!(!init.contains("nowISO8601"));
        assert!(!init.contains("autoId"));
    }

    #[test]
    fn test_delete_has_condition_slot_only() {
        let output = compile(false);
        let delete = output.resolver("Mutation", "deletePost").unwrap();

        let slot_names: Vec<_> = delete.slots.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(slot_names, vec!["condition"]);
        assert!(delete.slots[0].1.contains("\"attributeExists\": true"));
    }

    #[test]
    fn test_raw_query_resolver_embeds_statement() {
        let output = compile(false);
        let raw = output.resolver("Query", "topAuthors").unwrap();

        assert!(raw.request_template.contains("\"operation\": \"RAW\""));
        assert!(raw
            .request_template
            .contains("SELECT author FROM posts GROUP BY author"));
    }

    #[test]
    fn test_sync_resolvers_generated_only_when_enabled() {
        let without_sync = compile(false);
        assert!(without_sync.resolver("Query", "syncPosts").is_none());

        let with_sync = compile(true);
        let sync = with_sync.resolver("Query", "syncPosts").unwrap();
        assert!(sync.request_template.contains("\"operation\": \"Sync\""));
        assert!(sync.request_template.contains("\"limit\""));
        assert!(with_sync.resolver("Query", "syncComments").is_some());
    }

    #[test]
    fn test_sync_changes_get_response_error_handling() {
        let without_sync = compile(false);
        let with_sync = compile(true);

        let plain = without_sync.resolver("Query", "getPost").unwrap();
        let sync = with_sync.resolver("Query", "getPost").unwrap();
        assert_ne!(plain.response_template, sync.response_template);
        assert!(sync.response_template.contains("$ctx.result"));
    }

    #[test]
    fn test_double_generate_is_idempotent() {
        let document = parse_schema(SCHEMA).expect("schema should parse");

        let mut models = ModelTransformer::new();
        models.scan(&document).unwrap();

        let mut output = ResolverOutput::new();
        models.generate(&mut output, false).unwrap();
        let first_count = output.resolvers().count();
        models.generate(&mut output, false).unwrap();

        assert_eq!(output.resolvers().count(), first_count);
    }

    #[test]
    fn test_template_files_cover_every_resolver() {
        let output = compile(false);

        let names: Vec<_> = output.templates().into_iter().map(|(name, _)| name).collect();
        assert!(names.contains(&"Mutation.createPost.req".to_string()));
        assert!(names.contains(&"Mutation.createPost.res".to_string()));
        assert!(names.contains(&"Mutation.createPost.init".to_string()));
        assert!(names.contains(&"Mutation.createPost.condition".to_string()));
        assert!(names.contains(&"Query.topAuthors.req".to_string()));
    }
}
