//! Query builder tests

#[cfg(test)]
mod tests {
    use crate::query_builder::sql_generation::SqlGenerator;
    use crate::query_builder::{Predicate, PredicateSink, QueryBuilder};
    use serde_json::json;

    // ========================================
    // Template rendering
    // ========================================

    #[test]
    fn test_template_substitutes_in_order() {
        let predicate = Predicate::template("%s %s '%s'", vec![json!("status"), json!("<="), json!("5")]);
        assert_eq!(SqlGenerator::render_predicate(&predicate), "status <= '5'");
    }

    #[test]
    fn test_template_escapes_arguments() {
        let predicate = Predicate::template(
            "%s %s '%s'",
            vec![json!("name"), json!(">"), json!("'; DROP TABLE users; --")],
        );
        assert_eq!(
            SqlGenerator::render_predicate(&predicate),
            "name > '''; DROP TABLE users; --'"
        );
    }

    #[test]
    fn test_template_missing_and_surplus_arguments() {
        // Missing arguments render empty
        let predicate = Predicate::template("%s %s '%s'", vec![json!("amount"), json!("<")]);
        assert_eq!(SqlGenerator::render_predicate(&predicate), "amount < ''");

        // Surplus arguments are ignored
        let predicate = Predicate::template("%s IS NULL", vec![json!("due"), json!("!*"), json!("x")]);
        assert_eq!(SqlGenerator::render_predicate(&predicate), "due IS NULL");
    }

    #[test]
    fn test_template_percent_sequences() {
        let predicate = Predicate::template("%s LIKE '100%%' AND %d", vec![json!("ratio")]);
        assert_eq!(SqlGenerator::render_predicate(&predicate), "ratio LIKE '100%' AND %d");

        let predicate = Predicate::template("trailing %", vec![]);
        assert_eq!(SqlGenerator::render_predicate(&predicate), "trailing %");
    }

    #[test]
    fn test_template_non_string_arguments() {
        let predicate = Predicate::template(
            "%s = %s AND %s = %s",
            vec![json!("hours"), json!(7), json!("billable"), json!(true)],
        );
        assert_eq!(
            SqlGenerator::render_predicate(&predicate),
            "hours = 7 AND billable = true"
        );

        let predicate = Predicate::template("%s = '%s'", vec![json!("note"), json!(null)]);
        assert_eq!(SqlGenerator::render_predicate(&predicate), "note = ''");
    }

    #[test]
    fn test_raw_predicate_is_verbatim() {
        let predicate = Predicate::raw("LOWER(subject) LIKE '%foo%'");
        assert_eq!(
            SqlGenerator::render_predicate(&predicate),
            "LOWER(subject) LIKE '%foo%'"
        );
    }

    // ========================================
    // WHERE clause assembly
    // ========================================

    #[test]
    fn test_where_clause_empty() {
        assert_eq!(SqlGenerator::build_where_clause(&[]), "");
        assert_eq!(QueryBuilder::new().build_where_clause(), "");
    }

    #[test]
    fn test_where_clause_single_predicate_unwrapped() {
        let query = QueryBuilder::new().where_predicate("status_id IS NULL OR status_id NOT IN ('1')");
        assert_eq!(
            query.build_where_clause(),
            "WHERE status_id IS NULL OR status_id NOT IN ('1')"
        );
    }

    #[test]
    fn test_where_clause_wraps_multiple_predicates() {
        let query = QueryBuilder::new()
            .where_predicate("a IS NULL OR a NOT IN ('1')")
            .where_predicate(Predicate::template("%s > '%s'", vec![json!("b"), json!("2")]));

        assert_eq!(
            query.build_where_clause(),
            "WHERE (a IS NULL OR a NOT IN ('1')) AND (b > '2')"
        );
    }

    #[test]
    fn test_where_clause_keeps_enclosed_predicates_as_is() {
        let query = QueryBuilder::new()
            .where_predicate("(a IS NULL OR a NOT IN ('1'))")
            .where_predicate("(a = 1) OR (b = 2)")
            .where_predicate("c = '(x'");

        assert_eq!(
            query.build_where_clause(),
            "WHERE (a IS NULL OR a NOT IN ('1')) AND ((a = 1) OR (b = 2)) AND (c = '(x')"
        );
    }

    #[test]
    fn test_where_clause_skips_empty_fragments() {
        let query = QueryBuilder::new()
            .where_predicate("")
            .where_predicate("x = 0");

        assert_eq!(query.len(), 2);
        assert_eq!(query.conditions(), vec!["x = 0".to_string()]);
        assert_eq!(query.build_where_clause(), "WHERE x = 0");
    }

    // ========================================
    // Sinks
    // ========================================

    #[test]
    fn test_query_builder_append_keeps_order() {
        let mut query = QueryBuilder::new();
        assert!(query.is_empty());

        query.append(Predicate::raw("first = 1"));
        query.append(Predicate::raw("second = 2"));

        assert_eq!(query.len(), 2);
        assert_eq!(
            query.predicates(),
            &[Predicate::raw("first = 1"), Predicate::raw("second = 2")]
        );
    }

    #[test]
    fn test_vec_is_a_sink() {
        let mut sink: Vec<Predicate> = Vec::new();
        PredicateSink::append(&mut sink, Predicate::raw("1=0"));
        assert_eq!(sink, vec![Predicate::raw("1=0")]);
    }
}
