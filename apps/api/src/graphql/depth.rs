//! Query depth guard
//!
//! Runs over the parsed document before anything executes. The depth of an
//! operation is the number of nested field levels below its root: in
//! `{ users { posts { id } } }` the `users` field sits at depth 1 and `id` at
//! depth 3. Fragment spreads and inline fragments add no level of their own;
//! their fields are counted where they are spread.
//!
//! Introspection fields (`__schema`, `__type`, `__typename`) are not counted.

use std::collections::{HashMap, HashSet};

use async_graphql::parser::types::{
    ExecutableDocument, FragmentDefinition, Selection, SelectionSet,
};
use async_graphql::parser::{Pos, Positioned};
use async_graphql::{Name, ServerError};

/// Deepest nesting accepted when nothing else is configured
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// An operation nested deeper than allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthViolation {
    /// Operation name, `None` for an anonymous operation
    pub operation: Option<String>,
    /// Depth the operation actually reaches
    pub depth: usize,
    /// Configured maximum
    pub max_depth: usize,
    /// Location of the operation in the document
    pub pos: Pos,
}

impl DepthViolation {
    pub fn message(&self) -> String {
        match &self.operation {
            Some(name) => format!(
                "'{}' exceeds maximum operation depth of {} (depth {})",
                name, self.max_depth, self.depth
            ),
            None => format!(
                "operation exceeds maximum operation depth of {} (depth {})",
                self.max_depth, self.depth
            ),
        }
    }
}

impl From<DepthViolation> for ServerError {
    fn from(violation: DepthViolation) -> Self {
        ServerError::new(violation.message(), Some(violation.pos))
    }
}

/// Check every operation of `document` against `max_depth`
///
/// Returns one violation per offending operation, empty when the document
/// is acceptable.
pub fn validate(document: &ExecutableDocument, max_depth: usize) -> Vec<DepthViolation> {
    let mut measure = DepthMeasure::new(&document.fragments);

    document
        .operations
        .iter()
        .filter_map(|(name, operation)| {
            let depth = measure.selection_set(&operation.node.selection_set.node);
            (depth > max_depth).then(|| DepthViolation {
                operation: name.map(|n| n.to_string()),
                depth,
                max_depth,
                pos: operation.pos,
            })
        })
        .collect()
}

/// Depth of the deepest operation in `document`
pub fn document_depth(document: &ExecutableDocument) -> usize {
    let mut measure = DepthMeasure::new(&document.fragments);

    document
        .operations
        .iter()
        .map(|(_, operation)| measure.selection_set(&operation.node.selection_set.node))
        .max()
        .unwrap_or(0)
}

struct DepthMeasure<'a> {
    fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    /// Depth contributed by each fragment, measured once
    known: HashMap<&'a str, usize>,
    /// Fragments currently being expanded
    expanding: HashSet<&'a str>,
}

impl<'a> DepthMeasure<'a> {
    fn new(fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>) -> Self {
        Self {
            fragments,
            known: HashMap::new(),
            expanding: HashSet::new(),
        }
    }

    fn selection_set(&mut self, set: &'a SelectionSet) -> usize {
        set.items
            .iter()
            .map(|item| match &item.node {
                Selection::Field(field) => {
                    if field.node.name.node.starts_with("__") {
                        0
                    } else {
                        1 + self.selection_set(&field.node.selection_set.node)
                    }
                }
                Selection::FragmentSpread(spread) => {
                    self.fragment(spread.node.fragment_name.node.as_str())
                }
                Selection::InlineFragment(inline) => {
                    self.selection_set(&inline.node.selection_set.node)
                }
            })
            .max()
            .unwrap_or(0)
    }

    fn fragment(&mut self, name: &'a str) -> usize {
        if let Some(depth) = self.known.get(name) {
            return *depth;
        }
        // unknown fragments are reported by schema validation
        let Some((key, definition)) = self.fragments.get_key_value(name) else {
            return 0;
        };
        let key = key.as_str();
        // a cycle back into a fragment being expanded is not followed
        if !self.expanding.insert(key) {
            return 0;
        }

        let depth = self.selection_set(&definition.node.selection_set.node);
        self.expanding.remove(key);
        self.known.insert(key, depth);
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::parser::parse_query;
    use rstest::rstest;

    fn depth_of(query: &str) -> usize {
        document_depth(&parse_query(query).unwrap())
    }

    #[rstest]
    #[case("{ users { id } }", 2)]
    #[case("{ memberTypes { id } users { posts { author { id } } } }", 4)]
    #[case("{ __typename users { id } }", 2)]
    #[case("{ __schema { types { fields { type { ofType { name } } } } } }", 0)]
    #[case("{ users { ... on User { posts { id } } } }", 3)]
    fn test_depth(#[case] query: &str, #[case] expected: usize) {
        assert_eq!(depth_of(query), expected);
    }

    #[test]
    fn test_fragment_counted_where_spread() {
        let query = r#"
            query {
                users { ...UserPosts }
            }
            fragment UserPosts on User {
                posts { author { id } }
            }
        "#;
        assert_eq!(depth_of(query), 4);
    }

    #[test]
    fn test_fragment_reused_at_different_depths() {
        let query = r#"
            query {
                user(id: "00000000-0000-0000-0000-000000000000") { ...Name }
                posts { author { ...Name } }
            }
            fragment Name on User { name }
        "#;
        assert_eq!(depth_of(query), 3);
    }

    #[test]
    fn test_fragment_cycle_terminates() {
        let query = r#"
            query { users { ...A } }
            fragment A on User { posts { author { ...B } } }
            fragment B on User { ...A }
        "#;
        assert_eq!(depth_of(query), 3);
    }

    #[test]
    fn test_violation_reports_operation() {
        let document = parse_query(
            "query Deep { users { posts { author { profile { memberType { id } } } } } }",
        )
        .unwrap();

        let violations = validate(&document, 5);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].operation.as_deref(), Some("Deep"));
        assert_eq!(violations[0].depth, 6);
        assert!(violations[0].message().contains("maximum operation depth of 5"));
    }

    #[test]
    fn test_every_operation_checked() {
        let document = parse_query(
            r#"
            query Shallow { users { id } }
            query Deep { users { profile { user { profile { id } } } } }
            "#,
        )
        .unwrap();

        let violations = validate(&document, 3);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].operation.as_deref(), Some("Deep"));
    }

    #[test]
    fn test_violation_into_server_error() {
        let document = parse_query("{ users { posts { id } } }").unwrap();
        let violation = validate(&document, 2).remove(0);

        let error: ServerError = violation.into();
        assert!(error.message.starts_with("operation exceeds"));
        assert_eq!(error.locations.len(), 1);
    }
}
