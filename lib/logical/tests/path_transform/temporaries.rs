use crate::test_utils::{bgp_items, compile, var};
use rdf_paths_logical::PathCompileError;
use rustc_hash::FxHashMap;

/// Paths whose lowering introduces join variables at increasing nesting depths.
const NESTED_PATHS: [&str; 7] = [
    "ex:a/ex:b",
    "ex:a/(ex:b/ex:c)",
    "(ex:a/ex:b)/(ex:c/ex:d)",
    "ex:a/^(ex:b/ex:c{2})/ex:d",
    "(ex:a/ex:b)|(ex:c/(ex:d/ex:a))",
    "(ex:a/ex:b){1,3}/ex:c",
    "((ex:a/ex:b)|ex:c/ex:d)?",
];

#[test]
fn test_join_variables_never_collide_with_pattern_variables() -> Result<(), PathCompileError> {
    // Legal SPARQL names that look like the generated ones.
    for (subject, object) in [("s", "o"), ("_path0", "_path1"), ("path", "_path_0")] {
        for path in NESTED_PATHS {
            let plan = compile(path, var(subject), var(object))?;
            for item in bgp_items(&plan) {
                if item.is_temporary() {
                    assert_ne!(item, var(subject), "{path}");
                    assert_ne!(item, var(object), "{path}");
                } else {
                    assert!(item == var(subject) || item == var(object), "{path}: {item}");
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_each_join_variable_connects_exactly_two_patterns() -> Result<(), PathCompileError> {
    for path in ["ex:a/ex:b/ex:c/ex:d", "ex:a/(ex:b/(ex:c/ex:d))", "ex:a{4}/^ex:b"] {
        let plan = compile(path, var("s"), var("o"))?;
        let mut occurrences = FxHashMap::default();
        for item in bgp_items(&plan).into_iter().filter(|i| i.is_temporary()) {
            *occurrences.entry(item.to_string()).or_insert(0) += 1;
        }
        assert!(!occurrences.is_empty(), "{path}");
        assert!(occurrences.values().all(|count| *count == 2), "{path}: {occurrences:?}");
    }
    Ok(())
}
