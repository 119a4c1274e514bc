use crate::test_utils::{compile, iri, parse, var};
use rdf_paths_logical::paths::PropertyPath;
use rdf_paths_logical::{PathCompileError, PathTransformContext};

#[test]
fn test_property() -> Result<(), PathCompileError> {
    let plan = compile("ex:a", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?o");
    Ok(())
}

#[test]
fn test_sequence_is_unrolled_into_one_bgp() -> Result<(), PathCompileError> {
    let plan = compile("ex:a/ex:b/ex:c", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?_path.1 . ?_path.1 <http://ex/b> ?_path.0 . ?_path.0 <http://ex/c> ?o");
    Ok(())
}

#[test]
fn test_inverse_swaps_subject_and_object() -> Result<(), PathCompileError> {
    let plan = compile("^ex:a", iri("x"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?o <http://ex/a> <http://ex/x>");

    let plan = compile("ex:a/^ex:b", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?_path.0 . ?o <http://ex/b> ?_path.0");
    Ok(())
}

#[test]
fn test_alternative() -> Result<(), PathCompileError> {
    let plan = compile("ex:a|ex:b/ex:c", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @r"
    Union
      Bgp: ?s <http://ex/a> ?o
      Bgp: ?s <http://ex/b> ?_path.0 . ?_path.0 <http://ex/c> ?o
    ");
    Ok(())
}

#[test]
fn test_negated_sets() -> Result<(), PathCompileError> {
    let plan = compile("!ex:a", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"NegatedPropertySet: ?s !(<http://ex/a>) ?o");

    let plan = compile("!^ex:a", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"NegatedPropertySet: reversed ?o !(<http://ex/a>) ?s");

    let plan = compile("!(ex:a|^ex:b)", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @r"
    Union
      NegatedPropertySet: ?s !(<http://ex/a>) ?o
      NegatedPropertySet: reversed ?o !(<http://ex/b>) ?s
    ");
    Ok(())
}

#[test]
fn test_fixed_zero_is_zero_length_path() -> Result<(), PathCompileError> {
    let plan = compile("ex:a{0}", iri("x"), var("o"))?;
    insta::assert_snapshot!(plan, @"ZeroLengthPath: <http://ex/x> ?o");

    let plan = compile("(ex:a/ex:b){0}", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"ZeroLengthPath: ?s ?o");
    Ok(())
}

#[test]
fn test_fixed_is_unrolled() -> Result<(), PathCompileError> {
    let plan = compile("ex:a{3}", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?_path.0 . ?_path.0 <http://ex/a> ?_path.1 . ?_path.1 <http://ex/a> ?o");
    Ok(())
}

#[test]
fn test_zero_or_one() -> Result<(), PathCompileError> {
    let plan = compile("ex:a?", iri("x"), var("o"))?;
    insta::assert_snapshot!(plan, @r"
    Distinct
      Union
        ZeroLengthPath: <http://ex/x> ?o
        Bgp: <http://ex/x> <http://ex/a> ?o
    ");
    Ok(())
}

#[test]
fn test_unbounded_operators() -> Result<(), PathCompileError> {
    let plan = compile("ex:a*", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"ZeroOrMorePath: ?s (<http://ex/a>)* ?o");

    let plan = compile("(ex:a/ex:b)+", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"OneOrMorePath: ?s (<http://ex/a>/<http://ex/b>)+ ?o");
    Ok(())
}

#[test]
fn test_unbounded_inside_sequence_becomes_path_pattern() -> Result<(), PathCompileError> {
    let plan = compile("ex:a/ex:b*", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?_path.0 . ?_path.0 <http://ex/b>* ?o");
    Ok(())
}

#[test]
fn test_n_or_more() -> Result<(), PathCompileError> {
    let plan = compile("ex:a{2,}", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?_path.1 . ?_path.1 <http://ex/a> ?_path.0 . ?_path.0 <http://ex/a>* ?o");
    Ok(())
}

#[test]
fn test_n_to_m() -> Result<(), PathCompileError> {
    let plan = compile("ex:a{1,3}", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @r"
    Union
      Union
        Bgp: ?s <http://ex/a> ?o
        Bgp: ?s <http://ex/a> ?_path.0 . ?_path.0 <http://ex/a> ?o
      Bgp: ?s <http://ex/a> ?_path.1 . ?_path.1 <http://ex/a> ?_path.2 . ?_path.2 <http://ex/a> ?o
    ");
    Ok(())
}

#[test]
fn test_zero_to_n() -> Result<(), PathCompileError> {
    let plan = compile("ex:a{,2}", var("s"), var("o"))?;
    insta::assert_snapshot!(plan, @r"
    Union
      Union
        ZeroLengthPath: ?s ?o
        Bgp: ?s <http://ex/a> ?o
      Bgp: ?s <http://ex/a> ?_path.0 . ?_path.0 <http://ex/a> ?o
    ");
    Ok(())
}

#[test]
fn test_scoped_context() -> Result<(), PathCompileError> {
    let mut context = PathTransformContext::new(var("s"), var("o")).with_scope(4);
    let plan = parse("ex:a/ex:b").to_algebra(&mut context)?;
    insta::assert_snapshot!(plan, @"Bgp: ?s <http://ex/a> ?_path4.0 . ?_path4.0 <http://ex/b> ?o");
    Ok(())
}

#[test]
fn test_malformed_range_has_no_patterns() {
    let path = PropertyPath::n_to_m(parse("ex:a"), 3, 2);
    let mut context = PathTransformContext::new(var("s"), var("o"));
    assert!(matches!(
        path.to_algebra(&mut context),
        Err(PathCompileError::NoPatterns)
    ));
}

#[test]
fn test_empty_context_has_no_patterns() {
    let mut context = PathTransformContext::new(var("s"), var("o"));
    assert!(matches!(
        context.finish(),
        Err(PathCompileError::NoPatterns)
    ));
}
