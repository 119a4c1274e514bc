use rdf_paths_logical::paths::{PathParser, PropertyPath};
use rdf_paths_logical::patterns::{BgpPattern, PatternItem};
use rdf_paths_logical::{Algebra, PathCompileError, PathTransformContext};
use rdf_paths_model::{NamedNode, Variable};

pub fn parse(path: &str) -> PropertyPath {
    PathParser::new()
        .with_prefix("ex", "http://ex/")
        .unwrap()
        .parse(path)
        .unwrap()
}

pub fn var(name: &str) -> PatternItem {
    Variable::new_unchecked(name).into()
}

pub fn iri(name: &str) -> PatternItem {
    PatternItem::Term(NamedNode::new_unchecked(format!("http://ex/{name}")).into())
}

pub fn compile(
    path: &str,
    subject: PatternItem,
    object: PatternItem,
) -> Result<Algebra, PathCompileError> {
    let mut context = PathTransformContext::new(subject, object);
    parse(path).to_algebra(&mut context)
}

/// Collects every pattern item of the basic graph patterns in `algebra`.
pub fn bgp_items(algebra: &Algebra) -> Vec<PatternItem> {
    match algebra {
        Algebra::Bgp(patterns) => patterns
            .iter()
            .flat_map(|pattern| match pattern {
                BgpPattern::Triple(triple) => [triple.subject.clone(), triple.object.clone()],
                BgpPattern::Path(path) => [path.subject.clone(), path.object.clone()],
            })
            .collect(),
        Algebra::Union(lhs, rhs) | Algebra::Join(lhs, rhs) => {
            let mut items = bgp_items(lhs);
            items.extend(bgp_items(rhs));
            items
        }
        Algebra::Distinct(inner) | Algebra::Project(inner, _) => bgp_items(inner),
        Algebra::ZeroLengthPath { .. }
        | Algebra::ZeroOrMorePath { .. }
        | Algebra::OneOrMorePath { .. }
        | Algebra::NegatedPropertySet { .. } => Vec::new(),
    }
}
