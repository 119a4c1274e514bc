use crate::paths::{Cardinality, PropertyPath};
use crate::patterns::{BgpPattern, PatternItem};
use crate::{Algebra, PathCompileError};
use rdf_paths_model::NamedNode;
use std::mem;

/// The state of lowering one property path into algebra.
///
/// A context is created for a `(subject, path, object)` pattern and handed to
/// [PropertyPath::to_algebra]. Statically bounded parts of the path are unrolled into triple
/// patterns that are joined through generated temporary variables. Unbounded parts become dedicated
/// path operators that are evaluated by traversing the graph.
///
/// ```
/// use rdf_paths_logical::paths::PathParser;
/// use rdf_paths_logical::patterns::PatternItem;
/// use rdf_paths_logical::PathTransformContext;
/// use rdf_paths_model::Variable;
///
/// let path = PathParser::new()
///     .with_prefix("ex", "http://example.com/")?
///     .parse("ex:knows/ex:name")?;
/// let mut context = PathTransformContext::new(
///     Variable::new("person")?.into(),
///     Variable::new("name")?.into(),
/// );
///
/// let algebra = path.to_algebra(&mut context)?;
/// assert_eq!(
///     algebra.to_string(),
///     "Bgp: ?person <http://example.com/knows> ?_path.0 . ?_path.0 <http://example.com/name> ?name"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug)]
pub struct PathTransformContext {
    subject: PatternItem,
    object: PatternItem,
    /// The item the whole path ends in.
    end: PatternItem,
    /// The id of the next temporary variable.
    next_id: u32,
    /// The naming scope of the temporary variables.
    scope: Option<u32>,
    /// Whether the current composition is the outermost one.
    top: bool,
    patterns: Vec<BgpPattern>,
}

impl PathTransformContext {
    pub fn new(subject: PatternItem, object: PatternItem) -> Self {
        Self {
            subject,
            end: object.clone(),
            object,
            next_id: 0,
            scope: None,
            top: true,
            patterns: Vec::new(),
        }
    }

    /// Uses a separate naming scope for the temporary variables of this context.
    #[must_use]
    pub fn with_scope(mut self, scope: u32) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn subject(&self) -> &PatternItem {
        &self.subject
    }

    pub fn object(&self) -> &PatternItem {
        &self.object
    }

    pub fn end(&self) -> &PatternItem {
        &self.end
    }

    pub fn is_top(&self) -> bool {
        self.top
    }

    /// Returns the patterns that have been accumulated so far.
    pub fn patterns(&self) -> &[BgpPattern] {
        &self.patterns
    }

    /// Creates a fresh temporary variable.
    pub fn next_temporary_variable(&mut self) -> PatternItem {
        let variable = PatternItem::temporary(self.scope, self.next_id);
        self.next_id += 1;
        variable
    }

    /// Derives a context for an independent sub-compilation. The derived context starts with the
    /// same endpoints and counter but without any patterns.
    pub fn derive(&self) -> Self {
        Self {
            subject: self.subject.clone(),
            object: self.object.clone(),
            end: self.end.clone(),
            next_id: self.next_id,
            scope: self.scope,
            top: self.top,
            patterns: Vec::new(),
        }
    }

    /// Advances the counter past every temporary variable used by the `derived` context.
    pub fn merge_counter(&mut self, derived: &Self) {
        self.next_id = self.next_id.max(derived.next_id);
    }

    pub fn add_triple_pattern(
        &mut self,
        subject: PatternItem,
        predicate: NamedNode,
        object: PatternItem,
    ) {
        self.patterns.push(BgpPattern::triple(subject, predicate, object));
    }

    pub fn add_path_pattern(
        &mut self,
        subject: PatternItem,
        path: PropertyPath,
        object: PatternItem,
    ) {
        self.patterns.push(BgpPattern::path(subject, path, object));
    }

    /// Turns the accumulated patterns into a [Algebra::Bgp].
    ///
    /// # Errors
    ///
    /// Returns [PathCompileError::NoPatterns] if no pattern has been added.
    pub fn finish(&mut self) -> Result<Algebra, PathCompileError> {
        if self.patterns.is_empty() {
            return Err(PathCompileError::NoPatterns);
        }
        Ok(Algebra::Bgp(mem::take(&mut self.patterns)))
    }

    /// Adds the patterns for the segment `subject path object`. Properties, inverses, sequences
    /// and fixed repetitions are inlined. Every other path is added as a path pattern.
    fn add_segment(&mut self, subject: PatternItem, path: &PropertyPath, object: PatternItem) {
        match path {
            PropertyPath::Property(predicate) => {
                self.add_triple_pattern(subject, predicate.clone(), object);
            }
            PropertyPath::Inverse(inner) => self.add_segment(object, inner, subject),
            PropertyPath::Sequence(lhs, rhs) => {
                let join = self.next_temporary_variable();
                self.add_segment(subject, lhs, join.clone());
                self.add_segment(join, rhs, object);
            }
            PropertyPath::Cardinality(inner, Cardinality::Fixed(n)) if *n > 0 => {
                self.add_repetitions(subject, inner, *n, object);
            }
            _ => self.add_path_pattern(subject, path.clone(), object),
        }
    }

    /// Unrolls `n` hops of `inner` through `n - 1` temporary variables.
    fn add_repetitions(
        &mut self,
        subject: PatternItem,
        inner: &PropertyPath,
        n: u32,
        object: PatternItem,
    ) {
        let mut current = subject;
        for _ in 1..n {
            let next = self.next_temporary_variable();
            self.add_segment(current, inner, next.clone());
            current = next;
        }
        self.add_segment(current, inner, object);
    }

    /// The item the last hop of a composition binds to.
    fn final_object(&self, top: bool) -> PatternItem {
        if top {
            self.end.clone()
        } else {
            self.object.clone()
        }
    }

    /// Swaps subject and object. The path now ends in the new object.
    fn reverse(&mut self) {
        mem::swap(&mut self.subject, &mut self.object);
        self.end = self.object.clone();
    }
}

impl PropertyPath {
    /// Lowers this path, placed between the subject and object of `context`, into algebra.
    ///
    /// # Errors
    ///
    /// Returns an error if the lowering produced an empty basic graph pattern. This only happens
    /// for malformed cardinalities such as `{3,2}`.
    pub fn to_algebra(
        &self,
        context: &mut PathTransformContext,
    ) -> Result<Algebra, PathCompileError> {
        match self {
            Self::Property(predicate) => {
                let subject = context.subject.clone();
                let object = context.object.clone();
                context.add_triple_pattern(subject, predicate.clone(), object);
                context.finish()
            }
            Self::Sequence(lhs, rhs) => lower_sequence(context, lhs, rhs),
            Self::Alternative(lhs, rhs) => lower_alternative(context, lhs, rhs),
            Self::Inverse(inner) => {
                let end = context.end.clone();
                context.reverse();
                let result = inner.to_algebra(context);
                context.reverse();
                context.end = end;
                result
            }
            Self::NegatedSet { forward, inverse } => {
                lower_negated_set(context, forward, inverse)
            }
            Self::Cardinality(inner, cardinality) => {
                lower_cardinality(context, inner, *cardinality)
            }
        }
    }
}

/// Joins `lhs` and `rhs` through a temporary variable.
fn lower_sequence(
    context: &mut PathTransformContext,
    lhs: &PropertyPath,
    rhs: &PropertyPath,
) -> Result<Algebra, PathCompileError> {
    let top = context.top;
    context.top = false;

    let subject = context.subject.clone();
    let join = context.next_temporary_variable();
    context.add_segment(subject, lhs, join.clone());
    let object = context.final_object(top);
    context.add_segment(join, rhs, object);

    context.top = top;
    context.finish()
}

/// Lowers both sides independently and unions them.
fn lower_alternative(
    context: &mut PathTransformContext,
    lhs: &PropertyPath,
    rhs: &PropertyPath,
) -> Result<Algebra, PathCompileError> {
    let mut lhs_context = context.derive();
    let lhs = lhs.to_algebra(&mut lhs_context)?;
    context.merge_counter(&lhs_context);

    let mut rhs_context = context.derive();
    let rhs = rhs.to_algebra(&mut rhs_context)?;
    context.merge_counter(&rhs_context);

    Ok(Algebra::union(lhs, rhs))
}

fn lower_negated_set(
    context: &mut PathTransformContext,
    forward: &[NamedNode],
    inverse: &[NamedNode],
) -> Result<Algebra, PathCompileError> {
    let forward_set = || Algebra::NegatedPropertySet {
        subject: context.subject.clone(),
        object: context.object.clone(),
        properties: forward.to_vec(),
        reversed: false,
    };
    let inverse_set = || Algebra::NegatedPropertySet {
        subject: context.object.clone(),
        object: context.subject.clone(),
        properties: inverse.to_vec(),
        reversed: true,
    };

    let algebra = match (forward.is_empty(), inverse.is_empty()) {
        (true, false) => inverse_set(),
        (false, false) => Algebra::union(forward_set(), inverse_set()),
        // A set without members matches every forward edge.
        (_, true) => forward_set(),
    };
    Ok(algebra)
}

fn lower_cardinality(
    context: &mut PathTransformContext,
    inner: &PropertyPath,
    cardinality: Cardinality,
) -> Result<Algebra, PathCompileError> {
    match cardinality {
        Cardinality::Fixed(0) => Ok(zero_length_path(context)),
        Cardinality::Fixed(n) => {
            let top = context.top;
            context.top = false;
            let subject = context.subject.clone();
            let object = context.final_object(top);
            context.add_repetitions(subject, inner, n, object);
            context.top = top;
            context.finish()
        }
        Cardinality::ZeroOrMore => Ok(Algebra::ZeroOrMorePath {
            subject: context.subject.clone(),
            object: context.object.clone(),
            path: inner.clone(),
        }),
        Cardinality::OneOrMore => Ok(Algebra::OneOrMorePath {
            subject: context.subject.clone(),
            object: context.object.clone(),
            path: inner.clone(),
        }),
        Cardinality::ZeroOrOne => {
            let mut inner_context = context.derive();
            let one = inner.to_algebra(&mut inner_context)?;
            context.merge_counter(&inner_context);
            Ok(Algebra::distinct(Algebra::union(
                zero_length_path(context),
                one,
            )))
        }
        Cardinality::NOrMore(n) => {
            let subject = context.subject.clone();
            let object = context.object.clone();
            let join = context.next_temporary_variable();
            context.add_segment(subject, &PropertyPath::fixed(inner.clone(), n), join.clone());
            context.add_segment(join, &PropertyPath::zero_or_more(inner.clone()), object);
            context.finish()
        }
        Cardinality::ZeroToN(n) => lower_cardinality(context, inner, Cardinality::NToM(0, n)),
        Cardinality::NToM(n, m) => {
            let mut result: Option<Algebra> = None;
            for k in n..=m {
                let mut fixed_context = context.derive();
                let fixed = lower_cardinality(&mut fixed_context, inner, Cardinality::Fixed(k))?;
                context.merge_counter(&fixed_context);
                result = Some(match result {
                    Some(lhs) => Algebra::union(lhs, fixed),
                    None => fixed,
                });
            }
            result.ok_or(PathCompileError::NoPatterns)
        }
    }
}

fn zero_length_path(context: &PathTransformContext) -> Algebra {
    Algebra::ZeroLengthPath {
        subject: context.subject.clone(),
        object: context.object.clone(),
    }
}
