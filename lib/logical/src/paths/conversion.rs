use crate::paths::PropertyPath;
use spargebra::algebra::PropertyPathExpression;

impl From<&PropertyPathExpression> for PropertyPath {
    fn from(path: &PropertyPathExpression) -> Self {
        match path {
            PropertyPathExpression::NamedNode(node) => Self::Property(node.clone()),
            PropertyPathExpression::Reverse(inner) => {
                // The parser of spargebra represents `!^p` as the reverse of a negated set.
                if let PropertyPathExpression::NegatedPropertySet(properties) = inner.as_ref() {
                    return Self::negated_set(Vec::new(), properties.clone());
                }
                Self::inverse(inner.as_ref().into())
            }
            PropertyPathExpression::Sequence(lhs, rhs) => {
                Self::sequence(lhs.as_ref().into(), rhs.as_ref().into())
            }
            PropertyPathExpression::Alternative(lhs, rhs) => {
                Self::alternative(lhs.as_ref().into(), rhs.as_ref().into())
            }
            PropertyPathExpression::ZeroOrMore(inner) => Self::zero_or_more(inner.as_ref().into()),
            PropertyPathExpression::OneOrMore(inner) => Self::one_or_more(inner.as_ref().into()),
            PropertyPathExpression::ZeroOrOne(inner) => Self::zero_or_one(inner.as_ref().into()),
            PropertyPathExpression::NegatedPropertySet(properties) => {
                Self::negated_set(properties.clone(), Vec::new())
            }
        }
    }
}

impl From<PropertyPathExpression> for PropertyPath {
    fn from(path: PropertyPathExpression) -> Self {
        Self::from(&path)
    }
}
