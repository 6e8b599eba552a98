/// What one module contributed to a dispatch, and what a dispatch returns.
///
/// The first non-empty contribution fixes the shape of the aggregate: a
/// `Sequence` keeps collecting items from later modules, a `Scalar` ends the
/// dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Empty,
    Sequence(Vec<T>),
    Scalar(T),
}

impl<T> Outcome<T> {
    pub fn scalar(value: T) -> Self {
        Outcome::Scalar(value)
    }

    /// An empty vec is still a sequence: the module answered, with nothing.
    pub fn sequence(items: Vec<T>) -> Self {
        Outcome::Sequence(items)
    }

    pub fn optional(value: Option<T>) -> Self {
        value.map_or(Outcome::Empty, Outcome::Scalar)
    }

    pub fn optional_sequence(items: Option<Vec<T>>) -> Self {
        items.map_or(Outcome::Empty, Outcome::Sequence)
    }

    /// Side-effect-only answers never contribute, so every module runs.
    pub fn unit(_: ()) -> Self {
        Outcome::Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Outcome::Sequence(_))
    }

    pub fn into_scalar(self) -> Option<T> {
        match self {
            Outcome::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Vec<T>> {
        match self {
            Outcome::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl<A, B> Outcome<(Option<A>, Option<B>)> {
    /// Empty when both halves are missing, otherwise a scalar pair.
    pub fn pair(first: Option<A>, second: Option<B>) -> Self {
        if first.is_none() && second.is_none() {
            Outcome::Empty
        } else {
            Outcome::Scalar((first, second))
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Outcome::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional() {
        assert_eq!(Outcome::optional(Some(3)), Outcome::Scalar(3));
        assert!(Outcome::<i32>::optional(None).is_empty());
    }

    #[test]
    fn test_empty_vec_is_a_sequence() {
        let outcome = Outcome::<i32>::sequence(vec![]);
        assert!(outcome.is_sequence());
        assert!(!outcome.is_empty());
        assert_eq!(outcome.into_sequence(), Some(vec![]));
    }

    #[test]
    fn test_optional_sequence() {
        assert!(Outcome::<i32>::optional_sequence(None).is_empty());
        assert_eq!(
            Outcome::optional_sequence(Some(vec![1, 2])),
            Outcome::Sequence(vec![1, 2])
        );
    }

    #[test]
    fn test_pair_emptiness() {
        assert!(Outcome::<(Option<&str>, Option<&str>)>::pair(None, None).is_empty());
        assert_eq!(
            Outcome::pair(None::<&str>, Some("y")),
            Outcome::Scalar((None, Some("y")))
        );
        assert_eq!(
            Outcome::pair(Some("x"), None::<&str>),
            Outcome::Scalar((Some("x"), None))
        );
    }

    #[test]
    fn test_falsy_scalar_is_not_empty() {
        let outcome = Outcome::scalar(false);
        assert!(!outcome.is_empty());
        assert_eq!(outcome.into_scalar(), Some(false));
    }

    #[test]
    fn test_accessors_reject_other_shapes() {
        assert_eq!(Outcome::scalar(1).into_sequence(), None);
        assert_eq!(Outcome::sequence(vec![1]).into_scalar(), None);
        assert_eq!(Outcome::<i32>::unit(()), Outcome::Empty);
    }
}
