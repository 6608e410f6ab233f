//! The `Inspect` trait and the chain operations built on it.
//!
//! An error chain is formed by repeatedly following [`Inspect::caused_by`],
//! starting from some error and ending at the first value without a cause.
//! Every operation here walks that chain iteratively through [`Chain`].

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::Error;
use crate::types::{Kind, Op};

/// Shared handle to an error in a chain.
pub type SharedError = Arc<dyn Inspect>;

/// Optional capabilities an error may expose to the inspector.
///
/// Every method defaults to `None`, so an empty `impl Inspect for MyError {}`
/// yields a value that ends a chain and carries no classification.
pub trait Inspect: std::error::Error + Send + Sync + 'static {
    /// The next error in the chain, if this error wraps another.
    fn caused_by(&self) -> Option<&SharedError> {
        None
    }

    /// The classification this error declares.
    fn kind(&self) -> Option<Kind> {
        None
    }

    /// The operation that failed.
    fn op(&self) -> Option<&Op> {
        None
    }
}

/// Wrap any inspectable error in a [`SharedError`].
pub fn shared<E: Inspect>(err: E) -> SharedError {
    Arc::new(err)
}

/// Downcast a chain element to the structured [`Error`] type.
pub(crate) fn as_structured(err: &SharedError) -> Option<&Error> {
    let err: &(dyn std::error::Error + 'static) = &**err;
    err.downcast_ref::<Error>()
}

// ─── Chain walker ─────────────────────────────────────────────────────────────

/// Iterator over an error chain, outermost first.
///
/// Yields the starting error, then each cause in turn, and stops after the
/// first element that has no cause. Each distinct element is yielded exactly
/// once: a chain that loops back on itself is measured up front with Brent's
/// algorithm (pointer identity), and iteration ends at the last element
/// before the loop closes.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a SharedError>,
    /// Elements left to yield when the chain is cyclic.
    remaining: Option<usize>,
}

impl<'a> Chain<'a> {
    /// Walk the chain starting at `err`. `None` yields an empty chain.
    pub fn new(err: Option<&'a SharedError>) -> Self {
        let remaining = err.and_then(distinct_len_if_cyclic);
        if let Some(len) = remaining {
            tracing::warn!(distinct = len, "Cyclic error chain, walk bounded");
        }
        Self {
            next: err,
            remaining,
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a SharedError;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                self.next = None;
                return None;
            }
            *remaining -= 1;
        }
        let current = self.next.take()?;
        self.next = current.caused_by();
        Some(current)
    }
}

fn same(a: &SharedError, b: &SharedError) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Number of distinct elements (`mu + lambda`) of a cyclic chain, or `None`
/// when the chain ends.
fn distinct_len_if_cyclic(start: &SharedError) -> Option<usize> {
    // Brent: find the cycle length lambda.
    let mut power = 1;
    let mut lambda = 1;
    let mut tortoise = start;
    let mut hare = start.caused_by()?;
    while !same(tortoise, hare) {
        if power == lambda {
            tortoise = hare;
            power *= 2;
            lambda = 0;
        }
        hare = hare.caused_by()?;
        lambda += 1;
    }

    // Then the index mu of the first element on the cycle.
    let mut tortoise = start;
    let mut hare = start;
    for _ in 0..lambda {
        hare = hare.caused_by()?;
    }
    let mut mu = 0;
    while !same(tortoise, hare) {
        tortoise = tortoise.caused_by()?;
        hare = hare.caused_by()?;
        mu += 1;
    }
    Some(mu + lambda)
}

impl std::iter::FusedIterator for Chain<'_> {}

/// Walk the chain starting at `err`.
pub fn chain(err: Option<&SharedError>) -> Chain<'_> {
    Chain::new(err)
}

// ─── Operations ───────────────────────────────────────────────────────────────

/// Returns the deepest cause of `err`.
///
/// An error without a cause is returned unchanged (the same `Arc`).
/// `None` yields `None`.
pub fn cause(err: Option<&SharedError>) -> Option<&SharedError> {
    chain(err).last()
}

/// Returns the first structured [`Error`] in the chain.
///
/// The existing error is borrowed, not copied. When no element of the chain
/// is an [`Error`], a new one is synthesized with kind [`Kind::INTERNAL`],
/// the message [`INTERNAL_MESSAGE`](crate::error::INTERNAL_MESSAGE) and the
/// last element reached as its cause. Only a `None` input yields `None`.
pub fn unwrap(err: Option<&SharedError>) -> Option<Cow<'_, Error>> {
    let mut terminal = None;
    for link in chain(err) {
        if let Some(structured) = as_structured(link) {
            return Some(Cow::Borrowed(structured));
        }
        terminal = Some(link);
    }
    terminal.map(|t| Cow::Owned(Error::internal(Arc::clone(t))))
}

/// Returns the kind declared by the first element of the chain that has one.
///
/// Defaults to [`Kind::INTERNAL`], including for `None`.
pub fn kind_of(err: Option<&SharedError>) -> Kind {
    chain(err).find_map(|e| e.kind()).unwrap_or_default()
}

/// Returns `true` if [`kind_of`] for `err` is `kind`.
pub fn is_kind(err: Option<&SharedError>, kind: &Kind) -> bool {
    kind_of(err) == *kind
}

/// Returns the first operation label in the chain.
pub fn op_of(err: Option<&SharedError>) -> Option<&Op> {
    chain(err).find_map(|e| e.op())
}

/// Collects every operation label in the chain, outermost first.
pub fn ops(err: Option<&SharedError>) -> Vec<&Op> {
    chain(err).filter_map(|e| e.op()).collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Plain;
    use std::fmt;
    use std::sync::OnceLock;

    /// Cause-only link with no kind.
    #[derive(Debug)]
    struct Hop {
        cause: SharedError,
    }

    impl fmt::Display for Hop {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("hop")
        }
    }

    impl std::error::Error for Hop {}

    impl Inspect for Hop {
        fn caused_by(&self) -> Option<&SharedError> {
            Some(&self.cause)
        }
    }

    /// Link whose cause is set after construction, so it can point back.
    #[derive(Debug, Default)]
    struct Loop {
        cause: OnceLock<SharedError>,
        kind: Option<Kind>,
        op: Option<Op>,
    }

    impl fmt::Display for Loop {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("loop")
        }
    }

    impl std::error::Error for Loop {}

    impl Inspect for Loop {
        fn caused_by(&self) -> Option<&SharedError> {
            self.cause.get()
        }

        fn kind(&self) -> Option<Kind> {
            self.kind.clone()
        }

        fn op(&self) -> Option<&Op> {
            self.op.as_ref()
        }
    }

    fn hop(cause: SharedError) -> SharedError {
        shared(Hop { cause })
    }

    #[test]
    fn chain_yields_every_link_outermost_first() {
        let c = shared(Plain::msg("c"));
        let b = hop(Arc::clone(&c));
        let a = hop(Arc::clone(&b));

        let links: Vec<_> = chain(Some(&a)).collect();
        assert_eq!(links.len(), 3);
        assert!(Arc::ptr_eq(links[0], &a));
        assert!(Arc::ptr_eq(links[1], &b));
        assert!(Arc::ptr_eq(links[2], &c));
    }

    #[test]
    fn empty_chain_for_none() {
        assert_eq!(chain(None).count(), 0);
    }

    #[test]
    fn self_cycle_terminates() {
        let a: Arc<Loop> = Arc::new(Loop::default());
        let a_dyn: SharedError = a.clone();
        a.cause.set(Arc::clone(&a_dyn)).unwrap();

        assert_eq!(chain(Some(&a_dyn)).count(), 1);
        assert!(Arc::ptr_eq(cause(Some(&a_dyn)).unwrap(), &a_dyn));
    }

    /// Five `Loop`s linked into a ring; node `i` has op `["a".."e"][i]`.
    fn ring() -> Vec<SharedError> {
        let names = ["a", "b", "c", "d", "e"];
        let nodes: Vec<Arc<Loop>> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                Arc::new(Loop {
                    cause: OnceLock::new(),
                    kind: (i == 4).then_some(Kind::TIMEOUT),
                    op: Some(Op::new(name)),
                })
            })
            .collect();
        let dyns: Vec<SharedError> = nodes.iter().map(|n| n.clone() as SharedError).collect();
        for (i, node) in nodes.iter().enumerate() {
            node.cause.set(Arc::clone(&dyns[(i + 1) % 5])).unwrap();
        }
        dyns
    }

    #[test]
    fn long_cycle_yields_each_element_once() {
        let ring = ring();
        let head = hop(Arc::clone(&ring[0]));

        let links: Vec<_> = chain(Some(&head)).collect();
        assert_eq!(links.len(), 6);
        assert!(Arc::ptr_eq(links[0], &head));
        for (link, node) in links[1..].iter().zip(&ring) {
            assert!(Arc::ptr_eq(link, node));
        }
        assert_eq!(kind_of(Some(&head)), Kind::TIMEOUT);
        assert!(Arc::ptr_eq(cause(Some(&head)).unwrap(), &ring[4]));
    }

    #[test]
    fn cycle_entered_from_the_start() {
        let ring = ring();
        assert_eq!(chain(Some(&ring[2])).count(), 5);
        assert!(Arc::ptr_eq(cause(Some(&ring[2])).unwrap(), &ring[1]));
    }

    #[test]
    fn ops_on_cycle_are_not_repeated() {
        let ring = ring();
        let trail: Vec<&str> = ops(Some(&ring[0])).into_iter().map(Op::name).collect();
        assert_eq!(trail, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn kind_of_skips_cause_only_links() {
        let base = shared(Error::new(Kind::PERMISSION, "denied"));
        let outer = hop(hop(base));
        assert_eq!(kind_of(Some(&outer)), Kind::PERMISSION);
    }

    #[test]
    fn unwrap_synthesizes_for_plain_chain() {
        let c = shared(Plain::msg("disk on fire"));
        let a = hop(Arc::clone(&c));
        let e = unwrap(Some(&a)).unwrap();
        assert!(matches!(e, Cow::Owned(_)));
        assert_eq!(e.kind(), Kind::INTERNAL);
        assert!(Arc::ptr_eq(e.cause().unwrap(), &c));
    }
}
