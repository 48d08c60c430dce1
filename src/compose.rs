//! Right-to-left function composition.

use std::sync::Arc;

/// A shareable single-argument function.
pub type Unary<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Composes single-argument functions from right to left.
///
/// `compose(vec![f, g, h])` behaves like `|x| f(g(h(x)))`. With no functions
/// the result is the identity.
///
/// ```
/// use std::sync::Arc;
/// use statestream::compose::{compose, Unary};
///
/// let double: Unary<i32> = Arc::new(|x: i32| x * 2);
/// let inc: Unary<i32> = Arc::new(|x: i32| x + 1);
/// assert_eq!(compose(vec![double, inc])(3), 8);
/// ```
pub fn compose<T>(funcs: Vec<Unary<T>>) -> impl Fn(T) -> T + Send + Sync {
    compose_with(funcs, |input: T| input)
}

/// Like [`compose`], but the rightmost function provides the signature of
/// the composite. Pass a tuple to feed it several arguments.
pub fn compose_with<A, T, L>(funcs: Vec<Unary<T>>, last: L) -> impl Fn(A) -> T + Send + Sync
where
    L: Fn(A) -> T + Send + Sync,
{
    move |args| funcs.iter().rev().fold(last(args), |acc, f| f(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append(suffix: &'static str) -> Unary<String> {
        Arc::new(move |s: String| s + suffix)
    }

    #[test]
    fn applies_rightmost_function_first() {
        let composed = compose(vec![append("f"), append("g"), append("h")]);
        assert_eq!(composed(String::new()), "hgf");
    }

    #[test]
    fn empty_composition_is_identity() {
        let composed = compose::<u8>(Vec::new());
        assert_eq!(composed(7), 7);
    }

    #[test]
    fn rightmost_function_can_take_several_arguments() {
        let composed = compose_with(
            vec![append("!")],
            |(a, b): (String, String)| a + &b,
        );
        assert_eq!(composed(("a".to_string(), "b".to_string())), "ab!");
    }

    #[test]
    fn every_function_runs_once_per_call() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counted: Unary<u32> = {
            let calls = Arc::clone(&calls);
            Arc::new(move |x: u32| {
                calls.fetch_add(1, Ordering::SeqCst);
                x + 1
            })
        };

        let composed = compose(vec![Arc::clone(&counted), counted]);
        assert_eq!(composed(0), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
