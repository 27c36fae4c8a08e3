/// Run two closures, on the rayon pool when the `parallel` feature is on.
#[cfg(feature = "parallel")]
#[inline]
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(oper_a, oper_b)
}

/// Run two closures one after the other.
#[cfg(not(feature = "parallel"))]
#[inline]
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    let a = oper_a();
    let b = oper_b();
    (a, b)
}

#[cfg(test)]
mod test {
    use super::join;

    #[test]
    fn join_returns_both_results_in_order() {
        let data = [1u64, 2, 3, 4];
        let (left, right) = join(
            || data[..2].iter().sum::<u64>(),
            || data[2..].iter().product::<u64>(),
        );
        assert_eq!(left, 3);
        assert_eq!(right, 12);
    }
}
