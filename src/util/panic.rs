/// Asserts that running the block panics. The block runs inside
/// [`catch_unwind`](std::panic::catch_unwind), so it can't borrow anything mutably from outside.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "block was expected to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(std::panic::catch_unwind(|| $run).is_err(), $msg);
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
