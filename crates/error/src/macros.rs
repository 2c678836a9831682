/// Asserts that evaluating the given expression panics, i.e. that it trips one of the
/// simulator's internal invariant checks rather than returning normally.
#[macro_export]
macro_rules! assert_aborts {
    ($f:expr) => {{
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $f));
        assert!(
            result.is_err(),
            "Expected an invariant violation, but the call returned normally."
        );
    }};
}

/// Constructs a [`crate::Error::InvalidInput`] for the given format string.
#[macro_export]
macro_rules! errinput {
    ($($args:tt)*) => { $crate::Error::InvalidInput(format!($($args)*)).into() };
}

/// Constructs a [`crate::Error::PageOutOfRange`] for a page index and address space size.
#[macro_export]
macro_rules! errrange {
    ($page:expr, $num_pages:expr) => {
        $crate::Error::PageOutOfRange {
            page: $page,
            num_pages: $num_pages,
        }
        .into()
    };
}
