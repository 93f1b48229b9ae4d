//! Domain-specific assertion macros for kiln harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! contract invariant was violated and *where* (which deployed instance).

/// Assert that a deployed Greeter currently returns the expected greeting.
///
/// ```rust,ignore
/// assert_greeting!(greeter, "Hola, mundo!");
/// ```
#[macro_export]
macro_rules! assert_greeting {
    ($greeter:expr, $expected:expr) => {{
        let actual = $greeter.greet().await.expect("greet() must not revert");
        ::pretty_assertions::assert_eq!(
            actual,
            $expected.to_string(),
            "greeting mismatch at {}",
            $greeter.address()
        );
    }};
}

/// Assert that a chain operation reverted with a message containing the
/// given needle.
///
/// ```rust,ignore
/// assert_reverts!(greeter.set_greeting(...).await, "unknown method");
/// ```
#[macro_export]
macro_rules! assert_reverts {
    ($result:expr, $needle:expr) => {{
        match $result {
            Ok(_) => panic!(
                "assert_reverts! failed: expected a revert containing {:?}, got Ok",
                $needle
            ),
            Err(err) => {
                let message = err.to_string();
                assert!(
                    message.contains($needle),
                    "assert_reverts! failed:\n  expected substring: {:?}\n  actual error:       {:?}",
                    $needle,
                    message
                );
            }
        }
    }};
}
