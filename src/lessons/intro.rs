//! Lesson zero: running tests, reading a failure and un-ignoring a test.

/// The message checked by the second welcome test. Change it to make that test
/// pass once it is no longer ignored.
pub const MESSAGE: &str = "welcome to the lessons!";

#[cfg(test)]
mod welcome {
    use super::*;

    // `cargo test` runs every function marked with `#[test]`. A test fails when
    // it panics, which is what a failed `assert_eq!` does.
    //
    // The assertion below is wrong on purpose. By default the panic is
    // expected so the suite stays green. Run `cargo test --features lessons`
    // to see the real failure, then change `false` to `true` and drop the
    // `cfg_attr` line.
    #[test]
    #[cfg_attr(not(feature = "lessons"), should_panic)]
    fn is_a_real_gimme() {
        assert_eq!(false, true);
    }

    // Ignored tests are reported but not run. Run it with
    // `cargo test -- --ignored`, then edit `MESSAGE` until it passes and drop
    // the `#[ignore]`.
    #[test]
    #[ignore = "pending: update MESSAGE to match"]
    fn the_intro_message_should_match() {
        assert_eq!(MESSAGE, "please fix me!");
    }
}
