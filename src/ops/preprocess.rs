//! Platform argument filtering, applied before the option scan.

/// Prefix of the process serial number macOS passes to app bundles started
/// from the Finder (e.g. `-psn_0_9306113`).
pub const PSN_PREFIX: &str = "-psn";

/// Drop arguments injected by the platform launcher.
///
/// Only the first real argument is inspected; a serial number anywhere else
/// is left for the scanner to reject.
pub fn strip_platform_args(args: &[String]) -> Vec<String> {
    match args {
        [program, first, rest @ ..] if first.starts_with(PSN_PREFIX) => {
            tracing::debug!("dropping launcher argument `{}`", first);
            std::iter::once(program).chain(rest).cloned().collect()
        }
        _ => args.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::argv;

    #[test]
    fn test_strips_serial_number() {
        let args = argv(&["-psn_0_9306113", "--fullscreen"]);
        assert_eq!(strip_platform_args(&args), argv(&["--fullscreen"]));
    }

    #[test]
    fn test_leaves_other_arguments() {
        let args = argv(&["--fullscreen", "-psn_0_1"]);
        assert_eq!(strip_platform_args(&args), args);
        assert!(strip_platform_args(&[]).is_empty());
    }
}
