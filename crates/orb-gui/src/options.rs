//! Command-line and environment options.

use orb_core::OrbConfig;

/// Environment variable that turns on reduced motion when set to `1` or `true`.
pub const REDUCED_MOTION_ENV: &str = "ORB_REDUCED_MOTION";

/// Build the session config from `args` (program name excluded) and the
/// value of [`REDUCED_MOTION_ENV`].
///
/// Recognized flags are `--reduced-motion` and `--seed <n>`; without a
/// seed, `fallback_seed` is used.
pub fn config_from_args(
    args: &[String],
    reduced_env: Option<&str>,
    fallback_seed: u64,
) -> OrbConfig {
    let flag = args.iter().any(|a| a == "--reduced-motion");
    let env = reduced_env.is_some_and(|v| matches!(v.trim(), "1" | "true"));
    let seed = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(fallback_seed);

    OrbConfig::default()
        .with_seed(seed)
        .with_reduced_motion(flag || env)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = config_from_args(&[], None, 9);
        assert_eq!(config.seed, 9);
        assert!(!config.reduced_motion);
    }

    #[test]
    fn flag_or_env_reduce_motion() {
        assert!(config_from_args(&args(&["--reduced-motion"]), None, 0).reduced_motion);
        assert!(config_from_args(&[], Some("1"), 0).reduced_motion);
        assert!(!config_from_args(&[], Some("0"), 0).reduced_motion);
    }

    #[test]
    fn seed_flag() {
        assert_eq!(config_from_args(&args(&["--seed", "77"]), None, 1).seed, 77);
        assert_eq!(config_from_args(&args(&["--seed", "x"]), None, 1).seed, 1);
    }
}
