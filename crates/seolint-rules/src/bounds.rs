//! Shared `{ min, max }` length checks.

use seolint_core::{Context, PluginResult};

/// Checks `length` against the rule's `min`/`max` options.
///
/// The minimum is checked first; at most one of the two messages is
/// reported.
pub(crate) fn check_length(
    ctx: &Context,
    rule_id: &str,
    length: usize,
    default_min: i64,
    default_max: i64,
) -> PluginResult {
    let Some(options) = ctx.load(rule_id) else {
        return Ok(());
    };

    let min = options.get_int("min", default_min);
    let max = options.get_int("max", default_max);
    let length = i64::try_from(length).unwrap_or(i64::MAX);

    if length < min {
        ctx.report(rule_id, format!("Must not have less than {min} characters"))
    } else if length > max {
        ctx.report(rule_id, format!("Must not have more than {max} characters"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolint_core::{FailurePolicy, PluginError, Rules, Toggle};
    use serde_json::json;

    fn message(result: PluginResult) -> Option<String> {
        match result {
            Ok(()) => None,
            Err(PluginError::Assertion(a)) => Some(a.message),
            Err(e) => panic!("unexpected fault: {e}"),
        }
    }

    #[test]
    fn below_min_and_above_max() {
        let rules = Rules::new();
        let ctx = Context::new(&rules, FailurePolicy::default());

        assert_eq!(
            message(check_length(&ctx, "x.length", 5, 10, 300)).as_deref(),
            Some("Must not have less than 10 characters")
        );
        assert_eq!(
            message(check_length(&ctx, "x.length", 301, 10, 300)).as_deref(),
            Some("Must not have more than 300 characters")
        );
        assert_eq!(message(check_length(&ctx, "x.length", 10, 10, 300)), None);
    }

    #[test]
    fn options_override_defaults() {
        let mut rules = Rules::new();
        rules.insert(
            "x.length".to_string(),
            (Toggle::Warn, json!({ "max": 4 })).into(),
        );
        let ctx = Context::new(&rules, FailurePolicy::default());

        assert_eq!(
            message(check_length(&ctx, "x.length", 5, 10, 300)).as_deref(),
            Some("Must not have less than 10 characters")
        );
    }

    #[test]
    fn disabled_rule_is_skipped() {
        let mut rules = Rules::new();
        rules.insert("x.length".to_string(), Toggle::Off.into());
        let ctx = Context::new(&rules, FailurePolicy::default());

        assert_eq!(message(check_length(&ctx, "x.length", 0, 10, 300)), None);
    }
}
