//! Caller-facing argument names.
//!
//! Callers pass `instance_ids`; the input structure names the member
//! `InstanceIds`. Each operation asks an `ArgumentNameResolver` for the
//! caller-facing name of every input member once, when the operation is
//! built, and keeps the reverse table.

use std::sync::LazyLock;

use regex::Regex;

static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static NUMBER_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([0-9]+)").expect("valid regex"));
static END_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Convert a CamelCase member name to its snake_case argument name.
///
/// Names that already contain `_` are returned unchanged.
///
/// ```rust,ignore
/// assert_eq!(xform_name("AutoEnableIO"), "auto_enable_io");
/// ```
pub fn xform_name(name: &str) -> String {
    if name.contains('_') {
        return name.to_string();
    }
    let s1 = FIRST_CAP.replace_all(name, "${1}_${2}");
    let s2 = NUMBER_CAP.replace_all(&s1, "${1}_${2}");
    END_CAP.replace_all(&s2, "${1}_${2}").to_lowercase()
}

/// Maps structure member names to the names callers use for them.
pub trait ArgumentNameResolver: Send + Sync + std::fmt::Debug {
    fn argument_name(&self, member: &str) -> String;
}

/// snake_case arguments, via `xform_name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseArguments;

impl ArgumentNameResolver for SnakeCaseArguments {
    fn argument_name(&self, member: &str) -> String {
        xform_name(member)
    }
}
