///
/// FIELD TYPE POLICY
///
/// Structural and dynamic types have no ordering comparator, so a key part
/// declared with one of them is rejected at construction time.
///
/// This is a denylist: tags not listed here are reported as supported and
/// left to the codec to accept or reject.
///

pub(crate) const FIELD_TYPE_DENYLIST: [&str; 4] = [
    "any", "array", "map", "*", // alias for 'any'
];

/// Whether a declared type tag may be used in a key part.
///
/// Matches the full tag case-insensitively; prefixes do not match.
#[must_use]
pub fn field_type_is_supported(tag: &str) -> bool {
    !FIELD_TYPE_DENYLIST
        .iter()
        .any(|denied| denied.eq_ignore_ascii_case(tag))
}
