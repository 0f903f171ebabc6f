//! Hostname naming convention used to derive inventory groups

/// Hostnames containing this character are left out of every group
pub const GROUP_EXCLUSION_SEPARATOR: char = '-';

/// Whether the host takes part in grouping at all
pub fn is_eligible(hostname: &str) -> bool {
    !hostname.contains(GROUP_EXCLUSION_SEPARATOR)
}

/// Group a hostname belongs to: everything before its first run of ASCII digits.
///
/// `web03node` maps to `web`, a hostname without digits is its own group and
/// one starting with a digit maps to the empty group name.
pub fn group_name(hostname: &str) -> &str {
    match hostname.find(|c: char| c.is_ascii_digit()) {
        Some(index) => &hostname[..index],
        None => hostname,
    }
}
