//! Team-name and value normalization
//!
//! The statistic pages spell one club with an ampersand where the league
//! table spells it out ("Brighton & Hove Albion" vs "Brighton and Hove
//! Albion"), and large statistic values carry thousands separators.
//! Both transforms are pure and idempotent.

/// Replace a literal `&` with the word `and`.
pub fn ampersand_to_and(name: &str) -> String {
    if name.contains('&') {
        name.replace('&', "and")
    } else {
        name.to_string()
    }
}

/// Strip thousands-separator commas from a numeric string.
pub fn strip_thousands(value: &str) -> String {
    if value.contains(',') {
        value.replace(',', "")
    } else {
        value.to_string()
    }
}
