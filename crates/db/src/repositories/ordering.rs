//! `?ordering=` query parameter parsing.

use sea_orm::Order;

/// Resolves `field` / `-field` against the allowed fields.
///
/// Unknown or missing values fall back to `default`, matching how list
/// endpoints ignore ordering keys they do not support.
#[must_use]
pub fn resolve<C: Copy>(raw: Option<&str>, allowed: &[(&str, C)], default: (C, Order)) -> (C, Order) {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    let (name, order) = match raw.strip_prefix('-') {
        Some(name) => (name, Order::Desc),
        None => (raw, Order::Asc),
    };

    allowed
        .iter()
        .find(|(field, _)| *field == name)
        .map_or(default, |&(_, column)| (column, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FIELDS: &[(&str, u8)] = &[("name", 1), ("created_at", 2)];

    fn is_desc(order: &Order) -> bool {
        matches!(order, Order::Desc)
    }

    #[rstest]
    #[case(None, 2, true)]
    #[case(Some(""), 2, true)]
    #[case(Some("name"), 1, false)]
    #[case(Some("-name"), 1, true)]
    #[case(Some("created_at"), 2, false)]
    #[case(Some("-password_hash"), 2, true)]
    fn test_resolve(#[case] raw: Option<&str>, #[case] column: u8, #[case] desc: bool) {
        let (resolved, order) = resolve(raw, FIELDS, (2, Order::Desc));
        assert_eq!(resolved, column);
        assert_eq!(is_desc(&order), desc);
    }
}
