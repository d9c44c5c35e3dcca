// Two security tiers: public (no auth) and protected (JWT + permission
// middleware). The router in routes.rs wires each tier's middleware stack.

pub mod protected;
pub mod public;

use crate::config;

/// Normalize pagination query params: 1-based page, clamped page size.
pub(crate) fn page_params(page: Option<i64>, page_size: Option<i64>) -> (i64, i64, i64) {
    let api = &config::config().api;
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(api.default_page_size)
        .clamp(1, api.max_page_size);
    let offset = (page - 1) * page_size;
    (page, page_size, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_defaults_and_clamping() {
        let (page, size, offset) = page_params(None, None);
        assert_eq!(page, 1);
        assert!(size > 0);
        assert_eq!(offset, 0);

        let (page, size, offset) = page_params(Some(3), Some(10));
        assert_eq!((page, size, offset), (3, 10, 20));

        let (page, size, _) = page_params(Some(0), Some(0));
        assert_eq!(page, 1);
        assert_eq!(size, 1);

        let max = crate::config::config().api.max_page_size;
        let (_, size, _) = page_params(Some(1), Some(max + 1000));
        assert_eq!(size, max);
    }
}
