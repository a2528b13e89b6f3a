//! Deterministic active-endpoint selection.

use crate::endpoint::{Endpoint, EndpointRegistry};

/// Pick the active endpoint after a completed probe pass.
///
/// Priority, walking the registry in order:
/// 1. the first entry known to be usable,
/// 2. else the first entry whose label equals `fallback_label`, whatever
///    its health,
/// 3. else the first entry.
///
/// Tier 2 and 3 deliberately hand back an endpoint that may be known
/// unusable: the consuming application always gets something to try.
/// Returns `None` only for an empty registry, which is a configuration
/// error on the caller's side (the baseline always carries at least the
/// custom placeholder).
pub fn select_active<'a>(
    registry: &'a EndpointRegistry,
    fallback_label: &str,
) -> Option<&'a Endpoint> {
    let entries = registry.entries();
    entries
        .iter()
        .find(|entry| entry.usable == Some(true))
        .or_else(|| entries.iter().find(|entry| entry.label == fallback_label))
        .or_else(|| entries.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probed(url: &str, label: &str, usable: bool) -> Endpoint {
        let mut endpoint = Endpoint::new(url, label);
        endpoint.usable = Some(usable);
        if usable {
            endpoint.delay_ms = Some(50);
        }
        endpoint
    }

    #[test]
    fn picks_the_earliest_usable_entry() {
        let registry = EndpointRegistry::from_endpoints(vec![
            probed("https://a.example.com", "A", false),
            probed("https://b.example.com", "B", true),
            probed("https://c.example.com", "C", true),
        ]);

        let active = select_active(&registry, "Cloudflare").unwrap();
        assert_eq!(active.base_url, "https://b.example.com");
    }

    #[test]
    fn usable_entry_wins_even_without_the_fallback_label_present() {
        let registry = EndpointRegistry::from_endpoints(vec![
            probed("https://x", "X", true),
            probed("https://y", "Y", false),
        ]);

        let active = select_active(&registry, "Cloudflare").unwrap();
        assert_eq!(active.base_url, "https://x");
        assert_eq!(active.delay_ms, Some(50));
    }

    #[test]
    fn fallback_label_wins_when_nothing_is_usable() {
        let registry = EndpointRegistry::from_endpoints(vec![
            probed("https://x", "X", false),
            probed("https://cf", "Cloudflare", false),
        ]);

        let active = select_active(&registry, "Cloudflare").unwrap();
        assert_eq!(active.base_url, "https://cf");
        assert_eq!(active.usable, Some(false));
    }

    #[test]
    fn unknown_health_does_not_count_as_usable() {
        let registry = EndpointRegistry::from_endpoints(vec![
            Endpoint::new("https://a.example.com", "A"),
            probed("https://b.example.com", "B", true),
        ]);

        let active = select_active(&registry, "Cloudflare").unwrap();
        assert_eq!(active.base_url, "https://b.example.com");
    }

    #[test]
    fn falls_back_to_the_first_entry() {
        let registry = EndpointRegistry::from_endpoints(vec![
            probed("https://a.example.com", "A", false),
            probed("https://b.example.com", "B", false),
        ]);

        let active = select_active(&registry, "Cloudflare").unwrap();
        assert_eq!(active.base_url, "https://a.example.com");
    }

    #[test]
    fn empty_registry_selects_nothing() {
        let registry = EndpointRegistry::from_endpoints(Vec::new());
        assert!(select_active(&registry, "Cloudflare").is_none());
    }
}
