use slashjump_core::adapters::{AdapterRegistry, AdapterRule, HostPredicate, Strategy};
use slashjump_core::Engine;
use slashjump_page::{El, Page};

// ============================================================
// Builtin table against realistic page shapes
// ============================================================

#[test]
fn wikipedia_adapter_finds_the_header_search() {
    let mut page = Page::new("en.wikipedia.org", 1280.0, 800.0);
    page.append(El::input("search").id("searchInput"));
    // A decoy the generic scanner would also like.
    page.append(El::input("search").attr("name", "q").id("decoy"));

    let engine = Engine::new();
    assert_eq!(engine.find_search_input(&mut page), page.by_id("searchInput"));
}

#[test]
fn hostname_matching_is_suffix_based_and_case_insensitive() {
    for host in ["www.Wikipedia.Org", "de.m.wikipedia.org", "wikipedia.org"] {
        let mut page = Page::new(host, 1280.0, 800.0);
        page.append(El::input("search").id("searchInput"));
        let engine = Engine::new();
        assert_eq!(
            engine.find_search_input(&mut page),
            page.by_id("searchInput"),
            "host {host}"
        );
    }
}

#[test]
fn amazon_adapter_spans_regional_tlds() {
    let mut page = Page::new("www.amazon.co.uk", 1280.0, 800.0);
    page.append(El::input("text").id("twotabsearchtextbox"));

    let engine = Engine::new();
    assert_eq!(
        engine.find_search_input(&mut page),
        page.by_id("twotabsearchtextbox")
    );
}

#[test]
fn adapter_selector_list_skips_missing_and_hidden_entries() {
    // Selector list ["#missing", "#real-search"], only the latter exists.
    let mut page = Page::new("site.example", 1280.0, 800.0);
    page.append(El::input("text").id("real-search"));

    let registry = AdapterRegistry::with_rules(vec![AdapterRule {
        name: "site".into(),
        host: HostPredicate::domain("site.example"),
        strategy: Strategy::Selectors(vec!["#missing".into(), "#real-search".into()]),
    }]);

    assert_eq!(
        registry.find_site_specific(&mut page),
        page.by_id("real-search")
    );
}

#[test]
fn first_matching_rule_wins_even_when_it_finds_nothing() {
    let mut page = Page::new("dual.example", 1280.0, 800.0);
    // Present, visible, eligible, but carries no generic search signal at
    // all, so only the second rule could ever find it.
    page.append(El::input("text").id("second-target"));

    let registry = AdapterRegistry::with_rules(vec![
        AdapterRule {
            name: "first".into(),
            host: HostPredicate::domain("dual.example"),
            strategy: Strategy::Selectors(vec!["#absent".into()]),
        },
        AdapterRule {
            name: "second".into(),
            host: HostPredicate::domain("dual.example"),
            strategy: Strategy::Selectors(vec!["#second-target".into()]),
        },
    ]);

    let engine = Engine::with_registry(registry);
    // The matched first rule fails, the second is never consulted, and
    // the generic scanner has nothing to go on.
    assert_eq!(engine.find_search_input(&mut page), None);
}

// ============================================================
// Custom finders
// ============================================================

#[test]
fn apple_finder_opens_the_search_ui_and_requeries() {
    let mut page = Page::new("www.apple.com", 1280.0, 800.0);
    let opener = page.append(
        El::new("button")
            .attr("class", "ac-gn-link-search")
            .rect(1200.0, 10.0, 40.0, 40.0),
    );
    page.append(El::input("search").id("ac-gn-searchform-input").display("none"));
    let input = page.by_id("ac-gn-searchform-input").unwrap();
    page.on_click_set_display(opener, input, "block");

    let engine = Engine::new();
    assert_eq!(engine.find_search_input(&mut page), Some(input));
    assert_eq!(page.clicks(), &[opener]);
    assert!(page.reflows() >= 1, "layout must be forced before re-query");
}

#[test]
fn apple_finder_returns_the_visible_field_without_clicking() {
    let mut page = Page::new("www.apple.com", 1280.0, 800.0);
    page.append(El::new("button").attr("class", "ac-gn-link-search"));
    page.append(El::input("search").id("ac-gn-searchform-input"));

    let engine = Engine::new();
    assert_eq!(
        engine.find_search_input(&mut page),
        page.by_id("ac-gn-searchform-input")
    );
    assert!(page.clicks().is_empty());
}

#[test]
fn store_adapter_reaches_into_shadow_trees() {
    // The only matching input lives in a nested open shadow tree; the
    // deep-query custom finder locates it while a light scan finds
    // nothing.
    let mut page = Page::new("chromewebstore.google.com", 1280.0, 800.0);
    page.append(El::new("header").shadow(vec![
        El::new("div").shadow(vec![El::input("search").id("store-search")]),
    ]));

    let engine = Engine::new();
    assert_eq!(engine.find_search_input(&mut page), page.by_id("store-search"));
}

#[test]
fn store_adapter_prefers_the_light_document_when_possible() {
    let mut page = Page::new("chromewebstore.google.com", 1280.0, 800.0);
    page.append(El::input("search").id("plain"));
    page.append(El::new("div").shadow(vec![El::input("search").id("shadowed")]));

    let engine = Engine::new();
    assert_eq!(engine.find_search_input(&mut page), page.by_id("plain"));
}
