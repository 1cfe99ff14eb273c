use slashjump_core::adapters::{AdapterRegistry, AdapterRule, HostPredicate, Strategy};
use slashjump_core::Engine;
use slashjump_page::{El, Page};

#[test]
fn adapters_are_authoritative_over_a_stronger_generic_match() {
    let mut page = Page::new("www.example.com", 1280.0, 800.0);
    // The generic scorer would love this one.
    page.append(
        El::new("form").attr("role", "search").child(
            El::input("search").id("shiny").attr("name", "q"),
        ),
    );
    // The adapter points at this plain box instead.
    page.append(El::input("text").id("site-box"));

    let engine = Engine::with_registry(AdapterRegistry::with_rules(vec![AdapterRule {
        name: "example".into(),
        host: HostPredicate::domain("example.com"),
        strategy: Strategy::Selectors(vec!["#site-box".into()]),
    }]));

    assert_eq!(engine.find_search_input(&mut page), page.by_id("site-box"));
}

#[test]
fn adapter_miss_falls_through_to_the_generic_scanner() {
    let mut page = Page::new("www.example.com", 1280.0, 800.0);
    page.append(El::input("search").id("fallback").attr("name", "q"));

    let engine = Engine::with_registry(AdapterRegistry::with_rules(vec![AdapterRule {
        name: "example".into(),
        host: HostPredicate::domain("example.com"),
        strategy: Strategy::Selectors(vec!["#gone".into()]),
    }]));

    assert_eq!(engine.find_search_input(&mut page), page.by_id("fallback"));
}

#[test]
fn pages_without_any_search_input_resolve_to_nothing() {
    let mut page = Page::new("plain.example", 1280.0, 800.0);
    page.append(El::new("article").child(El::new("p")));

    let engine = Engine::new();
    assert_eq!(engine.find_search_input(&mut page), None);
    assert!(!engine.focus_search(&mut page));
    assert_eq!(page.focused(), None);
}

#[test]
fn discovery_and_focus_are_idempotent_on_an_unchanged_page() {
    let mut page = Page::new("blog.example", 1280.0, 800.0);
    page.append(El::input("search").id("the-box").value("old query"));

    let engine = Engine::new();
    assert!(engine.focus_search(&mut page));
    let first = page.focused();
    assert!(engine.focus_search(&mut page));
    assert_eq!(page.focused(), first);
    assert_eq!(first, page.by_id("the-box"));
    assert_eq!(page.focus_calls().len(), 2);
}

#[test]
fn focus_search_selects_the_existing_text() {
    let mut page = Page::new("blog.example", 1280.0, 800.0);
    page.append(El::input("search").id("the-box").value("old query"));

    let engine = Engine::new();
    assert!(engine.focus_search(&mut page));
    let node = page.by_id("the-box").unwrap();
    assert_eq!(page.selection(), Some((node, 0, 9)));
}
