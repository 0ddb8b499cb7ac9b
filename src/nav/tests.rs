use super::*;
use crate::fragment::FsFetcher;
use crate::shell::TOOL_STYLE_TAG;

const SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Coffeeclub - Coffee for Engineers</title>
<meta name="description" content="Coffee gear, brewing and caffeine timing.">
<link rel="stylesheet" href="./styles.css">
</head>
<body>
<header><nav><a href="/" data-route="/">Home</a></nav></header>
<main id="app"><section class="hero">Fuel your focus</section></main>
<footer><span id="year"></span><form class="newsletter-form"></form></footer>
<script src="/js/router.js"></script>
</body>
</html>"#;

const BLOG_LISTING: &str = r#"<html>
<head><title>Blog | Coffeeclub</title></head>
<body><header>nav</header>
<div class="blog-page">
<a href="blog/moka-pot-vs-aeropress.html">Moka Pot vs Aeropress</a>
</div>
<footer>legal</footer></body></html>"#;

const BLOG_POST: &str = r#"<html>
<head><title>Moka Pot vs Aeropress | Coffeeclub</title>
<meta name="description" content="Two brewers enter."></head>
<body><header>nav</header>
<article class="blog-post">
<h1>Moka Pot vs Aeropress</h1>
<img src="../images/blog/moka.jpg" alt="moka">
<p id="verdict">Both, obviously.</p>
<script>alert("inline")</script>
</article>
<footer>legal</footer></body></html>"#;

const QUIZ_PAGE: &str = r#"<html>
<head><title>Roast Quiz | Coffeeclub</title>
<style>.quiz-card { padding: 2rem; }</style>
<script src="quiz.js"></script>
</head>
<body><main class="tools-page"><div id="questionScreen"></div>
<script>showQuestion();</script></main></body></html>"#;

fn site() -> (tempfile::TempDir, Session<FsFetcher>) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("blog")).unwrap();
    std::fs::create_dir(dir.path().join("tools")).unwrap();
    std::fs::write(dir.path().join("blog.html"), BLOG_LISTING).unwrap();
    std::fs::write(
        dir.path().join("blog/moka-pot-vs-aeropress.html"),
        BLOG_POST,
    )
    .unwrap();
    std::fs::write(dir.path().join("tools/quiz.html"), QUIZ_PAGE).unwrap();

    let session = Session::new(
        FsFetcher::new(dir.path()),
        RouteTable::builtin(),
        ToolsSection::default(),
        SHELL,
        "app",
    )
    .unwrap();
    (dir, session)
}

#[test]
fn test_initial_root_stays_home() {
    let (_dir, mut session) = site();
    assert_eq!(session.initial("/"), NavOutcome::Home);
    assert_eq!(session.state(), NavState::Idle);
    assert_eq!(session.address(), "/");
    assert!(session.render().contains("Fuel your focus"));
}

#[test]
fn test_initial_deep_address_loads_route() {
    let (_dir, mut session) = site();
    let outcome = session.initial("/blogs/moka-pot-vs-aeropress");
    assert!(matches!(outcome, NavOutcome::Loaded { .. }));
    assert_eq!(session.address(), "/blogs/moka-pot-vs-aeropress");
    assert!(session.render().contains("<title>Moka Pot vs Aeropress | Coffeeclub</title>"));
}

#[test]
fn test_navigate_blog_post() {
    let (_dir, mut session) = site();
    session.initial("/");

    let outcome = session.navigate("/blogs/moka-pot-vs-aeropress");
    let NavOutcome::Loaded { route, scroll } = outcome else {
        panic!("expected loaded outcome, got {outcome:?}");
    };
    assert_eq!(route, "/blogs/moka-pot-vs-aeropress");
    assert_eq!(scroll, ScrollTarget::Top);
    assert_eq!(session.address(), "/blogs/moka-pot-vs-aeropress");

    let mounted = &session.shell().state().mounted;
    assert!(!mounted.contains("<script"));
    assert!(!mounted.contains("<header"));
    assert!(!mounted.contains("<footer"));
    assert!(mounted.contains("src=\"/images/blog/moka.png\""));
}

#[test]
fn test_click_data_route_priority_and_hash() {
    let (_dir, mut session) = site();
    session.initial("/");

    let action = session.click(
        "blog/moka-pot-vs-aeropress.html#verdict",
        Some("/blogs/moka-pot-vs-aeropress"),
    );
    let ClickAction::Intercepted(NavOutcome::Loaded { scroll, .. }) = action else {
        panic!("expected intercepted load, got {action:?}");
    };
    assert_eq!(scroll, ScrollTarget::Element("verdict".into()));
    assert_eq!(session.address(), "/blogs/moka-pot-vs-aeropress#verdict");
}

#[test]
fn test_hash_without_matching_element_scrolls_top() {
    let (_dir, mut session) = site();
    session.initial("/");
    let outcome = session.navigate("/blogs/moka-pot-vs-aeropress#nowhere");
    let NavOutcome::Loaded { scroll, .. } = outcome else {
        panic!("expected loaded outcome");
    };
    assert_eq!(scroll, ScrollTarget::Top);
}

#[test]
fn test_external_links_pass_through() {
    let (_dir, mut session) = site();
    session.initial("/");
    for href in [
        "https://example.com/roasts",
        "http://example.com",
        "mailto:hello@coffeeclub.in",
        "tel:+911234567890",
        "#brewing",
    ] {
        assert_eq!(session.click(href, None), ClickAction::Default, "{href}");
    }
    // Nothing intercepted: no history entries added
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_unresolved_href_passes_through() {
    let (_dir, mut session) = site();
    session.initial("/");
    assert_eq!(session.click("assets/styles.css", None), ClickAction::Default);
}

#[test]
fn test_unknown_path_keeps_content() {
    let (_dir, mut session) = site();
    session.initial("/");
    let before = session.render();

    let outcome = session.navigate("/nonexistent");
    assert!(matches!(outcome, NavOutcome::Failed { .. }));
    assert_eq!(session.state(), NavState::Idle);
    assert_eq!(session.render(), before);
}

#[test]
fn test_missing_section_document_falls_back_address_only() {
    let (_dir, mut session) = site();
    session.initial("/");
    session.navigate("/blogs/moka-pot-vs-aeropress");
    let before = session.shell().state().mounted.clone();

    // Resolves through the section prefix but the file does not exist
    let outcome = session.navigate("/blogs/ghost-post");
    assert!(matches!(outcome, NavOutcome::Failed { .. }));
    // Content untouched, address degraded to the root
    assert_eq!(session.shell().state().mounted, before);
    assert_eq!(session.address(), "/");
}

#[test]
fn test_back_and_forward_reload() {
    let (_dir, mut session) = site();
    session.initial("/");
    session.navigate("/blogs");
    session.navigate("/blogs/moka-pot-vs-aeropress");

    let outcome = session.back().unwrap();
    assert!(matches!(outcome, NavOutcome::Loaded { .. }));
    assert_eq!(session.address(), "/blogs");
    assert!(session.shell().state().mounted.contains("blog-page"));

    let outcome = session.forward().unwrap();
    assert!(matches!(outcome, NavOutcome::Loaded { .. }));
    assert_eq!(session.address(), "/blogs/moka-pot-vs-aeropress");

    assert!(session.forward().is_none());
}

#[test]
fn test_back_to_root_restores_home() {
    let (_dir, mut session) = site();
    session.initial("/");
    session.navigate("/blogs");
    assert_eq!(session.back(), Some(NavOutcome::Home));
    assert!(session.render().contains("Fuel your focus"));
}

#[test]
fn test_superseded_load_is_discarded() {
    let (_dir, mut session) = site();
    session.initial("/");

    let slow = session.begin(RouteKey::new("/blogs"), None);
    let fast = session.begin(RouteKey::new("/blogs/moka-pot-vs-aeropress"), None);

    let slow_result = session.run(&slow);
    let fast_result = session.run(&fast);

    // The newer navigation wins regardless of completion order
    let outcome = session.complete(fast, fast_result);
    assert!(matches!(outcome, NavOutcome::Loaded { .. }));
    assert_eq!(session.complete(slow, slow_result), NavOutcome::Superseded);

    assert!(session.render().contains("Moka Pot vs Aeropress"));
    assert!(!session.shell().state().mounted.contains("blog-page"));
}

#[test]
fn test_tool_page_assets_tracked_across_navigation() {
    let (_dir, mut session) = site();
    session.initial("/");

    session.navigate("/tools/quiz");
    let rendered = session.render();
    assert!(rendered.contains(TOOL_STYLE_TAG));
    assert!(rendered.contains("<script src=\"/quiz.js\"></script>"));
    assert!(rendered.contains("<script>showQuestion();</script>"));

    session.navigate("/blogs");
    let rendered = session.render();
    assert!(!rendered.contains(TOOL_STYLE_TAG));
    assert!(!rendered.contains("quiz.js"));
}
