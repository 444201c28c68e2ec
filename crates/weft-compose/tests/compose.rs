/*
 * compose.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for the composition pipeline.
 */

use pretty_assertions::assert_eq;
use weft_compose::{
    ComposeError, DocumentMap, Fragment, MemoryEnv, MissingEnvPolicy, assemble, compose, tag,
};

fn stream_of(fragments: &[Fragment]) -> String {
    let tagged: Vec<String> = fragments.iter().map(|f| tag(f).unwrap()).collect();
    assemble(&tagged)
}

#[test]
fn header_title_page_scenario() {
    let fragments = vec![
        Fragment::new("header", "<h1>{@IMPORT('title')}</h1>"),
        Fragment::new("title", "Site"),
        Fragment::new("page", "{@IMPORT('header')}<p>{@ENV('STAGE')}</p>"),
    ];
    let env = MemoryEnv::new().set("STAGE", "prod");

    let html = compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap();
    assert_eq!(html, "<h1>Site</h1><p>prod</p>");

    // Only the page root survives pruning.
    let mut map = DocumentMap::from_stream(&stream_of(&fragments)).unwrap();
    map.resolve_imports().unwrap();
    map.prune_imported();
    let paths: Vec<&str> = map.paths().collect();
    assert_eq!(paths, vec!["page"]);
}

#[test]
fn round_trip_preserves_path_and_content() {
    let fragments = vec![
        Fragment::new("commons/nav.html", "<nav>\n  <a href=\"/\">home</a>\n</nav>"),
        Fragment::new("pages/index.html", "<p>it's 100% plain text: <>&'\"</p>"),
    ];
    let map = DocumentMap::from_stream(&stream_of(&fragments)).unwrap();
    for fragment in &fragments {
        assert_eq!(map.get(&fragment.path), Some(fragment.content.as_str()));
    }
}

#[test]
fn missing_import_aborts_the_unit() {
    let fragments = vec![Fragment::new("page.html", "<p>{@IMPORT('missing.html')}</p>")];
    let env = MemoryEnv::new();
    assert_eq!(
        compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap_err(),
        ComposeError::UnresolvedImport {
            document: "page.html".to_string(),
            referenced: "missing.html".to_string(),
        }
    );
}

#[test]
fn mutual_imports_never_loop() {
    let fragments = vec![
        Fragment::new("a.html", "{@IMPORT('b.html')}"),
        Fragment::new("b.html", "{@IMPORT('a.html')}"),
    ];
    let env = MemoryEnv::new();
    assert!(matches!(
        compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap_err(),
        ComposeError::CyclicImport { .. }
    ));
}

#[test]
fn multi_page_unit_keeps_every_root() {
    let fragments = vec![
        Fragment::new("footer.html", "<footer>end</footer>"),
        Fragment::new("index.html", "<main>home</main>{@IMPORT('footer.html')}"),
        Fragment::new("about.html", "<main>about</main>{@IMPORT('footer.html')}"),
    ];
    let env = MemoryEnv::new();
    let html = compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap();
    assert_eq!(
        html,
        "<main>home</main><footer>end</footer><main>about</main><footer>end</footer>"
    );
}

#[test]
fn compaction_happens_after_resolution() {
    let fragments = vec![
        Fragment::new("page.html", "<div>\n  {@IMPORT('snippet.html')}\n</div>"),
        Fragment::new("snippet.html", "  <span>x</span>  "),
    ];
    let env = MemoryEnv::new();
    let html = compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap();
    assert_eq!(html, "<div><span>x</span></div>");
}

#[test]
fn reserved_token_in_fragment_fails_at_tag_time() {
    let fragments = vec![Fragment::new("page.html", "text __SEPARATOR__ text")];
    let env = MemoryEnv::new();
    assert!(matches!(
        compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap_err(),
        ComposeError::ReservedToken { .. }
    ));
}

#[test]
fn empty_unit_produces_empty_output() {
    let env = MemoryEnv::new();
    assert_eq!(compose(&[], &env, MissingEnvPolicy::Fail).unwrap(), "");
}

#[test]
fn missing_env_var_respects_policy() {
    let fragments = vec![Fragment::new("page.html", "<p>{@ENV('WEFT_UNSET')}</p>")];
    let env = MemoryEnv::new();
    assert_eq!(
        compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap_err(),
        ComposeError::MissingEnvVar {
            name: "WEFT_UNSET".to_string()
        }
    );
    assert_eq!(
        compose(&fragments, &env, MissingEnvPolicy::Empty).unwrap(),
        "<p></p>"
    );
}
