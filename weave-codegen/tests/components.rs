//! Checks the components shipped in the repository's `components/` tree.

use weave_codegen::ComponentRegistry;

const COMPONENTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../components");

#[test]
fn test_bundled_components_are_valid() {
    let registry = ComponentRegistry::new(COMPONENTS);
    let failures = registry.validate_all().unwrap();
    assert!(failures.is_empty(), "invalid components: {failures:?}");
}

#[test]
fn test_every_language_has_its_components() {
    let registry = ComponentRegistry::load(COMPONENTS).unwrap();
    let names = registry.names();
    for expected in [
        "nodejs/cli",
        "nodejs/hooks",
        "nodejs/package_json",
        "python/cli",
        "python/hooks",
        "python/package_init",
        "python/pyproject",
        "rust/cargo_toml",
        "rust/cli_types",
        "rust/hooks",
        "rust/main",
        "shared/gitignore",
        "typescript/cli",
        "typescript/hooks",
        "typescript/package_json",
        "typescript/tsconfig",
        "typescript/types",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
}

#[test]
fn test_bundled_dependency_order() {
    let registry = ComponentRegistry::load(COMPONENTS).unwrap();
    assert_eq!(registry.dependencies("rust/main"), vec!["rust/cli_types"]);

    let order = registry
        .dependency_order(&["rust/main".to_string(), "rust/cli_types".to_string()])
        .unwrap();
    assert_eq!(order, vec!["rust/cli_types", "rust/main"]);
}
