//! Renders the bundled components with the TypeScript renderer.

use std::{path::Path, sync::Arc};

use weave_codegen::{ComponentRegistry, Engine, GenerationResult};
use weave_codegen_typescript::TypeScriptRenderer;

const COMPONENTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../components");

fn generate(manifest: &str) -> GenerationResult {
    let registry = ComponentRegistry::load(COMPONENTS).unwrap();
    let mut engine = Engine::new(Arc::new(registry));
    engine.register_renderer(TypeScriptRenderer::new()).unwrap();

    let manifest = weave_manifest::parse_str(manifest).unwrap();
    let result = engine.generate(&manifest, "typescript", Path::new("")).unwrap();
    assert!(result.is_complete(), "errors: {:?}", result.errors);
    result
}

fn file<'a>(result: &'a GenerationResult, path: &str) -> &'a str {
    result
        .files
        .get(Path::new(path))
        .unwrap_or_else(|| panic!("{path} not generated"))
}

const GREETER: &str = r#"
    package_name = "greeter"
    command_name = "greet"
    version = "1.0.0"
    description = "Greets people"

    [cli]
    options = [{ name = "verbose", short = "v", type = "bool", description = "Talk more" }]

    [cli.commands.hello]
    description = "Say hello"
    args = [{ name = "name", description = "Who to greet" }]
    options = [{ name = "times", short = "t", type = "int", default = 1, description = "Repeat count" }]

    [cli.commands.db]
    description = "Database commands"

    [cli.commands.db.subcommands.migrate]
    options = [{ name = "dry-run", type = "bool" }]

    [cli.commands.version]
"#;

#[test]
fn test_generates_all_files() {
    let result = generate(GREETER);
    let paths: Vec<String> = result
        .files
        .keys()
        .map(|p| p.display().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            ".gitignore",
            "package.json",
            "src/cli.ts",
            "src/hooks.ts",
            "src/types.ts",
            "tsconfig.json",
        ]
    );
}

#[test]
fn test_cli_uses_typed_actions() {
    let result = generate(GREETER);
    let cli = file(&result, "src/cli.ts");

    assert!(cli.contains(r#"import * as hooks from "./hooks.js";"#));
    assert!(cli.contains(
        r#"import type { HelloOptions, DbMigrateOptions } from "./types.js";"#
    ));
    assert!(cli.contains(
        "  .action(async (name: string, options: HelloOptions) => { await hooks.onHello(name, options.times); });"
    ));
    assert!(cli.contains(
        "  .action(async (options: DbMigrateOptions) => { await hooks.onDbMigrate(options.dryRun); });"
    ));
    assert!(cli.contains("  .action(async () => { await hooks.onVersion(); });"));
}

#[test]
fn test_hooks_are_typed() {
    let result = generate(GREETER);
    let hooks = file(&result, "src/hooks.ts");

    assert!(hooks.contains("export async function onHello(name: string, times: number): Promise<void> {"));
    assert!(hooks.contains("export async function onDbMigrate(dryRun: boolean): Promise<void> {"));
    assert!(hooks.contains("export async function onVersion(): Promise<void> {"));
}

#[test]
fn test_types_declare_option_interfaces() {
    let result = generate(GREETER);
    let types = file(&result, "src/types.ts");

    insta::assert_snapshot!(types.trim_end(), @r"
    // Option shapes commander hands to each action.
    //
    // Generated by weave; this file is regenerated.

    export interface GlobalOptions {
      verbose: boolean;
    }

    export interface HelloOptions {
      /** Repeat count */
      times: number;
    }

    export interface DbMigrateOptions {
      dryRun: boolean;
    }
    ");
}

#[test]
fn test_package_json_points_at_compiled_cli() {
    let result = generate(GREETER);
    let package: serde_json::Value =
        serde_json::from_str(file(&result, "package.json")).unwrap();

    assert_eq!(package["bin"]["greet"], "dist/cli.js");
    assert_eq!(package["scripts"]["start"], "node dist/cli.js");
    assert_eq!(package["devDependencies"]["typescript"], "^5.4.0");

    let tsconfig: serde_json::Value =
        serde_json::from_str(file(&result, "tsconfig.json")).unwrap();
    assert_eq!(tsconfig["compilerOptions"]["outDir"], "dist");
}

#[test]
fn test_gitignore_is_typescript_specific() {
    let result = generate(GREETER);
    let gitignore = file(&result, ".gitignore");
    assert!(gitignore.contains("node_modules/\n"));
    assert!(gitignore.contains("dist/\n"));
    assert!(gitignore.contains("*.tsbuildinfo\n"));
}
