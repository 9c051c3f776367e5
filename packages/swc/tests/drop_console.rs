use swc_plugin_drop_console::parse::parse_program;
use swc_plugin_drop_console::{transform, ConsoleFunction, DropConsole, PluginConfig};

const LOG: &[ConsoleFunction] = &[ConsoleFunction::Log];

fn drop_with(code: &str, id: &str, functions: &[ConsoleFunction]) -> String {
    let output = transform(code, id, functions, true).unwrap();
    assert!(
        parse_program(&output.code, id).is_ok(),
        "output does not parse:\n{}",
        output.code
    );
    output.code
}

#[test]
fn test_statement_between_other_calls() {
    assert_eq!(
        drop_with("console.log('a'); doWork(); console.error('b');", "a.js", LOG),
        " doWork(); console.error('b');"
    );
}

#[test]
fn test_window_console_is_removed() {
    assert_eq!(
        drop_with("window.console.log('a');\nrun();\n", "a.js", LOG),
        "\nrun();\n"
    );
}

#[test]
fn test_other_functions_are_kept() {
    let code = "console.warn('w');\nconsole.info('i');\n";
    assert_eq!(drop_with(code, "a.js", LOG), code);
    assert_eq!(
        drop_with(code, "a.js", &[ConsoleFunction::Warn]),
        "\nconsole.info('i');\n"
    );
}

#[test]
fn test_alias_is_a_known_limitation() {
    let code = "const c = console;\nc.log('a');\n";
    assert_eq!(drop_with(code, "a.js", LOG), code);
}

#[test]
fn test_destructured_reference_is_kept() {
    let code = "const { log } = console;\nlog('a');\n";
    assert_eq!(drop_with(code, "a.js", LOG), code);
}

#[test]
fn test_multiple_functions() {
    let code = "console.time('t');\nwork();\nconsole.timeEnd('t');\nconsole.table(rows);\n";
    assert_eq!(
        drop_with(
            code,
            "a.js",
            &[ConsoleFunction::Time, ConsoleFunction::TimeEnd]
        ),
        "\nwork();\n\nconsole.table(rows);\n"
    );
}

#[test]
fn test_typescript_module() {
    let code = r#"import type { User } from "./user";

export function greet(user: User): string {
    console.log("greeting", user);
    return `hello ${user.name}`;
}
"#;
    let expected = code.replace("    console.log(\"greeting\", user);\n", "    \n");
    assert_ne!(expected, code);
    assert_eq!(drop_with(code, "src/greet.ts", LOG), expected);
}

#[test]
fn test_tsx_component() {
    let code = "export const App = () => {\n  console.log('render');\n  return <div>app</div>;\n};\n";
    assert_eq!(
        drop_with(code, "src/App.tsx", LOG),
        "export const App = () => {\n  \n  return <div>app</div>;\n};\n"
    );
}

#[test]
fn test_statements_without_semicolons() {
    let code = "console.log(1)\nfoo()\nconsole.log(2)\n";
    assert_eq!(drop_with(code, "a.js", LOG), "\nfoo()\n\n");
}

#[test]
fn test_if_else_stays_valid() {
    let code = "if (debug) console.log('on');\nelse console.log('off');\nnext();\n";
    assert_eq!(
        drop_with(code, "a.js", LOG),
        "if (debug) ;\nelse ;\nnext();\n"
    );
}

#[test]
fn test_parenthesized_statement_is_removed() {
    assert_eq!(
        drop_with("(console.log(1));\nrun();\n((console.log(2)))\n", "a.js", LOG),
        "\nrun();\n\n"
    );
}

#[test]
fn test_calls_nested_in_expressions_are_kept() {
    let code = "const r = console.log(1);\nfoo(console.log(2));\na && console.log(3);\n";
    assert_eq!(drop_with(code, "a.js", LOG), code);
}

#[test]
fn test_arguments_with_nested_console_calls() {
    assert_eq!(
        drop_with("console.log(console.log(1));\nx();\n", "a.js", LOG),
        "\nx();\n"
    );
}

#[test]
fn test_unparseable_input_is_left_alone() {
    assert!(transform("function broken( {\n  console.log(1);\n", "a.js", LOG, true).is_none());
}

#[test]
fn test_empty_functions_never_transform() {
    for code in ["console.log(1);", "foo();", "not valid ("] {
        assert!(transform(code, "a.js", &[], true).is_none());
    }
}

#[test]
fn test_map_resolves_surviving_tokens() {
    let code = "console.log(1); const answer = 42;\nfunction f() {\n  console.log(answer);\n  return answer;\n}\n";
    let output = transform(code, "src/answer.js", LOG, true).unwrap();
    assert_eq!(
        output.code,
        " const answer = 42;\nfunction f() {\n  \n  return answer;\n}\n"
    );

    let map = output.map.unwrap();
    assert_eq!(map.get_source(0), Some("src/answer.js"));
    assert_eq!(map.get_source_contents(0), Some(code));

    // `answer` on the first line moved left by the removed statement
    let token = map.lookup_token(0, 7).unwrap();
    assert_eq!((token.get_src_line(), token.get_src_col()), (0, 22));

    // `return` keeps its line and column
    let token = map.lookup_token(3, 2).unwrap();
    assert_eq!((token.get_src_line(), token.get_src_col()), (3, 2));

    // `answer` after `return `
    let token = map.lookup_token(3, 9).unwrap();
    assert_eq!((token.get_src_line(), token.get_src_col()), (3, 9));
}

#[test]
fn test_map_columns_are_utf16() {
    let code = "const s = '😀'; console.log(s); use(s);";
    let output = transform(code, "a.js", LOG, true).unwrap();
    assert_eq!(output.code, "const s = '😀';  use(s);");

    let map = output.map.unwrap();
    // `use` is at UTF-16 column 17 of the output and 32 of the input
    let token = map.lookup_token(0, 17).unwrap();
    assert_eq!((token.get_src_line(), token.get_src_col()), (0, 32));
}

#[test]
fn test_plugin_config_from_json() {
    let config =
        PluginConfig::from_json(r#"{ "functions": ["log", "debug"], "sourceMap": false }"#).unwrap();
    let drop_console = DropConsole::new(config).unwrap();

    let output = drop_console
        .transform("console.debug(1);\nconsole.log(2);\nconsole.warn(3);\n", "src/a.js")
        .unwrap();
    assert_eq!(output.code, "\n\nconsole.warn(3);\n");
    assert!(output.map.is_none());
}

#[test]
fn test_exclude_wins_over_include() {
    let config = PluginConfig::default()
        .with_include(vec!["**/*.js".to_string()])
        .with_exclude(vec!["vendor/**".to_string()]);
    let drop_console = DropConsole::new(config).unwrap();

    assert!(drop_console.transform("console.log(1);", "vendor/lib.js").is_none());
    assert!(drop_console.transform("console.log(1);", "app/lib.js").is_some());
}

#[test]
fn test_transforms_are_independent_across_threads() {
    let drop_console = DropConsole::new(PluginConfig::default()).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let drop_console = &drop_console;
                scope.spawn(move || {
                    let code = format!("console.log({i});\nuse({i});\n");
                    drop_console.transform(&code, "a.js").unwrap().code
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("\nuse({i});\n"));
        }
    });
}
