use super::*;
use std::path::{Path, PathBuf};

fn compile(sources: &[&str], outputs: &[&str], globs: &[&str]) -> PathRuleSet {
    let sources: Vec<PathBuf> = sources.iter().map(PathBuf::from).collect();
    let outputs: Vec<PathBuf> = outputs.iter().map(PathBuf::from).collect();
    let globs: Vec<String> = globs.iter().map(ToString::to_string).collect();
    PathRuleSet::compile(&sources, &outputs, &globs).expect("rules compile")
}

#[test]
fn empty_configuration_is_indecisive() {
    let rules = compile(&[], &[], &[]);
    assert!(rules.is_indecisive());
}

#[test]
fn any_rule_makes_the_set_decisive() {
    assert!(!compile(&["src"], &[], &[]).is_indecisive());
    assert!(!compile(&[], &["target"], &[]).is_indecisive());
    assert!(!compile(&[], &[], &["*.log"]).is_indecisive());
}

#[test]
fn path_under_source_root_is_forced() {
    let rules = compile(&["src/main/java"], &[], &[]);
    assert_eq!(
        rules.force_match(Path::new("src/main/java/com/App.java")),
        ForceMatch::Under
    );
    assert_eq!(
        rules.force_match(Path::new("src/main/java")),
        ForceMatch::Under
    );
}

#[test]
fn ancestor_of_source_root_is_not_decided() {
    let rules = compile(&["src/main/java"], &[], &[]);
    assert_eq!(rules.force_match(Path::new("src")), ForceMatch::Ancestor);
    assert_eq!(
        rules.force_match(Path::new("src/main")),
        ForceMatch::Ancestor
    );
    assert_eq!(rules.force_match(Path::new("")), ForceMatch::Ancestor);
}

#[test]
fn unrelated_path_matches_no_force_rule() {
    let rules = compile(&["src/main/java"], &[], &[]);
    assert_eq!(rules.force_match(Path::new("docs")), ForceMatch::None);
    assert_eq!(
        rules.force_match(Path::new("src/test/java")),
        ForceMatch::None
    );
}

#[test]
fn prefix_matching_respects_component_boundaries() {
    let rules = compile(&["src"], &["target"], &[]);
    // "src-gen" is not under "src", "target2" is not under "target"
    assert_eq!(rules.force_match(Path::new("src-gen/App.java")), ForceMatch::None);
    assert!(!rules.is_ignored(Path::new("target2/out.class")));
}

#[test]
fn output_directory_contents_are_ignored() {
    let rules = compile(&["src"], &["target"], &[]);
    assert!(rules.is_ignored(Path::new("target")));
    assert!(rules.is_ignored(Path::new("target/classes/App.class")));
    assert!(!rules.is_ignored(Path::new("src/App.java")));
}

#[test]
fn nested_output_directory_is_subsumed() {
    let rules = compile(&[], &["target", "target/classes", "bin"], &[]);
    assert!(rules.is_ignored(Path::new("target/classes/App.class")));
    assert!(rules.is_ignored(Path::new("bin/x")));
}

#[test]
fn force_wins_over_ignore_for_nested_source_root() {
    // a source root nested inside an output folder: callers check force
    // first, so the change still decides the build
    let rules = compile(&["src/main/java"], &["src/main/java/generated"], &[]);
    assert_eq!(
        rules.force_match(Path::new("src/main/java/generated/Foo.java")),
        ForceMatch::Under
    );
    assert!(rules.is_ignored(Path::new("src/main/java/generated/Foo.java")));
}

#[test]
fn glob_rules_match_shell_style() {
    let rules = compile(&[], &[], &["*.log"]);
    assert!(rules.is_ignored(Path::new("debug.log")));
    // literal separators: "*" does not cross directories
    assert!(!rules.is_ignored(Path::new("logs/debug.log")));
}

#[test]
fn recursive_glob_crosses_directories() {
    let rules = compile(&[], &[], &["**/*.log"]);
    assert!(rules.is_ignored(Path::new("logs/deep/nested/debug.log")));
}

#[test]
fn directory_glob_matches_directory_and_contents() {
    let rules = compile(&[], &[], &["gen/"]);
    assert!(rules.is_ignored(Path::new("gen")));
    assert!(rules.is_ignored(Path::new("gen/src/App.java")));
    assert!(!rules.is_ignored(Path::new("genuine")));
}

#[test]
fn comma_separated_entry_expands_to_multiple_rules() {
    let rules = compile(&[], &[], &["*.tmp,cache/"]);
    assert!(rules.is_ignored(Path::new("scratch.tmp")));
    assert!(rules.is_ignored(Path::new("cache/entry")));
    assert!(!rules.is_ignored(Path::new("src/App.java")));
}

#[test]
fn invalid_glob_reports_the_pattern() {
    let error = PathRuleSet::compile(&[], &[], &["[".to_owned()]).unwrap_err();
    assert_eq!(error.pattern(), "[");
}

#[test]
fn glob_matching_is_case_sensitive() {
    let rules = compile(&[], &[], &["*.LOG"]);
    assert!(rules.is_ignored(Path::new("debug.LOG")));
    assert!(!rules.is_ignored(Path::new("debug.log")));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for path segments that stay clear of glob metacharacters.
    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,8}"
    }

    fn relative_path() -> impl Strategy<Value = PathBuf> {
        proptest::collection::vec(segment(), 1..5)
            .prop_map(|segments| segments.iter().collect::<PathBuf>())
    }

    proptest! {
        #[test]
        fn descendants_of_source_roots_are_always_under(
            root in relative_path(),
            rest in relative_path(),
        ) {
            let rules = PathRuleSet::compile(&[root.clone()], &[], &[]).expect("compile");
            prop_assert_eq!(rules.force_match(&root.join(&rest)), ForceMatch::Under);
        }

        #[test]
        fn descendants_of_output_dirs_are_always_ignored(
            dir in relative_path(),
            rest in relative_path(),
        ) {
            let rules = PathRuleSet::compile(&[], &[dir.clone()], &[]).expect("compile");
            prop_assert!(rules.is_ignored(&dir.join(&rest)));
        }

        #[test]
        fn ancestors_of_source_roots_never_decide(
            root in relative_path(),
            rest in relative_path(),
        ) {
            let full = root.join(&rest);
            let rules = PathRuleSet::compile(&[full], &[], &[]).expect("compile");
            prop_assert_eq!(rules.force_match(&root), ForceMatch::Ancestor);
        }
    }
}
