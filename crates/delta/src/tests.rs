use super::*;
use model::{CancelToken, EngineConfig};
use rules::PathRuleSet;
use std::path::PathBuf;

fn rule_set(sources: &[&str], outputs: &[&str], globs: &[&str]) -> PathRuleSet {
    let sources: Vec<PathBuf> = sources.iter().map(PathBuf::from).collect();
    let outputs: Vec<PathBuf> = outputs.iter().map(PathBuf::from).collect();
    let globs: Vec<String> = globs.iter().map(ToString::to_string).collect();
    PathRuleSet::compile(&sources, &outputs, &globs).expect("rules compile")
}

fn run(delta: Option<&DeltaNode>, rules: &PathRuleSet) -> Classification {
    classify(delta, rules, &EngineConfig::default(), &CancelToken::new())
}

#[test]
fn missing_delta_is_conservative() {
    let rules = rule_set(&["src"], &["target"], &[]);
    assert_eq!(run(None, &rules), Classification::Build);

    let indecisive = rule_set(&[], &[], &[]);
    assert_eq!(run(None, &indecisive), Classification::Build);
}

#[test]
fn change_under_source_root_builds() {
    let rules = rule_set(&["src"], &["target"], &[]);
    let delta = DeltaNode::project(vec![DeltaNode::folder(
        "src",
        ChangeKind::Changed,
        vec![DeltaNode::file("src/App.java", ChangeKind::Changed)],
    )]);
    assert_eq!(run(Some(&delta), &rules), Classification::Build);
}

#[test]
fn pure_output_change_skips() {
    let rules = rule_set(&["src"], &["target"], &[]);
    let delta = DeltaNode::project(vec![DeltaNode::folder(
        "target",
        ChangeKind::Changed,
        vec![DeltaNode::folder(
            "target/classes",
            ChangeKind::Changed,
            vec![DeltaNode::file(
                "target/classes/Foo.class",
                ChangeKind::Changed,
            )],
        )],
    )]);
    assert_eq!(run(Some(&delta), &rules), Classification::Skip);
}

#[test]
fn force_wins_over_ignore() {
    // a generated-sources folder declared both as source root and as
    // output: the force rule decides
    let rules = rule_set(&["src/main/java"], &["src/main/java/generated"], &[]);
    let delta = DeltaNode::project(vec![DeltaNode::folder(
        "src",
        ChangeKind::Changed,
        vec![DeltaNode::folder(
            "src/main",
            ChangeKind::Changed,
            vec![DeltaNode::folder(
                "src/main/java",
                ChangeKind::Changed,
                vec![DeltaNode::folder(
                    "src/main/java/generated",
                    ChangeKind::Changed,
                    vec![DeltaNode::file(
                        "src/main/java/generated/Foo.java",
                        ChangeKind::Changed,
                    )],
                )],
            )],
        )],
    )]);
    assert_eq!(run(Some(&delta), &rules), Classification::Build);
}

#[test]
fn source_root_nested_in_ignored_folder_is_reached() {
    // the ancestor folders match the output prefix, but they are also
    // ancestors of the nested source root and must be walked through
    let rules = rule_set(&["target/generated-sources/annotations"], &["target"], &[]);
    let delta = DeltaNode::project(vec![DeltaNode::folder(
        "target",
        ChangeKind::Changed,
        vec![DeltaNode::folder(
            "target/generated-sources",
            ChangeKind::Changed,
            vec![DeltaNode::file(
                "target/generated-sources/annotations/Gen.java",
                ChangeKind::Changed,
            )],
        )],
    )]);
    assert_eq!(run(Some(&delta), &rules), Classification::Build);
}

#[test]
fn unclassified_file_change_builds() {
    let rules = rule_set(&["src"], &["target"], &[]);
    let delta = DeltaNode::project(vec![DeltaNode::file("README.md", ChangeKind::Changed)]);
    assert_eq!(run(Some(&delta), &rules), Classification::Build);
}

#[test]
fn unchanged_subtrees_are_pruned() {
    let rules = rule_set(&["src"], &["target"], &[]);
    // the unchanged folder contains a source file, but NO_CHANGE prunes it
    let delta = DeltaNode::project(vec![DeltaNode::folder(
        "src",
        ChangeKind::NoChange,
        vec![DeltaNode::file("src/App.java", ChangeKind::Changed)],
    )]);
    assert_eq!(run(Some(&delta), &rules), Classification::Skip);
}

#[test]
fn description_change_builds_immediately() {
    let rules = rule_set(&["src"], &["target"], &[]);
    // the only child is ignorable, so without the description flag this
    // delta would skip
    let children = vec![DeltaNode::file("target/app.jar", ChangeKind::Changed)];
    let plain = DeltaNode::project(children.clone());
    assert_eq!(run(Some(&plain), &rules), Classification::Skip);

    let described = DeltaNode::project(children).with_flags(ChangeFlags::DESCRIPTION);
    assert_eq!(run(Some(&described), &rules), Classification::Build);
}

#[test]
fn ignore_glob_prunes_matching_subtree() {
    let rules = rule_set(&["src"], &[], &["gen/"]);
    let delta = DeltaNode::project(vec![DeltaNode::folder(
        "gen",
        ChangeKind::Changed,
        vec![DeltaNode::file("gen/Gen.java", ChangeKind::Added)],
    )]);
    assert_eq!(run(Some(&delta), &rules), Classification::Skip);
}

#[test]
fn empty_project_delta_builds_by_default() {
    let rules = rule_set(&["src"], &["target"], &[]);
    let delta = DeltaNode::project(vec![]);
    assert_eq!(run(Some(&delta), &rules), Classification::Build);
}

#[test]
fn empty_project_delta_skips_when_configured() {
    let rules = rule_set(&["src"], &["target"], &[]);
    let delta = DeltaNode::project(vec![]);
    let config = EngineConfig {
        build_on_empty_delta: false,
    };
    assert_eq!(
        classify(Some(&delta), &rules, &config, &CancelToken::new()),
        Classification::Skip
    );
}

#[test]
fn cancellation_is_reported_distinctly() {
    let rules = rule_set(&["src"], &["target"], &[]);
    let delta = DeltaNode::project(vec![DeltaNode::file("README.md", ChangeKind::Changed)]);
    let cancel = CancelToken::new();
    cancel.cancel();
    assert_eq!(
        classify(Some(&delta), &rules, &EngineConfig::default(), &cancel),
        Classification::Cancelled
    );
}

mod structural {
    use super::*;

    #[test]
    fn added_and_removed_are_structural() {
        let added = DeltaNode::project(vec![DeltaNode::file("new.txt", ChangeKind::Added)]);
        assert!(has_structural_change(&added));

        let removed = DeltaNode::project(vec![DeltaNode::file("old.txt", ChangeKind::Removed)]);
        assert!(has_structural_change(&removed));
    }

    #[test]
    fn marker_only_changes_are_not_structural() {
        let delta = DeltaNode::project(vec![
            DeltaNode::file("src/App.java", ChangeKind::Changed).with_flags(ChangeFlags::MARKERS),
        ]);
        assert!(!has_structural_change(&delta));
    }

    #[test]
    fn content_changes_are_structural() {
        let delta = DeltaNode::project(vec![
            DeltaNode::file("src/App.java", ChangeKind::Changed).with_flags(ChangeFlags::CONTENT),
        ]);
        assert!(has_structural_change(&delta));
    }

    #[test]
    fn flagless_interior_nodes_are_transparent() {
        let delta = DeltaNode::project(vec![DeltaNode::folder(
            "src",
            ChangeKind::Changed,
            vec![
                DeltaNode::file("src/App.java", ChangeKind::Changed)
                    .with_flags(ChangeFlags::MARKERS),
            ],
        )]);
        assert!(!has_structural_change(&delta));
    }

    #[test]
    fn mixed_flags_are_structural() {
        let delta = DeltaNode::project(vec![
            DeltaNode::file("src/App.java", ChangeKind::Changed)
                .with_flags(ChangeFlags::MARKERS | ChangeFlags::CONTENT),
        ]);
        assert!(has_structural_change(&delta));
    }
}
