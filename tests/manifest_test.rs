//! Tests for building trees from TOML manifests

use std::path::PathBuf;

use tempfile::TempDir;

use texnodes::manifest::{DocumentManifest, ManifestError};
use texnodes::util::testing;
use texnodes::{DomainError, NodeKind};

fn create_manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write manifest");
    path
}

const AUTHOR: &str = r#"
[[nodes]]
kind = "command"
name = "documentclass"
argument = "article"
options = ["11pt", "twoside", "a4paper"]

[[nodes]]
kind = "command"
name = "usepackage"
argument = "geometry"
options = "margin=2cm"

[[nodes]]
kind = "command"
name = "author"

[nodes.argument]
kind = "content"
children = [
    { kind = "t", text = "Andrew Roberts" },
    { kind = "line_break" },
    { kind = "t", text = "School of Computing" },
    { kind = "line_break" },
    { kind = "command", name = "texttt", argument = "andy@foo.com" },
]

[[nodes]]
kind = "command"
name = "addcontentsline"
argument = ["toc", "subsection", "Preface"]
"#;

#[test]
fn given_manifest_file_when_building_then_renders_all_argument_shapes() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = create_manifest(&temp, "author.toml", AUTHOR);

    // Act
    let tree = DocumentManifest::load(&path).unwrap().build().unwrap();

    // Assert
    assert_eq!(
        tree.render(tree.root()).unwrap(),
        "\\documentclass[11pt,twoside,a4paper]{article}\n\
         \\usepackage[margin=2cm]{geometry}\n\
         \\author{Andrew Roberts\\\\\nSchool of Computing\\\\\n\\texttt{andy@foo.com}\n}\n\
         \\addcontentsline{toc}{subsection}{Preface}\n"
    );
}

#[test]
fn given_all_kinds_when_building_then_each_kind_materializes() {
    // Arrange
    let manifest: DocumentManifest = r#"
[[nodes]]
kind = "group"
children = [{ kind = "text", text = "g" }]

[[nodes]]
kind = "group"
name = "abstract"

[[nodes]]
kind = "environment"
name = "tabular"
args = ["lr"]

[[nodes]]
kind = "dquote"
text = "q"

[[nodes]]
kind = "switch"
name = "em"
children = [{ kind = "t", text = "x" }]

[[nodes]]
kind = "command"
name = "today"
newline = false

[[nodes]]
kind = "text"
text = " end"
"#
    .parse()
    .unwrap();

    // Act
    let tree = manifest.build().unwrap();

    // Assert
    let kinds: Vec<&'static str> = tree
        .children(tree.root())
        .unwrap()
        .iter()
        .map(|&id| tree.kind(id).unwrap().kind_name())
        .collect();
    assert_eq!(
        kinds,
        vec!["Group", "Group", "Environment", "DQuote", "Switch", "Command", "Text"]
    );
    assert_eq!(
        tree.render(tree.root()).unwrap(),
        "{\ng\n}\n\\beginabstract\n\n\\endabstract\n\\begin{tabular}{lr}\n\n\\end{tabular}\n``q''em\\{x\\}\\today{} end"
    );
}

#[test]
fn given_boolean_argument_when_building_then_invalid_argument() {
    // Arrange
    let manifest: DocumentManifest = r#"
[[nodes]]
kind = "command"
name = "flag"
argument = true
"#
    .parse()
    .unwrap();

    // Act
    let result = manifest.build();

    // Assert
    match result {
        Err(ManifestError::Domain(DomainError::InvalidArgument { command, reason })) => {
            assert_eq!(command, "flag");
            assert!(reason.contains("boolean"), "reason: {}", reason);
        }
        other => panic!("expected InvalidArgument, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn given_table_argument_that_is_not_a_node_when_building_then_invalid_argument() {
    let manifest: DocumentManifest = r#"
[[nodes]]
kind = "command"
name = "x"
argument = { foo = "bar" }
"#
    .parse()
    .unwrap();

    assert!(matches!(
        manifest.build(),
        Err(ManifestError::Domain(DomainError::InvalidArgument { .. }))
    ));
}

#[test]
fn given_missing_manifest_when_loading_then_read_error() {
    let result = DocumentManifest::load(&PathBuf::from("/nonexistent/doc.toml"));
    assert!(matches!(result, Err(ManifestError::Read { .. })));
}

#[test]
fn given_empty_manifest_when_building_then_empty_document() {
    let tree = DocumentManifest::default().build().unwrap();
    assert_eq!(tree.kind(tree.root()).unwrap(), &NodeKind::Document);
    assert_eq!(tree.render(tree.root()).unwrap(), "");
}
