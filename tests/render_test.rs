//! Rendering of whole trees built through the public API.

use rstest::rstest;

use texnodes::util::testing;
use texnodes::{Command, DocTree, DomainError, NodeId, NodeKind};

fn hello_direct() -> (DocTree, NodeId) {
    let mut tree = DocTree::new();
    let doc = tree.root();

    let comment = tree
        .create(NodeKind::comment("hello.tex - Our first LaTex example!"))
        .unwrap();
    tree.append(doc, comment).unwrap();
    let class = tree
        .create(Command::new("documentclass").argument("article").into())
        .unwrap();
    tree.append(doc, class).unwrap();
    let env = tree.create(NodeKind::environment("document")).unwrap();
    let text = tree.create(NodeKind::text("Hello World!")).unwrap();
    tree.append(env, text).unwrap();
    tree.append(doc, env).unwrap();

    (tree, doc)
}

const HELLO: &str = "% hello.tex - Our first LaTex example!\n\
\\documentclass{article}\n\
\\begin{document}\n\
Hello World!\n\
\\end{document}\n";

#[test]
fn given_hello_document_when_render_then_matches_latex() {
    testing::init_test_setup();
    let (tree, doc) = hello_direct();
    assert_eq!(tree.render(doc).unwrap(), HELLO);
}

#[test]
fn given_same_document_via_scoped_api_when_render_then_identical() {
    testing::init_test_setup();
    let (direct, direct_root) = hello_direct();

    let mut tree = DocTree::new();
    let doc = tree.root();
    tree.new_comment(doc, "hello.tex - Our first LaTex example!").unwrap();
    let class = tree.accessor(doc, "command").unwrap();
    tree.set_name(class, "documentclass").unwrap();
    tree.set_argument(class, "article".into()).unwrap();
    let env = tree.accessor(doc, "environment").unwrap();
    tree.set_name(env, "document").unwrap();
    let text = tree.create(NodeKind::text("Hello World!")).unwrap();
    tree.with_child(env, text, |_, _| Ok(())).unwrap();

    assert_eq!(
        tree.render(doc).unwrap(),
        direct.render(direct_root).unwrap()
    );
}

#[test]
fn given_nested_scopes_when_render_then_nesting_is_preserved() {
    let mut tree = DocTree::new();
    let doc = tree.root();
    let env = tree.create(NodeKind::environment("document")).unwrap();

    tree.with_child(doc, env, |t, env| {
        t.new_command(env, Command::new("section").argument("Intro"))?;
        let list = t.create(NodeKind::environment("itemize"))?;
        t.with_child(env, list, |t, list| {
            t.new_command(list, Command::new("item").inline())?;
            t.new_text(list, "first")
        })
    })
    .unwrap();

    assert_eq!(
        tree.render(doc).unwrap(),
        "\\begin{document}\n\\section{Intro}\n\\begin{itemize}\n\\item{}first\n\\end{itemize}\n\n\\end{document}\n"
    );
}

#[rstest]
#[case(
    Command::new("documentclass").argument("article").options(vec!["11pt", "twoside", "a4paper"]),
    "\\documentclass[11pt,twoside,a4paper]{article}\n"
)]
#[case(Command::new("usepackage").argument("color"), "\\usepackage{color}\n")]
#[case(Command::new("usepackage").argument("p1,p2,p3"), "\\usepackage{p1,p2,p3}\n")]
#[case(
    Command::new("usepackage").argument("geometry").options("margin=2cm"),
    "\\usepackage[margin=2cm]{geometry}\n"
)]
#[case(
    Command::new("addcontentsline").argument("toc,subsection,Preface".split(',').collect::<Vec<_>>()),
    "\\addcontentsline{toc}{subsection}{Preface}\n"
)]
#[case(Command::new("today"), "\\today\n")]
fn given_command_when_render_then_matches(#[case] cmd: Command, #[case] expected: &str) {
    let mut tree = DocTree::new();
    let id = tree.create(cmd.into()).unwrap();
    assert_eq!(tree.render(id).unwrap(), expected);
}

#[test]
fn given_content_subtree_argument_when_render_then_single_block() {
    let mut tree = DocTree::new();
    let foo = tree.create(NodeKind::Content).unwrap();
    tree.append_text(foo, "Andrew Roberts").unwrap();
    tree.new_line_break(foo).unwrap();
    tree.append_text(foo, "School of Computing").unwrap();
    tree.new_line_break(foo).unwrap();
    tree.new_command(foo, Command::new("texttt").argument("andy@foo.com")).unwrap();
    let author = tree
        .create(Command::new("author").argument(foo).into())
        .unwrap();

    assert_eq!(
        tree.render(author).unwrap(),
        "\\author{Andrew Roberts\\\\\nSchool of Computing\\\\\n\\texttt{andy@foo.com}\n}\n"
    );
}

#[test]
fn given_command_then_text_sibling_when_render_then_empty_group_inserted() {
    let mut tree = DocTree::new();
    let doc = tree.root();
    tree.new_command(doc, Command::new("today").inline()).unwrap();
    tree.new_text(doc, " is the day").unwrap();
    tree.new_command(doc, Command::new("today").inline()).unwrap();
    tree.new_line_break(doc).unwrap();
    tree.new_command(doc, Command::new("today").inline()).unwrap();

    assert_eq!(
        tree.render(doc).unwrap(),
        "\\today{} is the day\\today\\\\\n\\today"
    );
}

#[test]
fn given_command_then_content_starting_with_text_when_render_then_no_empty_group() {
    let mut tree = DocTree::new();
    let doc = tree.root();
    tree.new_command(doc, Command::new("today").inline()).unwrap();
    let content = tree.new_content(doc).unwrap();
    tree.append_text(content, "text").unwrap();

    assert_eq!(tree.render(doc).unwrap(), "\\todaytext");
}

#[test]
fn given_text_moved_away_when_render_then_empty_group_disappears() {
    let mut tree = DocTree::new();
    let doc = tree.root();
    tree.new_command(doc, Command::new("LaTeX").inline()).unwrap();
    let text = tree.new_text(doc, "!").unwrap();
    assert_eq!(tree.render(doc).unwrap(), "\\LaTeX{}!");

    tree.detach(text).unwrap();
    assert_eq!(tree.render(doc).unwrap(), "\\LaTeX");
}

#[test]
fn given_unchanged_tree_when_render_twice_then_identical() {
    let (tree, doc) = hello_direct();
    let first = tree.render(doc).unwrap();
    let second = tree.render(doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn given_children_appended_when_render_then_insertion_order_kept() {
    let mut tree = DocTree::new();
    let doc = tree.root();
    for word in ["a", "b", "c"] {
        tree.append_text(doc, word).unwrap();
    }
    assert_eq!(tree.render(doc).unwrap(), "abc");

    let a = tree.children(doc).unwrap()[0];
    tree.append(doc, a).unwrap();
    assert_eq!(tree.render(doc).unwrap(), "bca");
}

#[test]
fn given_growing_tree_when_render_then_length_never_shrinks() {
    let mut tree = DocTree::new();
    let doc = tree.root();
    let mut last = 0;
    for i in 0..20 {
        match i % 4 {
            0 => tree.new_comment(doc, "c").unwrap(),
            1 => tree.new_command(doc, Command::new("x")).unwrap(),
            2 => tree.new_line_break(doc).unwrap(),
            _ => tree.append_text(doc, "").unwrap(),
        };
        let len = tree.render(doc).unwrap().len();
        assert!(len >= last);
        last = len;
    }
}

#[test]
fn given_handle_from_other_tree_when_render_then_not_found() {
    let mut other = DocTree::new();
    other.append_text(other.root(), "theirs").unwrap();
    let mut tree = DocTree::new();
    tree.append_text(tree.root(), "mine").unwrap();

    let foreign = other.root();
    assert_eq!(tree.render(foreign), Err(DomainError::NodeNotFound(foreign)));
    assert_eq!(
        tree.append(tree.root(), foreign),
        Err(DomainError::NodeNotFound(foreign))
    );
    assert_eq!(tree.render(tree.root()).unwrap(), "mine");
}
