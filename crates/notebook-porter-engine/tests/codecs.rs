use notebook_porter_engine::{
    BlockKind, Orientation, TableOptions, TabularError, Workspace, convert_source,
    parse_document, render_document,
};
use pretty_assertions::assert_eq;

const NOTEBOOK: &str = "# Coin flips

A fair coin, sampled a few times.

~~~~
var flips = repeat(10, flip);
viz(flips);
~~~~

And a biased one:
~~~~webppl
var biased = function() { return flip(0.9); };
~~~~
~~~~
repeat(10, biased);
~~~~
";

fn kinds_and_contents(text: &str) -> Vec<(BlockKind, String)> {
    parse_document(text, None)
        .unwrap()
        .ordered_blocks()
        .into_iter()
        .map(|block| (block.kind, block.content.clone()))
        .collect()
}

#[test]
fn notebook_decodes_in_order() {
    let document = parse_document(NOTEBOOK, Some("coins")).unwrap();
    let kinds: Vec<_> = document.ordered_blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Text,
            BlockKind::Code,
            BlockKind::Text,
            BlockKind::Code,
            BlockKind::Code,
        ]
    );
    assert!(document.has_dense_order());
    assert_eq!(
        document.ordered_blocks()[3].content,
        "var biased = function() { return flip(0.9); };"
    );
}

#[test]
fn notebook_round_trips() {
    let rendered = render_document(&parse_document(NOTEBOOK, None).unwrap());
    assert_eq!(kinds_and_contents(&rendered), kinds_and_contents(NOTEBOOK));
}

#[test]
fn notebook_renders_canonically() {
    let rendered = render_document(&parse_document(NOTEBOOK, None).unwrap());
    insta::assert_snapshot!(rendered, @r"
    # Coin flips

    A fair coin, sampled a few times.

    ~~~~
    var flips = repeat(10, flip);
    viz(flips);
    ~~~~

    And a biased one:

    ~~~~
    var biased = function() { return flip(0.9); };
    ~~~~

    ~~~~
    repeat(10, biased);
    ~~~~
    ");
}

#[test]
fn import_into_workspace_and_export() {
    let mut workspace = Workspace::default();
    workspace.insert_document(parse_document("first", Some("a")).unwrap());
    let id = workspace.insert_document(parse_document(NOTEBOOK, Some("coins")).unwrap());

    assert_eq!(id, 1);
    assert_eq!(workspace.selected_file, 1);
    assert_eq!(
        workspace.export_markdown(None).unwrap(),
        render_document(workspace.document(1).unwrap())
    );
    assert_eq!(workspace.export_markdown(Some(0)).unwrap(), "first");
}

const SCORES: &str = "name,score\r\n\r\nada,3.5\r\n\r\n\"turing, alan\",4\r\n";

#[test]
fn row_major_declaration() {
    let declaration = convert_source("scores.csv", SCORES, &TableOptions::default()).unwrap();
    insta::assert_snapshot!(declaration, @r#"
    scores = [
      {
        "name": "ada",
        "score": 3.5
      },
      {
        "name": "turing, alan",
        "score": 4
      }
    ];
    "#);
}

#[test]
fn column_major_declaration() {
    let options = TableOptions {
        orientation: Orientation::Column,
        ..TableOptions::default()
    };
    let declaration = convert_source("scores.csv", SCORES, &options).unwrap();
    insta::assert_snapshot!(declaration, @r#"
    scores = {
      "name": [
        "ada",
        "turing, alan"
      ],
      "score": [
        3.5,
        4
      ]
    };
    "#);
}

#[test]
fn headerless_declaration_uses_indices() {
    let options = TableOptions {
        separator: ';',
        has_headers: false,
        ..TableOptions::default()
    };
    let declaration = convert_source("1.txt", "a;1\n\nb;2", &options).unwrap();
    insta::assert_snapshot!(declaration, @r#"
    dataset_1 = [
      {
        "0": "a",
        "1": 1
      },
      {
        "0": "b",
        "1": 2
      }
    ];
    "#);
}

#[test]
fn simplified_single_column_declaration() {
    let options = TableOptions {
        simplify_single_column: true,
        ..TableOptions::default()
    };
    let declaration = convert_source("xs.csv", "x\n\n1\n\n2\n\nthree", &options).unwrap();
    insta::assert_snapshot!(declaration, @r#"
    xs = [
      1,
      2,
      "three"
    ];
    "#);
}

#[test]
fn ragged_table_renders_nothing() {
    let result = convert_source("t.csv", "a,b,c\n\n1,2", &TableOptions::default());
    match result {
        Err(TabularError::RowLengthMismatch {
            row,
            expected,
            found,
        }) => assert_eq!((row, expected, found), (1, 3, 2)),
        other => panic!("expected a row length mismatch, got {other:?}"),
    }
}
