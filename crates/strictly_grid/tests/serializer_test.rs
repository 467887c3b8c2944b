//! Tests for board records and renderers.

use strictly_grid::{
    Axis, AxisDescriptor, Board, BoardRecord, ConsoleRenderer, ErrorCategory, HtmlRenderer, ItemKind,
    Mark, Point, Renderer, dumps, loads,
};

fn mixed_board() -> Board {
    let mut board = Board::new(Axis::letters(5).unwrap(), Axis::one_based(3).unwrap());
    board.place(Point::new("c", 2), ItemKind::marker()).unwrap();
    board.place(Point::new("a", 1), ItemKind::piece(Mark::X)).unwrap();
    board.place(Point::new("e", 3), ItemKind::piece(Mark::O)).unwrap();
    board
        .set(Point::new("b", 3), ItemKind::Marker { token: "*".into() })
        .unwrap();
    board
}

#[test]
fn test_round_trip_keeps_kinds_and_coordinates() {
    let board = mixed_board();
    let restored = loads(&dumps(&board).unwrap()).unwrap();
    assert_eq!(restored.axis_x(), board.axis_x());
    assert_eq!(restored.axis_y(), board.axis_y());
    assert_eq!(restored.occupied(), board.occupied());
    for item in board.items() {
        let other = restored.get(item.point()).unwrap().unwrap();
        assert_eq!(other.kind(), item.kind());
    }
    assert_ne!(restored.id(), board.id());
}

#[test]
fn test_record_lists_axes_and_items_in_order() {
    let record = BoardRecord::from_board(&mixed_board());
    assert_eq!(record.axis_x, AxisDescriptor::Letters { size: 5 });
    assert_eq!(record.axis_y, AxisDescriptor::OneBased { size: 3 });
    let tokens: Vec<&str> = record.items.iter().map(|item| item.kind.token()).collect();
    assert_eq!(tokens, ["?", "X", "O", "*"]);
}

#[test]
fn test_replay_rejects_double_occupation() {
    let json = r#"{
        "axis_x": {"kind": "int", "size": 3},
        "axis_y": {"kind": "int", "size": 3},
        "items": [
            {"kind": "piece", "mark": "X", "x": 1, "y": 1},
            {"kind": "piece", "mark": "O", "x": 1, "y": 1}
        ]
    }"#;
    let err = loads(json).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Occupied);
}

#[test]
fn test_replay_rejects_out_of_range_item() {
    let json = r#"{
        "axis_x": {"kind": "letters", "size": 3},
        "axis_y": {"kind": "one_based", "size": 3},
        "items": [{"kind": "marker", "token": "?", "x": "d", "y": 1}]
    }"#;
    assert_eq!(loads(json).unwrap_err().category(), ErrorCategory::OutOfRange);
}

#[test]
fn test_invalid_axis_size_in_record() {
    let json = r#"{"axis_x":{"kind":"letters","size":60},"axis_y":{"kind":"int","size":3},"items":[]}"#;
    assert_eq!(loads(json).unwrap_err().category(), ErrorCategory::Configuration);
}

#[test]
fn test_console_rendering_example() {
    let mut board = Board::new(Axis::letters(5).unwrap(), Axis::one_based(3).unwrap());
    board.place(Point::new("c", 2), ItemKind::marker()).unwrap();
    assert_eq!(
        ConsoleRenderer::default().render(&board),
        " abcde\n1#####\n2##?##\n3#####\n"
    );
}

#[test]
fn test_html_rendering_marks_every_cell() {
    let board = mixed_board();
    let html = HtmlRenderer::default().render(&board);
    assert!(html.starts_with("<table border=\"1\">"));
    assert_eq!(html.matches("<td ").count(), 15);
    assert!(html.contains("<td data-x=\"e\" data-y=\"3\">O</td>"));
    assert_eq!(html.matches("<tr>").count(), 4);
}
