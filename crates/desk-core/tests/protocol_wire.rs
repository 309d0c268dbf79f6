//! Integration tests for the desk-core wire format.
//!
//! These tests pin the exact JSON a browser peer sends and expects, and check
//! that a stream of mixed good, bad, and unknown frames can be decoded one by
//! one without any frame affecting the next.

use desk_core::{
    decode_event, encode_event, DecodeError, InputEvent, MouseButton, ScreenSizeReport,
    ScrollDirection,
};
use serde_json::{json, Value};

fn encode_to_value(event: &InputEvent) -> Value {
    serde_json::from_str(&encode_event(event)).expect("encoded text must be valid JSON")
}

#[test]
fn test_every_outbound_command_matches_wire_table() {
    let cases = [
        (
            InputEvent::MouseMove { x: 10, y: 20 },
            json!({"command": "mousemove", "data": {"x": 10, "y": 20}}),
        ),
        (
            InputEvent::Click {
                button: MouseButton::Right,
            },
            json!({"command": "click", "data": {"button": "right"}}),
        ),
        (
            InputEvent::DoubleClick {
                button: MouseButton::Center,
            },
            json!({"command": "dblclick", "data": {"button": "center"}}),
        ),
        (
            InputEvent::Scroll {
                direction: ScrollDirection::Up,
            },
            json!({"command": "mousescroll", "data": {"direction": "up"}}),
        ),
        (
            InputEvent::TouchMove { x: -3, y: 4 },
            json!({"command": "mousetouchmove", "data": {"x": -3, "y": 4}}),
        ),
        (
            InputEvent::KeyDown { key_code: 27 },
            json!({"command": "keydown", "data": {"keyCode": 27}}),
        ),
        (
            InputEvent::ScreenSizeQuery,
            json!({"command": "screensize", "data": {}}),
        ),
        (
            InputEvent::Terminate,
            json!({"command": "terminate", "data": {}}),
        ),
    ];

    for (event, expected) in cases {
        assert_eq!(encode_to_value(&event), expected, "wire mismatch for {event:?}");
    }
}

#[test]
fn test_report_from_controlled_side_decodes() {
    // Browser peers send the report with string fields built from toFixed(0)
    let frame = r#"{"command":"screensize","data":{"width":"2560","height":"1440","mouseX":"1280","mouseY":"720"}}"#;

    let event = decode_event(frame).expect("report must decode");

    assert_eq!(
        event,
        Some(InputEvent::ScreenSizeReport(ScreenSizeReport {
            width: 2560,
            height: 1440,
            mouse_x: 1280,
            mouse_y: 720,
        }))
    );
}

#[test]
fn test_mixed_stream_decodes_each_frame_independently() {
    // Arrange
    let frames = [
        r#"{"command":"mousetouchmove","data":{"x":5,"y":6}}"#,
        r#"{"command":"mousetouchmove","data":{"x":"oops"}}"#,
        r#"{"command":"future-feature","data":{"anything":true}}"#,
        "}{",
        r#"{"command":"mousetouchmove","data":{"x":7,"y":8}}"#,
    ];

    // Act
    let results: Vec<_> = frames.iter().map(|f| decode_event(f)).collect();

    // Assert
    assert_eq!(results[0], Ok(Some(InputEvent::TouchMove { x: 5, y: 6 })));
    assert!(matches!(results[1], Err(DecodeError::InvalidPayload { .. })));
    assert_eq!(results[2], Ok(None));
    assert!(matches!(results[3], Err(DecodeError::Malformed(_))));
    assert_eq!(results[4], Ok(Some(InputEvent::TouchMove { x: 7, y: 8 })));
}

#[test]
fn test_decode_error_messages_name_the_command() {
    let err = decode_event(r#"{"command":"keydown","data":{}}"#).unwrap_err();
    assert!(err.to_string().contains("keydown"), "got: {err}");
}
