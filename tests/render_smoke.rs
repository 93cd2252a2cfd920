//! End-to-end pixel checks through the scenario replay path.

use ringdrift::{CpuSurfaceOpts, FrameRGBA, InMemorySink, Scenario, ScenarioDef};

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    frame.data[i..i + 4].try_into().unwrap()
}

fn scenario(json: serde_json::Value) -> Scenario {
    let def: ScenarioDef = serde_json::from_value(json).unwrap();
    Scenario::from_def(def).unwrap()
}

#[test]
fn composition_renders_innermost_color_at_the_center() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let scenario = scenario(serde_json::json!({
        "background": {
            "viewport": {"width": 200, "height": 150},
            "palette": ["#ff0000", "#00ff00", "#0000ff"]
        },
        "events": [
            {"frame": 0, "kind": "pointer-move", "x": 100.0, "y": 75.0}
        ]
    }));

    let opts = CpuSurfaceOpts::default().with_clear_rgba(Some([255, 255, 255, 255]));
    let mut sink = InMemorySink::new();
    scenario.play(1, opts, &mut sink).unwrap();

    let frame = &sink.frames()[0].1;
    assert_eq!(frame.width, 200);
    assert_eq!(frame.height, 150);
    // Innermost ring (radius 20) is on top at the shared center.
    assert_eq!(px(frame, 100, 75), [0, 0, 255, 255]);
    // Between the innermost and middle radii (20 < r <= 40) the middle ring shows.
    assert_eq!(px(frame, 100 + 30, 75), [0, 255, 0, 255]);
    // Between the middle and outer radii (40 < r <= 60) the outer ring shows.
    assert_eq!(px(frame, 100 + 50, 75), [255, 0, 0, 255]);
    // Outside all rings, the clear color shows through.
    assert_eq!(px(frame, 2, 2), [255, 255, 255, 255]);
}

#[test]
fn drift_eventually_moves_the_composition_off_center() {
    let scenario = scenario(serde_json::json!({
        "background": {
            "viewport": {"width": 200, "height": 150},
            "palette": ["#ff0000"],
            "transition": {
                "mode": "translate",
                "targets": {"about": [60.0, 0.0]}
            }
        },
        "events": [
            {"frame": 0, "kind": "pointer-move", "x": 100.0, "y": 75.0},
            {"frame": 1, "kind": "navigate", "route": "about"}
        ]
    }));

    let opts = CpuSurfaceOpts::default().with_clear_rgba(Some([255, 255, 255, 255]));
    let mut sink = InMemorySink::new();
    scenario.play(240, opts, &mut sink).unwrap();

    let frames = sink.frames();
    // Before navigation the single disc (radius 60) is centered at (100, 75):
    // a point just right of it is background.
    assert_eq!(px(&frames[0].1, 165, 75), [255, 255, 255, 255]);
    // Near-settled drift has carried the disc ~60px right; the same point is
    // now well inside it, and the old left edge is bare.
    let last = &frames[239].1;
    assert_eq!(px(last, 165, 75), [255, 0, 0, 255]);
    assert_eq!(px(last, 45, 75), [255, 255, 255, 255]);
}

#[test]
fn degenerate_resize_degrades_silently() {
    let scenario = scenario(serde_json::json!({
        "background": {
            "viewport": {"width": 64, "height": 48},
            "palette": ["#ff0000", "#00ff00"]
        },
        "events": [
            {"frame": 1, "kind": "resize", "width": 0, "height": 48},
            {"frame": 2, "kind": "resize", "width": 64, "height": 48}
        ]
    }));

    let mut sink = InMemorySink::new();
    scenario
        .play(3, CpuSurfaceOpts::default(), &mut sink)
        .unwrap();

    let frames = sink.frames();
    assert_eq!(frames[0].1.data.len(), 64 * 48 * 4);
    assert!(frames[1].1.data.is_empty());
    // Recovery after the viewport becomes drawable again.
    assert_eq!(frames[2].1.data.len(), 64 * 48 * 4);
}
