//! Animation System Tests
//!
//! Tests for:
//! - AnimationClip duration auto-computation and camera-track detection
//! - AnimationAction loop modes (Once, Repeat) and play state
//! - AnimationMixer shared clock and event reporting
//! - AnimationDirector classification, start-up and camera-loop re-sync

use std::sync::Arc;

use showroom::animation::action::{ActionEvent, AnimationAction, LoopMode};
use showroom::animation::clip::{AnimationClip, Track};
use showroom::animation::director::{AnimationDirector, CameraLoopMode, classify};
use showroom::animation::mixer::AnimationMixer;
use showroom::effects::frame_index;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn clip(name: &str, track: &str, duration: f32) -> Arc<AnimationClip> {
    let track = Track::new(track, vec![0.0, duration]);
    Arc::new(AnimationClip::new(name, vec![track]))
}

fn model_times(director: &AnimationDirector) -> Vec<f32> {
    director
        .model_actions()
        .iter()
        .map(|&id| director.mixer().action(id).unwrap().time)
        .collect()
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "test",
        vec![
            Track::new("a.position", vec![0.0, 1.5]),
            Track::new("b.quaternion", vec![0.0, 1.0, 3.0]),
        ],
    );

    assert!(
        approx(clip.duration, 3.0),
        "Duration should be max of all tracks (3.0), got {}",
        clip.duration
    );
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("empty", vec![]);
    assert!(approx(clip.duration, 0.0));
}

#[test]
fn camera_detection_is_case_insensitive_substring() {
    assert!(clip("a", "Camera.001.position", 1.0).is_camera_clip());
    assert!(clip("b", "MainCAMERA.quaternion", 1.0).is_camera_clip());
    assert!(clip("c", "camera_rig.position", 1.0).is_camera_clip());
    assert!(!clip("d", "Hips.quaternion", 1.0).is_camera_clip());
    assert!(!clip("e", "Cam.position", 1.0).is_camera_clip());
}

#[test]
fn camera_detection_checks_every_track() {
    let clip = AnimationClip::new(
        "mixed",
        vec![
            Track::new("Hips.position", vec![0.0, 1.0]),
            Track::new("Camera.position", vec![0.0, 1.0]),
        ],
    );
    assert!(clip.is_camera_clip());
}

// ============================================================================
// AnimationAction Loop Modes
// ============================================================================

#[test]
fn action_loop_mode_once() {
    let mut action = AnimationAction::new(clip("m", "node.position", 2.0))
        .with_loop(LoopMode::Once, true);
    action.play();

    let event = action.update(3.0);
    assert_eq!(event, Some(ActionEvent::Finished));
    assert!(
        approx(action.time, 2.0),
        "Once: should clamp to duration, got {}",
        action.time
    );
    assert!(action.paused, "Once: should auto-pause at end");
}

#[test]
fn action_loop_mode_repeat() {
    let mut action = AnimationAction::new(clip("m", "node.position", 2.0))
        .with_loop(LoopMode::Repeat, false);
    action.play();

    let event = action.update(2.5);
    assert_eq!(event, Some(ActionEvent::Looped));
    assert!(
        approx(action.time, 0.5),
        "Repeat: should wrap to 0.5, got {}",
        action.time
    );
    assert!(!action.paused, "Repeat: should NOT auto-pause");
}

#[test]
fn action_reverse_playback_wraps() {
    let mut action = AnimationAction::new(clip("m", "node.position", 2.0));
    action.play();
    action.time_scale = -1.0;
    action.time = 0.5;

    assert_eq!(action.update(1.0), Some(ActionEvent::Looped));
    assert!(approx(action.time, 1.5), "got {}", action.time);
}

#[test]
fn action_paused_no_update() {
    let mut action = AnimationAction::new(clip("m", "node.position", 2.0));
    action.time = 0.5;

    assert_eq!(action.update(1.0), None);
    assert!(approx(action.time, 0.5), "Paused action should not advance");
}

#[test]
fn action_zero_duration_never_advances() {
    let mut action = AnimationAction::new(Arc::new(AnimationClip::new("empty", vec![])));
    action.play();

    assert_eq!(action.update(1.0), None);
    assert!(approx(action.time, 0.0));
}

#[test]
fn action_reset_reenables_finished_action() {
    let mut action = AnimationAction::new(clip("m", "node.position", 1.0))
        .with_loop(LoopMode::Once, false);
    action.play();
    action.update(2.0);
    assert!(!action.is_running());

    action.reset();
    action.play();
    assert!(action.is_running());
    assert!(approx(action.time, 0.0));
}

// ============================================================================
// AnimationMixer
// ============================================================================

#[test]
fn mixer_time_accumulates_without_wrapping() {
    let mut mixer = AnimationMixer::new();
    let id = mixer.clip_action(clip("cam", "Camera.position", 1.0));
    mixer.action_mut(id).unwrap().play();

    mixer.update(0.75);
    mixer.update(0.75);

    assert!((mixer.time() - 1.5).abs() < 1e-9);
    assert!(approx(mixer.action(id).unwrap().time, 0.5));
}

#[test]
fn mixer_time_keeps_advancing_after_long_uptime() {
    let mut mixer = AnimationMixer::new();
    // ~12 days: past the point where an f32 clock swallows a 60 Hz delta.
    mixer.update(1_048_576.0);

    let mut frames = Vec::new();
    for _ in 0..4 {
        let before = mixer.time();
        mixer.update(1.0 / 60.0);
        assert!(mixer.time() > before, "clock stalled at {before}");
        frames.push(frame_index(mixer.time(), 24.0));
    }

    assert!(frames.last() > frames.first(), "frame index froze: {frames:?}");
}

#[test]
fn mixer_reports_events_per_action() {
    let mut mixer = AnimationMixer::new();
    let looping = mixer.clip_action(clip("a", "a.position", 1.0));
    let once = mixer.clip_action(clip("b", "b.position", 1.0));
    mixer.action_mut(looping).unwrap().play();
    let action = mixer.action_mut(once).unwrap();
    action.loop_mode = LoopMode::Once;
    action.play();

    let events = mixer.update(1.2);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, looping);
    assert_eq!(events[0].kind, ActionEvent::Looped);
    assert_eq!(events[1].action, once);
    assert_eq!(events[1].kind, ActionEvent::Finished);
}

// ============================================================================
// Director: classification
// ============================================================================

#[test]
fn classify_picks_camera_clip_and_keeps_model_order() {
    let clips = vec![
        clip("Hips", "Hips", 1.0),
        clip("Camera.001", "Camera.001", 1.0),
        clip("Spine", "Spine", 1.0),
    ];

    let partition = classify(clips);

    assert_eq!(partition.camera.as_ref().unwrap().name, "Camera.001");
    let models: Vec<&str> = partition.models.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(models, ["Hips", "Spine"]);
}

#[test]
fn classify_first_camera_clip_wins() {
    let clips = vec![
        clip("wheel", "wheel.quaternion", 1.0),
        clip("shot_a", "Camera.position", 1.0),
        clip("shot_b", "CameraTarget.position", 1.0),
    ];

    let partition = classify(clips);

    assert_eq!(partition.camera.as_ref().unwrap().name, "shot_a");
    let models: Vec<&str> = partition.models.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(models, ["wheel", "shot_b"]);
}

#[test]
fn classify_is_deterministic() {
    let clips = vec![
        clip("a", "a.position", 1.0),
        clip("cam", "camera.position", 2.0),
        clip("b", "b.scale", 3.0),
    ];

    let first = classify(clips.clone());
    let second = classify(clips);

    assert_eq!(first.camera, second.camera);
    assert_eq!(first.models, second.models);
}

#[test]
fn classify_empty_input() {
    let partition = classify(Vec::new());
    assert!(partition.camera.is_none());
    assert!(partition.models.is_empty());
}

// ============================================================================
// Director: start-up
// ============================================================================

#[test]
fn start_configures_and_plays_every_action() {
    let partition = classify(vec![
        clip("cam", "Camera.position", 4.0),
        clip("body", "body.position", 2.0),
    ]);
    let director = AnimationDirector::start(partition, CameraLoopMode::Loop);

    let camera = director.mixer().action(director.camera_action().unwrap()).unwrap();
    assert_eq!(camera.loop_mode, LoopMode::Repeat);
    assert!(!camera.clamp_when_finished);
    assert!(camera.is_running());

    let model = director.mixer().action(director.model_actions()[0]).unwrap();
    assert_eq!(model.loop_mode, LoopMode::Once);
    assert!(model.is_running());

    assert!(director.is_camera_driven());
}

#[test]
fn start_in_once_mode_clamps_camera() {
    let partition = classify(vec![clip("cam", "Camera.position", 4.0)]);
    let director = AnimationDirector::start(partition, CameraLoopMode::Once);

    let camera = director.mixer().action(director.camera_action().unwrap()).unwrap();
    assert_eq!(camera.loop_mode, LoopMode::Once);
    assert!(camera.clamp_when_finished);
}

// ============================================================================
// Director: re-sync on camera loop
// ============================================================================

#[test]
fn camera_loop_rewinds_models_within_same_tick() {
    let partition = classify(vec![
        clip("cam", "Camera.position", 2.0),
        clip("body", "body.position", 1.0),
        clip("door", "door.quaternion", 1.5),
    ]);
    let mut director = AnimationDirector::start(partition, CameraLoopMode::Loop);

    for _ in 0..3 {
        assert!(!director.tick(0.5));
    }
    // body finished at 1.0 and stopped; door still running.
    let body = director.mixer().action(director.model_actions()[0]).unwrap();
    assert!(!body.is_running());

    assert!(director.tick(0.6));

    for time in model_times(&director) {
        assert!(approx(time, 0.0), "model time should be rewound, got {time}");
    }
    for &id in director.model_actions() {
        assert!(director.mixer().action(id).unwrap().is_running());
    }
    assert_eq!(director.resync_count(), 1);
}

#[test]
fn one_boundary_per_tick_even_across_several_cycles() {
    let partition = classify(vec![
        clip("cam", "Camera.position", 1.0),
        clip("body", "body.position", 1.0),
    ]);
    let mut director = AnimationDirector::start(partition, CameraLoopMode::Loop);

    assert!(director.tick(3.5));
    assert_eq!(director.resync_count(), 1);
}

#[test]
fn boundary_is_idempotent() {
    let partition = classify(vec![
        clip("cam", "Camera.position", 2.0),
        clip("body", "body.position", 1.0),
    ]);
    let mut director = AnimationDirector::start(partition, CameraLoopMode::Loop);
    director.tick(0.7);

    director.on_camera_loop_boundary();
    let once = model_times(&director);
    director.on_camera_loop_boundary();
    let twice = model_times(&director);

    assert_eq!(once, twice);
    assert!(once.iter().all(|&t| approx(t, 0.0)));
}

#[test]
fn once_mode_never_resyncs() {
    let partition = classify(vec![
        clip("cam", "Camera.position", 1.0),
        clip("body", "body.position", 0.5),
    ]);
    let mut director = AnimationDirector::start(partition, CameraLoopMode::Once);

    for _ in 0..10 {
        assert!(!director.tick(0.3));
    }

    let camera = director.mixer().action(director.camera_action().unwrap()).unwrap();
    assert!(approx(camera.time, 1.0), "camera should hold its last pose");
    assert!(camera.enabled);
    assert_eq!(director.resync_count(), 0);
}

#[test]
fn models_without_camera_play_once_and_stop() {
    let partition = classify(vec![clip("body", "body.position", 1.0)]);
    let mut director = AnimationDirector::start(partition, CameraLoopMode::Loop);

    assert!(!director.is_camera_driven());
    for _ in 0..5 {
        assert!(!director.tick(0.5));
    }

    let body = director.mixer().action(director.model_actions()[0]).unwrap();
    assert!(!body.is_running());
    assert!(approx(body.time, 1.0));
    assert_eq!(director.resync_count(), 0);
    assert!((director.elapsed() - 2.5).abs() < 1e-9);
}

#[test]
fn camera_without_models_loops_quietly() {
    let partition = classify(vec![clip("cam", "Camera.position", 1.0)]);
    let mut director = AnimationDirector::start(partition, CameraLoopMode::Loop);

    assert!(!director.tick(0.6));
    assert!(director.tick(0.6));
    assert!(director.model_actions().is_empty());
}
