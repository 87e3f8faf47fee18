use shine_core::{
    ControlConsole, DetectionKey, EffectFrame, EffectParameterSink, FrameDrivenVectorGenerator,
    GlareKey, ParamId, RecordId, Tick,
};

/// Collects what a renderer would have seen.
#[derive(Default)]
struct CapturingSink {
    frames: Vec<EffectFrame>,
}

impl EffectParameterSink for CapturingSink {
    fn apply(&mut self, frame: &EffectFrame) {
        self.frames.push(frame.clone());
    }
}

#[test]
fn edits_and_frames_reach_the_sink() {
    let mut console = ControlConsole::default();
    let mut generator = FrameDrivenVectorGenerator::default();
    let mut sink = CapturingSink::default();

    let glow = ParamId::Glare(GlareKey::GlowPower);

    // Frame 1: nothing edited yet.
    let touch = generator.tick(Tick::from_secs(1.0 / 60.0));
    sink.apply(&console.effect_frame(touch));

    // Operator types, then drags, then picks a detection color.
    console.text_edited(glow, "3");
    console.text_edited(glow, "3.");
    let touch = generator.tick(Tick::from_secs(1.0 / 60.0));
    sink.apply(&console.effect_frame(touch));

    console.slider_moved(glow, 12.345);
    console.pick_detection_color("rgb(0, 0, 0)").unwrap();
    let touch = generator.tick(Tick::from_secs(1.0 / 60.0));
    sink.apply(&console.effect_frame(touch));

    assert_eq!(sink.frames.len(), 3);
    assert_eq!(sink.frames[0].glare.glow_power, 1.0);
    assert_eq!(sink.frames[1].glare.glow_power, 3.0);
    assert_eq!(sink.frames[2].glare.glow_power, 12.35);
    assert_eq!(sink.frames[2].detection.blue_channel, 1.0);

    // Earlier frames were not disturbed by later edits.
    assert_eq!(sink.frames[0].detection.red_channel, 0.0);

    for frame in &sink.frames {
        assert!((frame.touch.length() - 0.5).abs() < 1e-4);
    }
}

#[test]
fn divergent_text_is_flagged_until_recovered() {
    let mut console = ControlConsole::default();
    let sat = ParamId::Detection(DetectionKey::Saturation);

    console.text_edited(sat, "-");
    assert!(console.field(sat).text_error);
    assert_eq!(console.field(sat).value, 0.0);

    console.text_edited(sat, "-2");
    assert!(!console.field(sat).text_error);
    assert_eq!(console.field(sat).value, -2.0);
}

#[test]
fn reset_is_observed_by_every_bound_field() {
    let mut console = ControlConsole::default();
    for &key in &[GlareKey::GlowPower, GlareKey::LightIntensity] {
        console.slider_moved(key.into(), 7.0);
    }
    console.reset(RecordId::Glare);

    let fields = console.fields();
    let glare_fields = fields
        .iter()
        .filter(|f| matches!(f.param, ParamId::Glare(_)));
    for view in glare_fields {
        assert!(!view.text_error, "{} still divergent", view.label);
    }
    assert_eq!(console.field(GlareKey::LightIntensity.into()).text, "1");
}

#[test]
fn snapshot_serializes_for_the_ui() {
    let mut console = ControlConsole::default();
    console.pick_mask_color("rgb(80, 60, 30)").unwrap();
    let json = serde_json::to_value(console.snapshot()).unwrap();

    assert_eq!(json["colorMask"]["baseColor"], serde_json::json!([80, 60, 30]));
    assert_eq!(json["glare"]["glowPower"], serde_json::json!(1.0));
    assert_eq!(json["fields"][0]["param"]["key"], "glowPower");
}
