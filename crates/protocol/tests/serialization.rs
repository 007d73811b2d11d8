use aura_protocol::*;
use serde_json;

#[test]
fn test_pipeline_stage_serialization() {
    let json = serde_json::to_value(PipelineStage::VoiceSynthesis)
        .expect("Failed to serialize PipelineStage");
    assert_eq!(json, "VOICE_SYNTHESIS");

    let deserialized: PipelineStage =
        serde_json::from_str("\"AVATAR_SYNC\"").expect("Failed to deserialize PipelineStage");
    assert_eq!(deserialized, PipelineStage::AvatarSync);
}

#[test]
fn test_project_data_uses_camel_case_fields() {
    let mut project = ProjectData::empty();
    project.topic = "Chain Rule".to_string();
    project.generated_code = Some("class MathLessonScene(Scene): pass".to_string());

    let json = serde_json::to_value(&project).expect("Failed to serialize ProjectData");

    assert_eq!(json["topic"], "Chain Rule");
    assert_eq!(json["status"], "IDLE");
    assert!(json.get("generatedCode").is_some());
    assert!(json.get("videoUrl").is_some());
    assert!(json.get("lastUpdated").is_some());
    assert!(json["script"].is_null());

    let deserialized: ProjectData =
        serde_json::from_value(json).expect("Failed to deserialize ProjectData");
    assert_eq!(deserialized, project);
}

#[test]
fn test_log_entry_kind_serializes_as_type() {
    let entry = LogEntry::new("Audio assets synthesized", LogKind::Success, PipelineStage::VoiceSynthesis);

    let json = serde_json::to_value(&entry).expect("Failed to serialize LogEntry");
    assert_eq!(json["type"], "success");
    assert_eq!(json["stage"], "VOICE_SYNTHESIS");
    assert_eq!(json["message"], "Audio assets synthesized");
}

#[test]
fn test_project_patch_skips_absent_fields() {
    let patch = ProjectPatch::default().with_video_url("https://cdn.example/final.mp4");

    let json = serde_json::to_value(&patch).expect("Failed to serialize ProjectPatch");
    assert_eq!(json["videoUrl"], "https://cdn.example/final.mp4");
    assert!(json.get("id").is_none());
    assert!(json.get("script").is_none());
}

#[test]
fn test_op_enum_serialization() {
    let op = Op::SetTopic {
        topic: "Chain Rule".to_string(),
    };

    let json = serde_json::to_value(&op).expect("Failed to serialize Op");
    assert_eq!(json["type"], "setTopic");
    assert_eq!(json["payload"]["topic"], "Chain Rule");

    let deserialized: Op = serde_json::from_value(json).expect("Failed to deserialize Op");
    assert_eq!(deserialized, op);

    let json = serde_json::to_value(Op::StartPipeline).expect("Failed to serialize Op::StartPipeline");
    assert_eq!(json["type"], "startPipeline");
}

#[test]
fn test_event_enum_serialization() {
    let event = Event::ProjectUpdated {
        project: ProjectData::empty(),
        is_processing: false,
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "projectUpdated");
    assert_eq!(json["payload"]["isProcessing"], false);

    let mode_changed = Event::RunModeChanged { mode: RunMode::Live };
    let json = serde_json::to_value(&mode_changed).expect("Failed to serialize Event");
    assert_eq!(json["type"], "runModeChanged");
    assert_eq!(json["payload"]["mode"], "live");
}

#[test]
fn test_settings_defaults_from_empty_document() {
    let settings: AuraSettings = serde_json::from_str("{}").expect("Failed to deserialize AuraSettings");

    assert_eq!(settings, AuraSettings::default());
    assert_eq!(settings.run.mode, RunMode::Simulated);
    assert_eq!(settings.polling.interval_ms, 2_000);
    assert_eq!(settings.simulation.step_delays_ms, [2_000, 1_500, 2_000, 1_500, 0]);
}

#[test]
fn test_settings_partial_section_keeps_other_defaults() {
    let json = r#"{ "polling": { "max-consecutive-failures": 2 } }"#;
    let settings: AuraSettings = serde_json::from_str(json).expect("Failed to deserialize AuraSettings");

    assert_eq!(settings.polling.max_consecutive_failures, 2);
    assert_eq!(settings.polling.max_attempts, PollingSettings::default().max_attempts);
    assert_eq!(settings.backend, BackendSettings::default());
}
