pub mod json_api;

pub use json_api::{
    analyze_frame_json, analyze_frame_json_with_config, analyze_play_json,
    analyze_play_json_with_config, detect_goals_json, detect_goals_json_with_config,
    play_request_schema, FrameRequest, FrameResponse, GoalsRequest, GoalsResponse, PlayRequest,
    PlayResponse,
};
