//! Gaze Choreography Pipeline - Demo Entry Point

use driver::synthetic::SyntheticFace;
use driver::init_logging;
use gaze_session::{GazeSession, SessionConfig};
use landmark_geometry::Point2D;
use tracing::info;

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Gaze Choreography Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let mut session = GazeSession::new(SessionConfig::default());
    let mut face = SyntheticFace::new();

    // Settle on a centered gaze, then blink once
    run_frames(&mut session, face.look(0.5).frame(), 20)?;
    run_frames(&mut session, face.eyes_open(false).frame(), 3)?;
    run_frames(&mut session, face.eyes_open(true).frame(), 5)?;

    // Walk the choreography: left, right, then the circle trail
    info!("phase: {:?}", session.current_phase());
    run_frames(&mut session, face.look(0.8).frame(), 15)?;

    info!("phase: {:?}", session.current_phase());
    run_frames(&mut session, face.look(0.2).frame(), 20)?;

    // DrawCircle: sweep the gaze around while the external layer
    // would render the trail, then close the phase out
    info!("phase: {:?}", session.current_phase());
    for step in 0..30 {
        let angle = step as f32 / 30.0 * std::f32::consts::TAU;
        let h = 0.5 + 0.3 * angle.cos();
        run_frames(&mut session, face.look(h).frame(), 1)?;
    }
    if let Some(trigger) = session.finish_circle() {
        info!(phase = ?trigger.phase, "circle trail complete");
    }

    info!(
        frames = session.frames_processed(),
        blinks = session.blink_count(),
        done = session.is_done(),
        "session finished"
    );

    Ok(())
}

/// Feed the same snapshot `count` times, printing event-bearing
/// analyses as JSON lines.
fn run_frames(
    session: &mut GazeSession,
    landmarks: Vec<Point2D>,
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..count {
        let analysis = session.process_frame(&landmarks, FRAME_WIDTH, FRAME_HEIGHT)?;
        if analysis.has_event() {
            println!("{}", serde_json::to_string(&analysis)?);
        }
    }
    Ok(())
}
