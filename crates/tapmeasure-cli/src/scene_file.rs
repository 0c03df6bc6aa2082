//! Recorded tap sessions: a camera frame, detected planes, and taps.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tapmeasure_engine::MeasureConfig;
use tapmeasure_math::{Point3, Transform, Vec3};
use tapmeasure_raycast::{CameraPose, DetectedPlane, Frame, PlaneScene, ScreenPoint, ViewSize};

/// Top-level recording file.
#[derive(Debug, Deserialize)]
pub struct Recording {
    /// Engine configuration; missing keys take defaults.
    #[serde(default)]
    pub engine: MeasureConfig,
    /// Camera frame at tap time. Absent means no frame was captured.
    pub frame: Option<FrameSpec>,
    /// Detected planes.
    #[serde(default)]
    pub planes: Vec<PlaneSpec>,
    /// Taps in delivery order.
    #[serde(default)]
    pub taps: Vec<ScreenPoint>,
}

#[derive(Debug, Deserialize)]
pub struct FrameSpec {
    pub eye: [f64; 3],
    pub target: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_fov_deg")]
    pub vertical_fov_deg: f64,
    #[serde(default)]
    pub timestamp: f64,
}

#[derive(Debug, Deserialize)]
pub struct PlaneSpec {
    pub origin: [f64; 3],
    pub normal: [f64; 3],
    /// Half-extents along the plane's own axes.
    pub half_extent: Option<[f64; 2]>,
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov_deg() -> f64 {
    60.0
}

fn point(a: [f64; 3]) -> Point3 {
    Point3::new(a[0], a[1], a[2])
}

fn vector(a: [f64; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

impl Recording {
    /// Load a `.json` or `.toml` recording, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let recording = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)?,
            _ => toml::from_str(&text)?,
        };
        Ok(recording)
    }

    /// The camera frame, if one was recorded.
    pub fn frame(&self) -> Result<Option<Frame>> {
        let Some(spec) = &self.frame else {
            return Ok(None);
        };
        let pose = Transform::look_at(&point(spec.eye), &point(spec.target), &vector(spec.up))
            .context("camera eye, target and up do not define an orientation")?;
        let frame = Frame::new(
            CameraPose::new(pose),
            spec.timestamp,
            ViewSize::new(spec.width, spec.height),
        )
        .with_vertical_fov(spec.vertical_fov_deg.to_radians());
        ensure!(
            frame.is_projectable(),
            "frame {}x{} with a {} degree field of view cannot be projected",
            spec.width,
            spec.height,
            spec.vertical_fov_deg
        );
        Ok(Some(frame))
    }

    /// Reconstruction built from the recorded planes.
    pub fn scene(&self) -> PlaneScene {
        let mut scene = PlaneScene::new();
        for spec in &self.planes {
            let mut plane = DetectedPlane::new(point(spec.origin), vector(spec.normal));
            if let Some([u, v]) = spec.half_extent {
                plane = plane.with_extent(u, v);
            }
            scene.add_plane(plane);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: &str = r#"
        taps = [{ x = 200.0, y = 150.0 }]

        [engine]
        mode = "distance"

        [frame]
        eye = [0.0, 0.0, 0.0]
        target = [0.0, 0.0, -1.0]
        width = 400.0
        height = 300.0

        [[planes]]
        origin = [0.0, 0.0, -2.0]
        normal = [0.0, 0.0, 1.0]
    "#;

    #[test]
    fn test_parse_recording() {
        let recording: Recording = toml::from_str(WALL).unwrap();
        assert_eq!(recording.taps.len(), 1);
        assert_eq!(recording.planes.len(), 1);
        assert_eq!(recording.scene().planes().len(), 1);

        let frame = recording.frame().unwrap().unwrap();
        assert!((frame.vertical_fov - 60f64.to_radians()).abs() < 1e-12);
        assert!(frame.camera.position().coords.norm() < 1e-12);
    }

    #[test]
    fn test_missing_frame() {
        let recording: Recording = toml::from_str("taps = []").unwrap();
        assert!(recording.frame().unwrap().is_none());
    }

    #[test]
    fn test_degenerate_camera() {
        let recording: Recording = toml::from_str(
            r#"
            [frame]
            eye = [0.0, 0.0, 0.0]
            target = [0.0, 0.0, 0.0]
            width = 400.0
            height = 300.0
            "#,
        )
        .unwrap();
        assert!(recording.frame().is_err());
    }

    #[test]
    fn test_flat_view_rejected() {
        let recording: Recording = toml::from_str(
            r#"
            [frame]
            eye = [0.0, 0.0, 0.0]
            target = [0.0, 0.0, -1.0]
            width = 400.0
            height = 0.0
            "#,
        )
        .unwrap();
        assert!(recording.frame().is_err());
    }
}
