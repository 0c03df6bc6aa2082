//! A measurement session: engine plus the scene sink it annotates.

use std::sync::Mutex;

use tapmeasure_raycast::{Frame, FrameSource, RaycastService, ScreenPoint};
use tapmeasure_scene::{place, MeasurementResult, SceneError, SceneSink};
use tracing::debug;

use crate::engine::MeasurementEngine;
use crate::error::Result;

/// Annotations placed for one tap.
#[derive(Debug, Clone, PartialEq)]
pub struct TapReport<A> {
    /// The measurement that was placed.
    pub result: MeasurementResult,
    /// Anchor holding the measurement label.
    pub anchor: A,
    /// Anchors of per-sample distance labels, if enabled.
    pub sample_anchors: Vec<A>,
}

/// Serializes taps and places their results into an injected scene sink.
///
/// The sink lock is held from grid generation through placement, so taps
/// delivered from several threads never interleave their insertions.
#[derive(Debug)]
pub struct MeasurementSession<R, S> {
    engine: MeasurementEngine<R>,
    scene: Mutex<S>,
}

impl<R: RaycastService, S: SceneSink> MeasurementSession<R, S> {
    /// Session placing annotations into `scene`.
    pub fn new(engine: MeasurementEngine<R>, scene: S) -> Self {
        Self {
            engine,
            scene: Mutex::new(scene),
        }
    }

    /// The engine handling taps.
    pub fn engine(&self) -> &MeasurementEngine<R> {
        &self.engine
    }

    /// Measure a tap and place the result.
    ///
    /// If measurement fails nothing is placed. The primary annotation is
    /// placed before any per-sample annotations; a sink that fails partway
    /// leaves what it already accepted in the scene and the error is returned.
    pub fn tap(&self, point: ScreenPoint, frame: Option<&Frame>) -> Result<TapReport<S::Anchor>> {
        let mut scene = self.scene.lock().map_err(|_| SceneError::Poisoned)?;
        let outcome = self.engine.handle_tap_detailed(point, frame)?;
        let style = &self.engine.config().style;

        let anchor = place(&mut *scene, &outcome.primary, style)?;
        let sample_anchors = outcome
            .samples
            .iter()
            .map(|sample| place(&mut *scene, sample, style))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(samples = sample_anchors.len(), "annotation placed");

        Ok(TapReport {
            result: outcome.primary,
            anchor,
            sample_anchors,
        })
    }

    /// Like [`tap`](Self::tap), reading the frame from `source` at tap time.
    pub fn tap_from<F: FrameSource + ?Sized>(
        &self,
        point: ScreenPoint,
        source: &F,
    ) -> Result<TapReport<S::Anchor>> {
        let frame = source.current_frame();
        self.tap(point, frame.as_ref())
    }

    /// Run `f` with shared access to the scene.
    pub fn with_scene<T>(&self, f: impl FnOnce(&S) -> T) -> Result<T> {
        let scene = self.scene.lock().map_err(|_| SceneError::Poisoned)?;
        Ok(f(&scene))
    }

    /// Consume the session and return the scene.
    pub fn into_scene(self) -> Result<S> {
        self.scene
            .into_inner()
            .map_err(|_| SceneError::Poisoned.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DistanceUnit, MeasureConfig};
    use crate::engine::tests::{frame_at, Scripted};
    use crate::error::MeasureError;
    use approx::assert_relative_eq;
    use tapmeasure_math::Point3;
    use tapmeasure_raycast::{CameraPose, DetectedPlane, PlaneScene, ViewSize};
    use tapmeasure_scene::{AnchorId, Color, Renderable, SceneGraph};

    /// Scene graph that refuses anchors past a fixed count.
    #[derive(Default)]
    struct Bounded {
        graph: SceneGraph,
        capacity: usize,
    }

    impl SceneSink for Bounded {
        type Anchor = AnchorId;

        fn add_anchor(&mut self, position: Point3) -> tapmeasure_scene::Result<AnchorId> {
            if self.graph.len() >= self.capacity {
                return Err(SceneError::Insertion("scene full".into()));
            }
            self.graph.add_anchor(position)
        }

        fn add_child(&mut self, anchor: AnchorId, child: Renderable) -> tapmeasure_scene::Result<()> {
            self.graph.add_child(anchor, child)
        }
    }

    #[test]
    fn test_distance_tap_places_labelled_marker() {
        let service = Scripted::default().hit(120.0, 80.0, Point3::new(0.0, 0.0, -2.0));
        let config = MeasureConfig {
            distance_unit: DistanceUnit::Centimeters,
            ..MeasureConfig::distance()
        };
        let session = MeasurementSession::new(
            MeasurementEngine::new(service, config).unwrap(),
            SceneGraph::new(),
        );
        let report = session
            .tap(ScreenPoint::new(120.0, 80.0), Some(&frame_at(Point3::origin())))
            .unwrap();

        let scene = session.into_scene().unwrap();
        let node = scene.get(report.anchor).unwrap();
        assert_eq!(node.position, Point3::new(0.0, 0.0, -2.0));
        assert!(node.has_marker());
        assert!(node.label().unwrap().contains("200.00cm"));
    }

    #[test]
    fn test_area_tap_places_green_label_at_centroid() {
        let session = MeasurementSession::new(
            MeasurementEngine::new(Scripted::unit_square(), MeasureConfig::default()).unwrap(),
            SceneGraph::new(),
        );
        let report = session
            .tap(ScreenPoint::new(0.0, 0.0), Some(&frame_at(Point3::origin())))
            .unwrap();
        session
            .with_scene(|scene| {
                let node = scene.get(report.anchor).unwrap();
                assert_relative_eq!(node.position.x, 0.5, epsilon = 1e-12);
                assert_eq!(node.label(), Some("10000.00cm2"));
                assert!(!node.has_marker());
                assert_eq!(node.children[0].material.color, Color::GREEN);
            })
            .unwrap();
    }

    #[test]
    fn test_insufficient_samples_places_nothing() {
        let service = Scripted::default()
            .hit(200.0, 150.0, Point3::new(0.0, 0.0, -1.0))
            .hit(300.0, 250.0, Point3::new(1.0, 1.0, -1.0));
        let config = MeasureConfig {
            annotate_samples: true,
            ..MeasureConfig::default()
        };
        let session = MeasurementSession::new(
            MeasurementEngine::new(service, config).unwrap(),
            SceneGraph::new(),
        );
        let err = session
            .tap(ScreenPoint::new(0.0, 0.0), Some(&frame_at(Point3::origin())))
            .unwrap_err();
        assert!(matches!(err, MeasureError::InsufficientSamples { .. }));
        assert_eq!(session.with_scene(|s| s.len()).unwrap(), 0);
    }

    #[test]
    fn test_miss_places_nothing() {
        let session = MeasurementSession::new(
            MeasurementEngine::new(Scripted::default(), MeasureConfig::distance()).unwrap(),
            SceneGraph::new(),
        );
        let source: Option<Frame> = None;
        assert_eq!(
            session.tap_from(ScreenPoint::new(5.0, 5.0), &source).unwrap_err(),
            MeasureError::Miss
        );
        assert!(session.with_scene(|s| s.is_empty()).unwrap());
    }

    #[test]
    fn test_annotate_samples_adds_one_anchor_per_hit() {
        let config = MeasureConfig {
            annotate_samples: true,
            ..MeasureConfig::default()
        };
        let session = MeasurementSession::new(
            MeasurementEngine::new(Scripted::unit_square(), config).unwrap(),
            SceneGraph::new(),
        );
        let report = session
            .tap(ScreenPoint::new(0.0, 0.0), Some(&frame_at(Point3::origin())))
            .unwrap();
        assert_eq!(report.sample_anchors.len(), 4);
        let scene = session.into_scene().unwrap();
        assert_eq!(scene.len(), 5);
        assert_eq!(scene.anchors().filter(|a| a.has_marker()).count(), 4);
    }

    #[test]
    fn test_two_taps_accumulate_independent_annotations() {
        let service = Scripted::default()
            .hit(100.0, 100.0, Point3::new(0.0, 0.0, -1.0))
            .hit(300.0, 200.0, Point3::new(0.0, 0.0, -3.0));
        let session = MeasurementSession::new(
            MeasurementEngine::new(service, MeasureConfig::distance()).unwrap(),
            SceneGraph::new(),
        );
        let frame = frame_at(Point3::origin());
        let first = session.tap(ScreenPoint::new(100.0, 100.0), Some(&frame)).unwrap();
        let snapshot = session
            .with_scene(|s| s.get(first.anchor).cloned())
            .unwrap()
            .unwrap();
        let second = session.tap(ScreenPoint::new(300.0, 200.0), Some(&frame)).unwrap();

        let scene = session.into_scene().unwrap();
        assert_eq!(scene.len(), 2);
        assert_ne!(first.anchor, second.anchor);
        assert_eq!(scene.get(first.anchor), Some(&snapshot));
        assert_eq!(scene.get(second.anchor).unwrap().label(), Some("3.00m"));
    }

    #[test]
    fn test_concurrent_taps_are_serialized() {
        let scene = PlaneScene::new().with_plane(DetectedPlane::wall(-2.0));
        let session = MeasurementSession::new(
            MeasurementEngine::new(scene, MeasureConfig::distance()).unwrap(),
            SceneGraph::new(),
        );
        let frame = frame_at(Point3::origin());

        std::thread::scope(|s| {
            for i in 0..8 {
                let session = &session;
                let frame = frame.clone();
                s.spawn(move || {
                    let x = 100.0 + 20.0 * i as f64;
                    session.tap(ScreenPoint::new(x, 150.0), Some(&frame)).unwrap();
                });
            }
        });

        let scene = session.into_scene().unwrap();
        assert_eq!(scene.len(), 8);
        // Every anchor is complete: marker plus label, never a half-built node.
        assert!(scene.anchors().all(|a| a.children.len() == 2));
    }

    #[test]
    fn test_degenerate_frame_is_a_miss() {
        let scene = PlaneScene::new().with_plane(DetectedPlane::wall(-2.0));
        let session = MeasurementSession::new(
            MeasurementEngine::new(scene, MeasureConfig::distance()).unwrap(),
            SceneGraph::new(),
        );
        let flat = Frame::new(
            CameraPose::at(Point3::origin()),
            0.0,
            ViewSize::new(400.0, 0.0),
        );
        assert_eq!(
            session.tap(ScreenPoint::new(100.0, 0.0), Some(&flat)).unwrap_err(),
            MeasureError::Miss
        );
        assert!(session.with_scene(|s| s.is_empty()).unwrap());
    }

    #[test]
    fn test_sink_failure_on_sample_keeps_primary() {
        let config = MeasureConfig {
            annotate_samples: true,
            ..MeasureConfig::default()
        };
        let session = MeasurementSession::new(
            MeasurementEngine::new(Scripted::unit_square(), config).unwrap(),
            Bounded {
                capacity: 2,
                ..Bounded::default()
            },
        );
        let err = session
            .tap(ScreenPoint::new(0.0, 0.0), Some(&frame_at(Point3::origin())))
            .unwrap_err();
        assert_eq!(err, MeasureError::Scene(SceneError::Insertion("scene full".into())));

        let scene = session.into_scene().unwrap();
        assert_eq!(scene.graph.len(), 2);
        let primary = scene.graph.anchors().next().unwrap();
        assert_eq!(primary.label(), Some("10000.00cm2"));
    }
}
