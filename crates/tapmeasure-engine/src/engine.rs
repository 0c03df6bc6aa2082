//! Tap handling: grid sampling, ray casting, and result assembly.

use tapmeasure_geom::{centroid, distance, strip_area};
use tapmeasure_math::Point3;
use tapmeasure_raycast::{Frame, FrameSource, RaycastAdapter, RaycastService, ScreenPoint};
use tapmeasure_scene::{MeasurementKind, MeasurementResult};
use tracing::{debug, info, warn};

use crate::config::{MeasureConfig, MeasureMode};
use crate::error::{MeasureError, Result};
use crate::grid::SampleGrid;

/// Everything one tap produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TapOutcome {
    /// The measurement the tap was for.
    pub primary: MeasurementResult,
    /// Per-sample distances, when `annotate_samples` is enabled in area mode.
    pub samples: Vec<MeasurementResult>,
}

/// Stateless measurement engine. Each tap is handled start to finish.
#[derive(Debug, Clone)]
pub struct MeasurementEngine<R> {
    adapter: RaycastAdapter<R>,
    config: MeasureConfig,
}

impl<R: RaycastService> MeasurementEngine<R> {
    /// Engine over `service` with a validated `config`.
    pub fn new(service: R, config: MeasureConfig) -> Result<Self> {
        config.validate()?;
        let adapter = RaycastAdapter::with_query(service, config.raycast);
        Ok(Self { adapter, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Measure for a tap at `point` using the frame captured at tap time.
    ///
    /// A missing frame is treated as a miss for the whole gesture.
    pub fn handle_tap(&self, point: ScreenPoint, frame: Option<&Frame>) -> Result<MeasurementResult> {
        self.handle_tap_detailed(point, frame).map(|o| o.primary)
    }

    /// Like [`handle_tap`](Self::handle_tap), reading the frame from `source`.
    pub fn handle_tap_from<F: FrameSource + ?Sized>(
        &self,
        point: ScreenPoint,
        source: &F,
    ) -> Result<MeasurementResult> {
        let frame = source.current_frame();
        self.handle_tap(point, frame.as_ref())
    }

    /// Measure for a tap, also returning per-sample results.
    pub fn handle_tap_detailed(
        &self,
        point: ScreenPoint,
        frame: Option<&Frame>,
    ) -> Result<TapOutcome> {
        let Some(frame) = frame else {
            debug!("no frame captured yet");
            return Err(MeasureError::Miss);
        };
        debug!(x = point.x, y = point.y, timestamp = frame.timestamp, "tap");

        match self.config.mode {
            MeasureMode::Distance => Ok(TapOutcome {
                primary: self.measure_distance(point, frame)?,
                samples: Vec::new(),
            }),
            MeasureMode::Area => self.measure_area(frame),
        }
    }

    /// Distance from the camera to the surface under `point`.
    pub fn measure_distance(&self, point: ScreenPoint, frame: &Frame) -> Result<MeasurementResult> {
        let hit = self
            .adapter
            .cast_ray(point, frame)
            .ok_or(MeasureError::Miss)?;
        let result = self.distance_result(hit, frame);
        info!(value = result.value, unit = %result.unit, "distance measured");
        Ok(result)
    }

    /// Area of the polygon spanned by the selected grid samples.
    pub fn measure_area(&self, frame: &Frame) -> Result<TapOutcome> {
        let grid = SampleGrid::generate(frame.view, self.config.grid_spacing)?;

        let mut hits: Vec<Point3> = Vec::with_capacity(self.config.selection.len());
        for cell in self.config.selection.select(&grid) {
            match self.adapter.cast_ray(cell.point, frame) {
                Some(p) => {
                    debug!(column = cell.column, row = cell.row, x = p.x, y = p.y, z = p.z, "sample hit");
                    hits.push(p);
                }
                None => {
                    debug!(column = cell.column, row = cell.row, "sample missed, dropped");
                }
            }
        }

        if hits.len() < self.config.min_samples {
            warn!(
                required = self.config.min_samples,
                found = hits.len(),
                "too few samples for an area"
            );
            return Err(MeasureError::InsufficientSamples {
                required: self.config.min_samples,
                found: hits.len(),
            });
        }

        let value = strip_area(&hits)? * self.config.area_unit_factor;
        let anchor = centroid(&hits)?;
        info!(value, unit = %self.config.area_suffix, samples = hits.len(), "area measured");

        let samples = if self.config.annotate_samples {
            hits.iter().map(|p| self.distance_result(*p, frame)).collect()
        } else {
            Vec::new()
        };

        Ok(TapOutcome {
            primary: MeasurementResult {
                kind: MeasurementKind::Area,
                value,
                unit: self.config.area_suffix.clone(),
                anchor,
                samples: hits,
            },
            samples,
        })
    }

    fn distance_result(&self, hit: Point3, frame: &Frame) -> MeasurementResult {
        let camera = frame.camera.position();
        let meters = distance(&camera, &hit);
        debug!(
            camera_x = camera.x,
            camera_y = camera.y,
            camera_z = camera.z,
            meters,
            "camera distance"
        );
        let unit = self.config.distance_unit;
        MeasurementResult {
            kind: MeasurementKind::Distance,
            value: meters * unit.factor(),
            unit: unit.suffix().to_string(),
            anchor: hit,
            samples: vec![hit],
        }
    }
}
