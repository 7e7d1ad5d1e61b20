//! Symbol detection pipeline.
//!
//! [`Detector`] runs the stages in order: inverse thresholding of image and
//! template, correlation, surface thresholding, blob extraction, merging and
//! mapping to symbol centers. Validation happens before any stage runs.

use crate::candidate::blob::extract_blobs;
use crate::candidate::merge::merge_blobs;
use crate::image::OwnedImage;
use crate::template::{Template, TemplatePlan};
use crate::threshold::{threshold_inverse, threshold_surface};
use crate::trace::{trace_event, trace_span};
use crate::util::{SymMatchError, SymMatchResult};
use crate::ImageView;

pub(crate) mod center;
pub(crate) mod correlate;

use center::to_symbol_center;
use correlate::{check_template_fits, correlate};

/// Similarity metric used by the correlator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// ZNCC, falling back to NCC when the template is flat.
    #[default]
    Auto,
    /// Zero-mean normalized cross-correlation.
    Zncc,
    /// Uncentered normalized cross-correlation.
    Ncc,
}

impl Metric {
    /// Resolves [`Metric::Auto`] for a concrete template.
    ///
    /// A flat template has no zero-mean component, so ZNCC would score `-1`
    /// everywhere; such templates are scored with NCC instead.
    pub fn resolve(self, plan: &TemplatePlan) -> Metric {
        match self {
            Metric::Auto if plan.is_flat() => Metric::Ncc,
            Metric::Auto => Metric::Zncc,
            other => other,
        }
    }
}

/// Configuration for symbol detection.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectConfig {
    /// Intensities strictly below this level become foreground.
    pub threshold_level: u8,
    /// Minimum correlation score for a surface cell to become a candidate.
    pub min_correlation: f32,
    /// Minimum distance in pixels between reported detections.
    pub min_distance: f32,
    /// Correlation metric.
    pub metric: Metric,
    /// Score rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            threshold_level: 128,
            min_correlation: 0.80,
            min_distance: 50.0,
            metric: Metric::Auto,
            parallel: false,
        }
    }
}

impl DetectConfig {
    /// Checks value ranges.
    pub fn validate(&self) -> SymMatchResult<()> {
        if !self.min_correlation.is_finite() || !(-1.0..=1.0).contains(&self.min_correlation) {
            return Err(SymMatchError::InvalidInput(
                "min_correlation must lie in [-1, 1]",
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(SymMatchError::InvalidInput(
                "min_distance must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// A detected symbol instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Symbol center column in source pixel coordinates.
    pub x: f32,
    /// Symbol center row in source pixel coordinates.
    pub y: f32,
    /// Peak correlation score of the merged blob.
    pub score: f32,
    /// Number of surface cells in the blob.
    pub area: usize,
}

/// Detections together with the intermediate buffers that produced them.
#[derive(Clone, Debug)]
pub struct DetectionReport {
    /// Final detections, strongest first.
    pub detections: Vec<Detection>,
    /// Inverse-thresholded source image.
    pub binary: OwnedImage<u8>,
    /// Correlation surface.
    pub surface: OwnedImage<f32>,
    /// Thresholded correlation surface.
    pub mask: OwnedImage<u8>,
    /// Metric actually used after resolving [`Metric::Auto`].
    pub metric: Metric,
}

/// Symbol detector bound to one template.
#[derive(Clone, Debug)]
pub struct Detector {
    template: Template,
    cfg: DetectConfig,
}

impl Detector {
    /// Creates a detector with the default configuration.
    pub fn new(template: Template) -> Self {
        Self {
            template,
            cfg: DetectConfig::default(),
        }
    }

    /// Replaces the detection configuration.
    pub fn with_config(mut self, cfg: DetectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Returns the template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Detects every template occurrence and returns symbol centers,
    /// strongest first.
    pub fn detect(&self, image: ImageView<'_, u8>) -> SymMatchResult<Vec<Detection>> {
        Ok(self.detect_with_diagnostics(image)?.detections)
    }

    /// Like [`Detector::detect`], also returning intermediate buffers.
    pub fn detect_with_diagnostics(
        &self,
        image: ImageView<'_, u8>,
    ) -> SymMatchResult<DetectionReport> {
        self.cfg.validate()?;
        let tpl_width = self.template.width();
        let tpl_height = self.template.height();
        check_template_fits(image, tpl_width, tpl_height)?;

        let _span = trace_span!(
            "detect",
            width = image.width(),
            height = image.height(),
            tpl_width = tpl_width,
            tpl_height = tpl_height
        )
        .entered();

        let level = self.cfg.threshold_level;
        let binary = threshold_inverse(image, level);
        let binary_tpl = threshold_inverse(self.template.view(), level);
        let plan = TemplatePlan::from_view(binary_tpl.view());
        let metric = self.cfg.metric.resolve(&plan);

        let surface = correlate(binary.view(), &plan, metric, self.cfg.parallel)?;
        let mask = threshold_surface(surface.view(), self.cfg.min_correlation);
        let blobs = extract_blobs(mask.view(), surface.view())?;
        let merged = merge_blobs(blobs, self.cfg.min_distance);

        let detections: Vec<Detection> = merged
            .into_iter()
            .map(|blob| {
                let (x, y) = to_symbol_center(blob.x, blob.y, tpl_width, tpl_height);
                Detection {
                    x,
                    y,
                    score: blob.strength,
                    area: blob.area,
                }
            })
            .collect();

        trace_event!("detections", count = detections.len());
        Ok(DetectionReport {
            detections,
            binary,
            surface,
            mask,
            metric,
        })
    }
}

/// Runs the detection pipeline once without keeping a [`Detector`].
pub fn detect_symbols(
    image: ImageView<'_, u8>,
    template: &Template,
    cfg: &DetectConfig,
) -> SymMatchResult<Vec<Detection>> {
    Detector::new(template.clone())
        .with_config(cfg.clone())
        .detect(image)
}
