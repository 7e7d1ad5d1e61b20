//! Correlation stage: template plan against a binary image.

use crate::image::integral::IntegralImage;
use crate::image::OwnedImage;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::scan_full_par;
use crate::kernel::scalar::{scan_full, NccScalar, ZnccScalar};
use crate::kernel::Kernel;
use crate::search::Metric;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::{SymMatchError, SymMatchResult};
use crate::ImageView;

/// Fails with `InvalidTemplateSize` unless a `tpl_width x tpl_height` template
/// fits inside `image`.
pub fn check_template_fits<T>(
    image: ImageView<'_, T>,
    tpl_width: usize,
    tpl_height: usize,
) -> SymMatchResult<()> {
    if tpl_width > image.width() || tpl_height > image.height() {
        return Err(SymMatchError::InvalidTemplateSize {
            template_width: tpl_width,
            template_height: tpl_height,
            image_width: image.width(),
            image_height: image.height(),
        });
    }
    Ok(())
}

/// Computes the correlation surface of `plan` over every placement in `image`.
///
/// The surface has size `(W - w + 1) x (H - h + 1)` and every value lies in
/// `[-1, 1]`; undefined placements hold `-1.0`. With `parallel` set and the
/// `rayon` feature enabled rows are scored on the rayon pool; the result is
/// identical to the sequential scan.
pub fn correlate(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    parallel: bool,
) -> SymMatchResult<OwnedImage<f32>> {
    check_template_fits(image, plan.width(), plan.height())?;
    let metric = metric.resolve(plan);
    let _span = trace_span!(
        "correlate",
        width = image.width(),
        height = image.height(),
        metric = ?metric,
        parallel = parallel
    )
    .entered();

    let integral = IntegralImage::from_view(image);
    let surface = match metric {
        Metric::Ncc => scan::<NccScalar>(image, &integral, plan, parallel),
        Metric::Zncc | Metric::Auto => scan::<ZnccScalar>(image, &integral, plan, parallel),
    };

    trace_event!(
        "surface_ready",
        width = surface.width(),
        height = surface.height()
    );
    Ok(surface)
}

/// Builds a plan for `template` and correlates it against `image`.
pub fn correlate_template(
    image: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    metric: Metric,
) -> SymMatchResult<OwnedImage<f32>> {
    let plan = TemplatePlan::from_view(template);
    correlate(image, &plan, metric, false)
}

#[cfg(feature = "rayon")]
fn scan<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    parallel: bool,
) -> OwnedImage<f32> {
    if parallel {
        scan_full_par::<K>(image, integral, plan)
    } else {
        scan_full::<K>(image, integral, plan)
    }
}

#[cfg(not(feature = "rayon"))]
fn scan<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    plan: &TemplatePlan,
    _parallel: bool,
) -> OwnedImage<f32> {
    scan_full::<K>(image, integral, plan)
}
