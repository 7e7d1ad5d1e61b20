#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use symmatch::lowlevel::{correlate, TemplatePlan};
use symmatch::{DetectConfig, Detector, ImageView, Metric, Template};

fn make_template(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

#[test]
fn parallel_surface_is_bit_identical() {
    let mut rng = StdRng::seed_from_u64(42);
    let (width, height) = (97, 73);
    let image: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
    let view = ImageView::from_slice(&image, width, height).unwrap();
    let tpl = make_template(13, 9);
    let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 13, 9).unwrap());

    for metric in [Metric::Zncc, Metric::Ncc] {
        let seq = correlate(view, &plan, metric, false).unwrap();
        let par = correlate(view, &plan, metric, true).unwrap();
        assert_eq!(seq, par);
    }
}

#[test]
fn parallel_detector_matches_sequential() {
    let (width, height) = (180, 140);
    let mut image = vec![255u8; width * height];
    for &(x0, y0) in &[(10usize, 12usize), (90, 40), (150, 110), (60, 100)] {
        for y in y0..y0 + 12 {
            for x in x0..x0 + 12 {
                image[y * width + x] = 20;
            }
        }
    }
    let view = ImageView::from_slice(&image, width, height).unwrap();
    let template = Template::new(vec![0u8; 144], 12, 12).unwrap();

    let seq = Detector::new(template.clone())
        .with_config(DetectConfig {
            min_distance: 20.0,
            parallel: false,
            ..DetectConfig::default()
        })
        .detect(view)
        .unwrap();
    let par = Detector::new(template)
        .with_config(DetectConfig {
            min_distance: 20.0,
            parallel: true,
            ..DetectConfig::default()
        })
        .detect(view)
        .unwrap();

    assert_eq!(seq.len(), 4);
    assert_eq!(seq, par);
}
