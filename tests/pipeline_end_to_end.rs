use symmatch::{
    detect_symbols, DetectConfig, Detector, ImageView, Metric, SymMatchError, Template,
    DEGENERATE_SCORE,
};

const WIDTH: usize = 200;
const HEIGHT: usize = 200;

fn white_image_with_squares(corners: &[(usize, usize)], size: usize) -> Vec<u8> {
    let mut image = vec![255u8; WIDTH * HEIGHT];
    for &(x0, y0) in corners {
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                image[y * WIDTH + x] = 0;
            }
        }
    }
    image
}

fn black_template(size: usize) -> Template {
    Template::new(vec![0u8; size * size], size, size).unwrap()
}

fn assert_near(actual: (f32, f32), expected: (f32, f32)) {
    assert!(
        (actual.0 - expected.0).abs() <= 1.0 && (actual.1 - expected.1).abs() <= 1.0,
        "expected near {expected:?}, got {actual:?}"
    );
}

#[test]
fn finds_two_separated_squares() {
    let image = white_image_with_squares(&[(20, 20), (150, 150)], 10);
    let view = ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap();

    let found = detect_symbols(view, &black_template(10), &DetectConfig::default()).unwrap();

    assert_eq!(found.len(), 2, "got {found:?}");
    assert_near((found[0].x, found[0].y), (25.0, 25.0));
    assert_near((found[1].x, found[1].y), (155.0, 155.0));
    for det in &found {
        assert!((det.score - 1.0).abs() < 1e-6);
    }
}

#[test]
fn merges_squares_closer_than_min_distance() {
    // 10 px gap between the squares.
    let image = white_image_with_squares(&[(20, 20), (40, 20)], 10);
    let view = ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap();

    let found = detect_symbols(view, &black_template(10), &DetectConfig::default()).unwrap();

    assert_eq!(found.len(), 1, "got {found:?}");
    // Equal strength: the left square wins the tie on position.
    assert_near((found[0].x, found[0].y), (25.0, 25.0));
}

#[test]
fn adjacent_squares_form_a_single_detection() {
    // Top-left corners 10 px apart: the squares touch.
    let image = white_image_with_squares(&[(20, 20), (30, 20)], 10);
    let view = ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap();

    let found = detect_symbols(view, &black_template(10), &DetectConfig::default()).unwrap();
    assert_eq!(found.len(), 1, "got {found:?}");
}

#[test]
fn small_min_distance_keeps_close_squares_apart() {
    let image = white_image_with_squares(&[(20, 20), (40, 20)], 10);
    let view = ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap();
    let cfg = DetectConfig {
        min_distance: 5.0,
        ..DetectConfig::default()
    };

    let found = detect_symbols(view, &black_template(10), &cfg).unwrap();
    assert_eq!(found.len(), 2);
    assert_near((found[0].x, found[0].y), (25.0, 25.0));
    assert_near((found[1].x, found[1].y), (45.0, 25.0));
}

#[test]
fn blank_image_yields_no_detections() {
    let image = vec![255u8; WIDTH * HEIGHT];
    let view = ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap();
    let found = detect_symbols(view, &black_template(10), &DetectConfig::default()).unwrap();
    assert!(found.is_empty());
}

#[test]
fn oversized_template_fails_without_result() {
    let image = vec![255u8; 8 * 8];
    let view = ImageView::from_slice(&image, 8, 8).unwrap();
    let template = Template::new(vec![0u8; 9 * 4], 9, 4).unwrap();
    let err = detect_symbols(view, &template, &DetectConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SymMatchError::InvalidTemplateSize {
            template_width: 9,
            template_height: 4,
            image_width: 8,
            image_height: 8,
        }
    );
}

#[test]
fn textured_symbol_is_found_with_zncc() {
    // A plus sign drawn in black on white.
    let size = 9;
    let mut tpl = vec![255u8; size * size];
    for i in 0..size {
        tpl[4 * size + i] = 0;
        tpl[i * size + 4] = 0;
    }
    let mut image = vec![255u8; WIDTH * HEIGHT];
    for &(x0, y0) in &[(30usize, 40usize), (120, 90)] {
        for y in 0..size {
            for x in 0..size {
                image[(y0 + y) * WIDTH + x0 + x] = tpl[y * size + x];
            }
        }
    }
    let template = Template::new(tpl, size, size).unwrap();
    let detector = Detector::new(template);
    let report = detector
        .detect_with_diagnostics(ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap())
        .unwrap();

    assert_eq!(report.metric, Metric::Zncc);
    assert_eq!(report.detections.len(), 2, "got {:?}", report.detections);
    assert_near(
        (report.detections[0].x, report.detections[0].y),
        (34.0, 44.0),
    );
    assert_near(
        (report.detections[1].x, report.detections[1].y),
        (124.0, 94.0),
    );
}

#[test]
fn diagnostics_expose_intermediate_buffers() {
    let image = white_image_with_squares(&[(20, 20)], 10);
    let detector = Detector::new(black_template(10));
    let report = detector
        .detect_with_diagnostics(ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap())
        .unwrap();

    assert_eq!(report.metric, Metric::Ncc);
    assert_eq!((report.binary.width(), report.binary.height()), (200, 200));
    assert_eq!(report.binary.get(25, 25).copied(), Some(255));
    assert_eq!(report.binary.get(5, 5).copied(), Some(0));
    assert_eq!((report.surface.width(), report.surface.height()), (191, 191));
    assert_eq!((report.mask.width(), report.mask.height()), (191, 191));
    assert_eq!(report.surface.get(0, 0).copied(), Some(DEGENERATE_SCORE));
    assert!((report.surface.get(20, 20).copied().unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(report.mask.get(20, 20).copied(), Some(255));
    assert_eq!(report.detections.len(), 1);
}

#[test]
fn repeated_runs_are_identical() {
    let image = white_image_with_squares(&[(20, 20), (40, 20), (100, 60), (150, 150)], 10);
    let view = ImageView::from_slice(&image, WIDTH, HEIGHT).unwrap();
    let detector = Detector::new(black_template(10));
    let first = detector.detect(view).unwrap();
    for _ in 0..3 {
        assert_eq!(detector.detect(view).unwrap(), first);
    }
}
