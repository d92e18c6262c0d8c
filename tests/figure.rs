//! Rendering figures to disk.

use std::fs;

use runplot::Figure;
use tempfile::tempdir;

fn lander_figure() -> Figure {
    let mean: Vec<f64> = (0..60).map(|i| i as f64).collect();
    let stderr = vec![1.5; 60];
    let mut fig = Figure::new().with_size(640, 480);
    fig.plot_results(&mean, &stderr, "lander", true).unwrap();
    fig
}

#[test]
fn svg_carries_labels_in_serif() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("styled.svg");

    let mut fig = lander_figure();
    fig.set_labels("Episode", "Return");
    fig.set_tick_style();
    fig.save(&path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("lander"));
    assert!(svg.contains("Episode"));
    assert!(svg.contains("Return"));
    assert!(svg.contains(r#"font-family="serif""#));
    // ticks follow the serif style too
    assert!(!svg.contains("sans-serif"));
}

#[test]
fn ticks_stay_sans_serif_without_tick_style() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.svg");

    lander_figure().save(&path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("sans-serif"));
    assert!(svg.contains("lander"));
}

#[test]
fn png_is_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.png");

    let mut fig = lander_figure();
    fig.set_labels("Episode", "Return");
    fig.save(&path).unwrap();

    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let err = lander_figure().save(&dir.path().join("out.bmpx")).unwrap_err();
    assert!(err.to_string().contains("bmpx"));
}
