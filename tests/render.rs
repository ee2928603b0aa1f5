use takken_radar::charts::{FontResolution, RenderError};
use takken_radar::{RadarChartBuilder, RadarData, RenderOptions, Series, ValidationError};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn builder(dpi: u32) -> RadarChartBuilder {
    RadarChartBuilder::new(RenderOptions {
        dpi,
        title: Some("Max scores".into()),
        ..Default::default()
    })
}

#[test]
fn identical_inputs_render_identical_pixels() {
    let data = RadarData::new(
        labels(&["A", "B", "C", "D", "E"]),
        vec![Series::named("Max", vec![14.0, 8.0, 3.0, 20.0, 5.0])],
    )
    .unwrap();

    let first = builder(60).build(&data).unwrap();
    let second = builder(60).build(&data).unwrap();

    assert_eq!(first.width(), 360);
    assert_eq!(first.image().as_raw(), second.image().as_raw());
    assert_eq!(first.to_png_bytes().unwrap(), second.to_png_bytes().unwrap());
}

#[test]
fn length_mismatch_fails_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");

    let err = builder(60)
        .build_from(labels(&["A", "B", "C"]), vec![Series::new(vec![1.0, 2.0])])
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::Validation(ValidationError::LengthMismatch { expected: 3, actual: 2, .. })
    ));

    // The file-writing path validates up front as well.
    let bad_options = RadarChartBuilder::new(RenderOptions {
        dpi: 0,
        ..Default::default()
    });
    let data = RadarData::from_pairs([("A", 1.0), ("B", 2.0), ("C", 3.0)]).unwrap();
    assert!(bad_options.render_to_file(&data, &out).is_err());
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn legend_uses_placeholder_for_unnamed_series() {
    let figure = builder(40)
        .build_with_font(
            &RadarData::new(
                labels(&["A", "B", "C"]),
                vec![
                    Series::new(vec![1.0, 2.0, 3.0]),
                    Series::named("Target", vec![3.0, 3.0, 3.0]),
                ],
            )
            .unwrap(),
            FontResolution::system(),
        )
        .unwrap();
    assert_eq!(
        figure.legend(),
        Some(&["series_1".to_string(), "Target".to_string()][..])
    );
}

#[test]
fn all_zero_series_use_unit_radial_max() {
    let figure = builder(40)
        .build_with_font(
            &RadarData::new(
                labels(&["A", "B", "C"]),
                vec![Series::new(vec![0.0; 3]), Series::new(vec![0.0; 3])],
            )
            .unwrap(),
            FontResolution::system(),
        )
        .unwrap();
    assert_eq!(figure.radial_max(), 1.0);
}

#[test]
fn fixed_radial_max_overrides_data() {
    let builder = RadarChartBuilder::new(RenderOptions {
        dpi: 40,
        r_max: Some(50.0),
        ..Default::default()
    });
    let figure = builder
        .build_with_font(&RadarData::takken_sample(), FontResolution::system())
        .unwrap();
    assert_eq!(figure.radial_max(), 50.0);
}

#[test]
fn saved_file_is_a_png_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sample.png");

    let figure = builder(40)
        .render_to_file(&RadarData::takken_sample(), &out)
        .unwrap();

    let written = std::fs::read(&out).unwrap();
    assert_eq!(written, figure.to_png_bytes().unwrap());
    let decoded = image::load_from_memory(&written).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (240, 240));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn unwritable_target_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing-dir").join("chart.png");
    let err = builder(40)
        .build_with_font(&RadarData::takken_sample(), FontResolution::system())
        .unwrap()
        .save(&out)
        .unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
    assert!(!out.exists());
}

#[test]
fn input_data_is_not_modified() {
    let data = RadarData::takken_sample();
    let before = data.clone();
    builder(40)
        .build_with_font(&data, FontResolution::system())
        .unwrap();
    assert_eq!(data, before);
}
