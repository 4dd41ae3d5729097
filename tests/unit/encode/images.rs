use super::*;
use crate::foundation::core::Fps;

fn cfg(frame_count: u64) -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::whole(5).unwrap(),
        frame_count,
    }
}

#[test]
fn frame_names_are_padded_to_frame_count_digits() {
    let opts = ImageSequenceOpts::new("out");
    assert_eq!(
        opts.frame_path(FrameIndex(7), 12),
        Path::new("out").join("frame_07.png")
    );
    assert_eq!(
        opts.frame_path(FrameIndex(7), 100),
        Path::new("out").join("frame_007.png")
    );
    assert_eq!(
        opts.frame_path(FrameIndex(3), 9),
        Path::new("out").join("frame_3.png")
    );
    let jpg = ImageSequenceOpts::new("o").with_extension(".jpg");
    assert_eq!(jpg.extension, "jpg");
}

#[test]
fn unknown_extension_fails_on_begin() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = ImageSequenceSink::new(
        ImageSequenceOpts::new(dir.path()).with_extension("nope"),
    );
    assert!(matches!(
        sink.begin(cfg(1)),
        Err(PlotvidError::Configuration(_))
    ));
}

#[test]
fn png_frames_are_written_unpremultiplied() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = ImageSequenceSink::new(ImageSequenceOpts::new(dir.path().join("seq")));
    sink.begin(cfg(2)).unwrap();

    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let img = image::open(dir.path().join("seq/frame_0.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn jpeg_frames_are_flattened_over_background() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink =
        ImageSequenceSink::new(ImageSequenceOpts::new(dir.path()).with_extension("jpg"));
    sink.begin(cfg(1)).unwrap();
    let frame = FrameRGBA::solid(2, 1, [0, 0, 0, 0], true);
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.end().unwrap();
    assert!(dir.path().join("frame_0.jpg").is_file());
}

#[test]
fn flatten_straight_pixels_to_rgb() {
    let rgb = straight_over_bg_to_rgb8(&[255, 0, 0, 128, 9, 9, 9, 0], [0, 0, 255, 255]);
    assert_eq!(rgb, vec![128, 0, 127, 0, 0, 255]);
}

#[test]
fn push_before_begin_fails() {
    let mut sink = ImageSequenceSink::new(ImageSequenceOpts::new("unused"));
    let frame = FrameRGBA::solid(2, 1, [0; 4], true);
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame),
        Err(PlotvidError::Encode(_))
    ));
}
