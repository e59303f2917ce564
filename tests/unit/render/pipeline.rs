use super::*;
use crate::{
    beam::strength::BeamProfileKind, color::gamma::SourceEncoding, crop::content::ContentBox,
    foundation::core::Rgb, resample::horizontal::HorizontalFilter,
};

fn renderer(config: CrtConfig) -> FrameRenderer {
    FrameRenderer::new(config, RenderOpts { threads: Some(2) }).unwrap()
}

fn passthrough() -> CrtConfig {
    let mut cfg = CrtConfig::default();
    cfg.beam.profile = BeamProfileKind::Linear;
    cfg.horizontal.filter = HorizontalFilter::None;
    cfg
}

#[test]
fn thread_pool_rejects_zero_threads() {
    let err = build_thread_pool(Some(0)).unwrap_err();
    assert!(err.to_string().contains("threads"));
    assert!(build_thread_pool(Some(1)).is_ok());
    assert!(build_thread_pool(None).is_ok());
}

#[test]
fn new_validates_config() {
    let mut cfg = CrtConfig::default();
    cfg.beam.min_sigma = -1.0;
    assert!(FrameRenderer::new(cfg, RenderOpts::default()).is_err());
}

#[test]
fn render_frame_defaults_to_input_size() {
    let r = renderer(CrtConfig::default());
    let img = image::RgbImage::from_pixel(12, 9, image::Rgb([200, 120, 40]));
    let out = r.render_frame(&img, None, 0, None).unwrap();
    assert_eq!(out.dimensions(), (12, 9));

    let out = r
        .render_frame(
            &img,
            None,
            0,
            Some(OutputSize {
                width: 24,
                height: 27,
            }),
        )
        .unwrap();
    assert_eq!(out.dimensions(), (24, 27));
}

#[test]
fn passthrough_frame_round_trips_8bit_pixels() {
    let mut cfg = passthrough();
    cfg.gamma.output = cfg.gamma.input;
    let r = renderer(cfg);
    let img = image::RgbImage::from_fn(7, 5, |x, y| {
        image::Rgb([(x * 30) as u8, (y * 50) as u8, ((x + y) * 10) as u8])
    });
    let out = r.render_frame(&img, None, 0, None).unwrap();
    for (a, b) in img.pixels().zip(out.pixels()) {
        for c in 0..3 {
            assert!(a[c].abs_diff(b[c]) <= 1, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn content_box_blackens_the_border() {
    let mut cfg = passthrough();
    cfg.content = Some(ContentBox {
        x: 2,
        y: 1,
        width: 4,
        height: 2,
    });
    let r = renderer(cfg);
    let src = Texture::filled(8, 4, SourceEncoding::Linear, Rgb::WHITE).unwrap();
    let out = r
        .render_texture(
            &src,
            None,
            0,
            OutputSize {
                width: 16,
                height: 8,
            },
        )
        .unwrap();
    assert_eq!((out.width(), out.height()), (16, 8));
    assert_eq!(out.get(0, 0), Rgb::BLACK);
    assert_eq!(out.get(15, 7), Rgb::BLACK);
    assert_eq!(out.get(3, 4), Rgb::BLACK);
    let inside = out.get(8, 4);
    assert!(inside.g > 0.0, "{inside:?}");
}

#[test]
fn oversized_content_box_is_rejected_at_render_time() {
    let mut cfg = CrtConfig::default();
    cfg.content = Some(ContentBox::full(32, 32));
    let r = renderer(cfg);
    let src = Texture::filled(8, 8, SourceEncoding::Linear, Rgb::WHITE).unwrap();
    let out = OutputSize {
        width: 8,
        height: 8,
    };
    let err = r.render_texture(&src, None, 0, out).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"), "{err}");
}

#[test]
fn previous_frame_feeds_weave() {
    let mut cfg = passthrough();
    cfg.interlace.enabled = true;
    cfg.interlace.mode = crate::interlace::field::DeinterlacingMode::Weave;
    let r = renderer(cfg);
    let cur = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
    let prev = image::RgbImage::from_pixel(4, 4, image::Rgb([0, 255, 0]));
    let out = r.render_frame(&cur, Some(&prev), 0, None).unwrap();
    assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255]);
    assert_eq!(out.get_pixel(1, 1).0, [0, 255, 0]);
}
