use super::*;
use crate::color::gamma::SourceEncoding;

fn boxed() -> ContentBox {
    ContentBox {
        x: 2,
        y: 1,
        width: 4,
        height: 2,
    }
}

fn numbered(w: u32, h: u32) -> Texture {
    Texture::from_fn(w, h, SourceEncoding::Linear, |x, y| {
        Rgb::new(x as f32, y as f32, 1.0)
    })
    .unwrap()
}

#[test]
fn full_box_is_identity() {
    let b = ContentBox::full(10, 5);
    assert_eq!(b.uv_transform(10, 5), Affine::IDENTITY);
    let uv = Point::new(0.3, 0.7);
    assert_eq!(b.to_content_uv(uv, 10, 5), Some(uv));
}

#[test]
fn uv_round_trips_inside_the_box() {
    let b = boxed();
    for (u, v) in [(0.0, 0.0), (0.25, 0.5), (0.99, 0.01)] {
        let content = Point::new(u, v);
        let buffer = b.from_content_uv(content, 8, 4);
        let back = b.to_content_uv(buffer, 8, 4).unwrap();
        assert!((back - content).hypot() < 1e-12, "{content:?} -> {back:?}");
    }
    let corner = b.from_content_uv(Point::ORIGIN, 8, 4);
    assert_eq!(corner, Point::new(0.25, 0.25));
}

#[test]
fn outside_the_box_is_masked() {
    let b = boxed();
    assert_eq!(b.to_content_uv(Point::new(0.1, 0.5), 8, 4), None);
    assert_eq!(b.to_content_uv(Point::new(0.5, 0.9), 8, 4), None);
    assert_eq!(b.to_content_uv(Point::new(0.75, 0.5), 8, 4), None);
    assert!(b.to_content_uv(Point::new(0.7, 0.6), 8, 4).is_some());
}

#[test]
fn validate_rejects_empty_and_overhanging_boxes() {
    assert!(boxed().validate(8, 4).is_ok());
    assert!(boxed().validate(5, 4).is_err());
    assert!(boxed().validate(8, 2).is_err());
    let empty = ContentBox {
        width: 0,
        ..boxed()
    };
    assert!(empty.validate(8, 4).is_err());
}

#[test]
fn crop_copies_the_box() {
    let cropped = boxed().crop(&numbered(8, 4)).unwrap();
    assert_eq!((cropped.width(), cropped.height()), (4, 2));
    assert_eq!(cropped.get(0, 0), Rgb::new(2.0, 1.0, 1.0));
    assert_eq!(cropped.get(3, 1), Rgb::new(5.0, 2.0, 1.0));
}

#[test]
fn uncrop_restores_position_and_blackens_outside() {
    let b = boxed();
    let buffer = numbered(8, 4);
    let restored = b.uncrop(&b.crop(&buffer).unwrap(), 8, 4, 8, 4).unwrap();
    for y in 0..4 {
        for x in 0..8 {
            let inside = (2..6).contains(&x) && (1..3).contains(&y);
            let want = if inside { buffer.get(x, y) } else { Rgb::BLACK };
            assert_eq!(restored.get(x, y), want, "({x}, {y})");
        }
    }
}

#[test]
fn scaled_size_follows_output_resolution() {
    assert_eq!(boxed().scaled_size(8, 4, 16, 12), (8, 6));
    assert_eq!(boxed().scaled_size(8, 4, 1, 1), (1, 1));
}
