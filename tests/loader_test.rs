use digital_rain::core::{extract, Predicate};
use digital_rain::loader::{load_bitmap, ImageScale};
use image::{Rgba, RgbaImage};

#[test]
fn png_on_disk_loads_and_extracts() {
    let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
    for y in 0..4 {
        for x in 0..4 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    let path = std::env::temp_dir().join(format!("digital-rain-loader-{}.png", std::process::id()));
    img.save(&path).unwrap();

    let bmp = load_bitmap(&path, ImageScale::Factor { x: 1.0, y: 1.0 });
    std::fs::remove_file(&path).ok();
    let bmp = bmp.unwrap();

    assert_eq!((bmp.width(), bmp.height()), (8, 8));
    let grid = extract(&bmp, 4, Predicate::default());
    assert_eq!(grid.iter().collect::<Vec<_>>(), vec![(0, 0)]);
}

#[test]
fn unreadable_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("digital-rain-bad-{}.png", std::process::id()));
    std::fs::write(&path, b"not an image").unwrap();
    let result = load_bitmap(&path, ImageScale::Factor { x: 1.0, y: 1.0 });
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}
