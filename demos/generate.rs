// qoif imports
extern crate qoif;

/// Generate a gradient with a transparent border, write it to a file, and read it back.
fn main() {
    use qoif::prelude::*;

    let size = Vec2(640, 360);

    let image = Image::from_fn(size, |Vec2(x, y)| {
        let border = x < 20 || y < 20 || x >= size.width() - 20 || y >= size.height() - 20;
        let alpha = if border { 0 } else { 255 };

        Pixel::rgba((x * 255 / size.width()) as u8, (y * 255 / size.height()) as u8, 160, alpha)
    });

    write_image_to_file("generated_gradient.qoi", &image)
        .expect("writing the image failed");

    let header = decode_header(std::fs::File::open("generated_gradient.qoi").unwrap()).unwrap();
    println!("created generated_gradient.qoi: {}x{}, {:?}", header.width, header.height, header.channels);

    let decoded = read_image_from_file("generated_gradient.qoi")
        .expect("reading the image failed");

    assert_eq!(decoded, image, "image changed while writing and reading");
}
